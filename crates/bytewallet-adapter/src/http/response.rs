/*
[INPUT]:  Raw response bytes from the transport
[OUTPUT]: Open JSON mapping, optionally checked for gateway error codes
[POS]:    HTTP layer - response decoding
[UPDATE]: When the gateway's error envelope changes
*/

use serde_json::Value;

use crate::http::{GatewayError, Result};
use crate::types::{GATEWAY_SUCCESS_CODE, GatewayResponse};

/// Parses gateway responses into a JSON object
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseDecoder {
    strict_gateway_errors: bool,
}

impl ResponseDecoder {
    pub fn new(strict_gateway_errors: bool) -> Self {
        Self {
            strict_gateway_errors,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict_gateway_errors
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<GatewayResponse> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| GatewayError::Decode(format!("response is not valid JSON: {e}")))?;

        let Value::Object(map) = value else {
            return Err(GatewayError::Decode(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        };

        if self.strict_gateway_errors {
            check_gateway_code(&map)?;
        }
        Ok(map)
    }
}

/// Fails when a `code` field is present and is not the success sentinel.
/// Responses without `code` pass.
fn check_gateway_code(map: &GatewayResponse) -> Result<()> {
    let Some(raw) = map.get("code") else {
        return Ok(());
    };

    let code = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match code {
        Some(GATEWAY_SUCCESS_CODE) => Ok(()),
        other => Err(GatewayError::Gateway {
            code: other.unwrap_or(-1),
            message: error_message(map),
        }),
    }
}

fn error_message(map: &GatewayResponse) -> String {
    ["message", "msg"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .unwrap_or("unknown gateway error")
        .to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_decode_object() {
        let decoder = ResponseDecoder::default();
        let map = decoder
            .decode(br#"{"code":200,"data":[{"coinType":"62"}],"ok":true,"none":null}"#)
            .unwrap();
        assert_eq!(map["code"], 200);
        assert!(map["data"].is_array());
        assert_eq!(map["ok"], true);
        assert!(map["none"].is_null());
    }

    #[rstest]
    #[case(b"not json".as_slice())]
    #[case(b"[1,2,3]".as_slice())]
    #[case(b"\"text\"".as_slice())]
    #[case(b"".as_slice())]
    fn test_decode_rejects_non_objects(#[case] bytes: &[u8]) {
        let err = ResponseDecoder::default().decode(bytes).unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)), "{err:?}");
    }

    #[test]
    fn test_lenient_mode_ignores_error_codes() {
        let map = ResponseDecoder::new(false)
            .decode(br#"{"code":500,"message":"boom"}"#)
            .unwrap();
        assert_eq!(map["code"], 500);
    }

    #[test]
    fn test_strict_mode_surfaces_gateway_error() {
        let err = ResponseDecoder::new(true)
            .decode(br#"{"code":1001,"message":"merchant disabled"}"#)
            .unwrap_err();
        match err {
            GatewayError::Gateway { code, message } => {
                assert_eq!(code, 1001);
                assert_eq!(message, "merchant disabled");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case(br#"{"code":200,"data":{}}"#.as_slice())]
    #[case(br#"{"code":"200"}"#.as_slice())]
    #[case(br#"{"data":{}}"#.as_slice())]
    fn test_strict_mode_accepts_success_or_missing_code(#[case] bytes: &[u8]) {
        assert!(ResponseDecoder::new(true).decode(bytes).is_ok());
    }

    #[test]
    fn test_strict_mode_falls_back_to_msg_field() {
        let err = ResponseDecoder::new(true)
            .decode(br#"{"code":"E1","msg":"bad sign"}"#)
            .unwrap_err();
        match err {
            GatewayError::Gateway { code, message } => {
                assert_eq!(code, -1);
                assert_eq!(message, "bad sign");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
