/*
[INPUT]:  Form fields and inner JSON posted by the gateway
[OUTPUT]: Inbound callback envelope and typed callback body
[POS]:    Data layer - inbound notification payloads
[UPDATE]: When callback fields change
*/

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Signed callback as posted by the gateway (form-encoded).
///
/// Missing fields decode as empty strings so they fail verification
/// instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundCallback {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    pub sign: String,
}

/// Parsed callback `body`.
///
/// Only `tradeType` and `status` drive dispatch; everything else
/// (amount, address, businessId, ...) is kept in `extra` for handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackBody {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub trade_type: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub status: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

impl CallbackBody {
    /// Parse a callback body; a JSON `null` yields the all-zero body
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        let body: Option<Self> = serde_json::from_str(json)?;
        Ok(body.unwrap_or_default())
    }

    /// Look up a business field such as `businessId` or `amount`
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    pub fn business_id(&self) -> Option<&str> {
        self.field("businessId").and_then(Value::as_str)
    }

    pub fn address(&self) -> Option<&str> {
        self.field("address").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_body_keeps_extra_fields() {
        let body: CallbackBody = serde_json::from_str(
            r#"{"tradeType":2,"status":3,"businessId":"sn00001","amount":"10","address":"TEpK"}"#,
        )
        .unwrap();
        assert_eq!(body.trade_type, 2);
        assert_eq!(body.status, 3);
        assert_eq!(body.business_id(), Some("sn00001"));
        assert_eq!(body.address(), Some("TEpK"));
        assert_eq!(body.field("amount"), Some(&Value::from("10")));
        assert!(body.field("tradeType").is_none());
    }

    #[test]
    fn test_callback_body_defaults_missing_codes() {
        let body: CallbackBody = serde_json::from_str(r#"{"amount":1}"#).unwrap();
        assert_eq!(body.trade_type, 0);
        assert_eq!(body.status, 0);
    }

    #[test]
    fn test_callback_body_rejects_non_object() {
        assert!(serde_json::from_str::<CallbackBody>("[1,2]").is_err());
        assert!(serde_json::from_str::<CallbackBody>(r#"{"tradeType":"x"}"#).is_err());
    }

    #[test]
    fn test_null_codes_and_null_body_read_as_zero() {
        let body = CallbackBody::parse(r#"{"tradeType":null,"status":null,"amount":"1"}"#).unwrap();
        assert_eq!(body.trade_type, 0);
        assert_eq!(body.status, 0);
        assert_eq!(body.field("amount"), Some(&Value::from("1")));

        assert_eq!(CallbackBody::parse("null").unwrap(), CallbackBody::default());
        assert!(CallbackBody::parse("not json").is_err());
        assert!(CallbackBody::parse(r#"{"status":"3"}"#).is_err());
    }
}
