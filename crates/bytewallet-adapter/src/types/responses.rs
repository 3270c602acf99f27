/*
[INPUT]:  Raw gateway responses
[OUTPUT]: Open JSON mapping returned by every endpoint
[POS]:    Data layer - response payloads
[UPDATE]: When typed views over responses are added
*/

use serde_json::{Map, Value};

/// Top-level JSON object returned by the gateway; shape varies per endpoint
pub type GatewayResponse = Map<String, Value>;

/// Success sentinel used by the gateway's `code` field
pub const GATEWAY_SUCCESS_CODE: i64 = 200;
