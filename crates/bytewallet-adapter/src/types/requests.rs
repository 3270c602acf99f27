/*
[INPUT]:  Merchant endpoint parameters
[OUTPUT]: Serializable business bodies for each gateway method
[POS]:    Data layer - request payloads (signed after encoding)
[UPDATE]: When endpoint parameters change
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportCoinsRequest {
    pub merchant_id: String,
    pub show_balance: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub merchant_id: String,
    pub main_coin_type: String,
    pub call_url: String,
    /// Defaults to the merchant's main wallet when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Body shared by check-address and exist-address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressQueryRequest {
    pub merchant_id: String,
    pub main_coin_type: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    pub merchant_id: String,
    pub main_coin_type: String,
    pub coin_type: String,
    pub address: String,
    /// Must be unique per merchant
    pub business_id: String,
    #[serde(serialize_with = "serialize_exact_amount")]
    pub amount: Decimal,
    pub call_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Write the amount as a bare JSON number with the decimal's own digits.
///
/// Going through `f64` would round past ~15 significant digits.
fn serialize_exact_amount<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let raw = RawValue::from_string(amount.to_string()).map_err(serde::ser::Error::custom)?;
    raw.serialize(serializer)
}

/// Caller-facing withdrawal parameters; merchant id and callback URL come from credentials
#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawParams {
    pub business_id: String,
    pub main_coin_type: String,
    pub coin_type: String,
    pub address: String,
    pub amount: Decimal,
    pub memo: Option<String>,
}
