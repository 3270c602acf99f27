/*
[INPUT]:  Gateway method paths and callback codes
[OUTPUT]: Typed Rust enums for endpoints, body encodings and callback states
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the gateway adds endpoints or callback states
*/

use serde::{Deserialize, Serialize};

use crate::http::Result;

/// Merchant endpoints exposed by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayMethod {
    SupportCoins,
    CreateAddress,
    CheckAddress,
    ExistAddress,
    Withdraw,
}

/// How a business body is serialized before signing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// `{...}`
    Object,
    /// `[{...}]`
    WrappedArray,
}

/// Per-method body encoding. Only support-coins sends a bare object.
const BODY_ENCODINGS: [(GatewayMethod, BodyEncoding); 5] = [
    (GatewayMethod::SupportCoins, BodyEncoding::Object),
    (GatewayMethod::CreateAddress, BodyEncoding::WrappedArray),
    (GatewayMethod::CheckAddress, BodyEncoding::WrappedArray),
    (GatewayMethod::ExistAddress, BodyEncoding::WrappedArray),
    (GatewayMethod::Withdraw, BodyEncoding::WrappedArray),
];

impl GatewayMethod {
    pub const ALL: [GatewayMethod; 5] = [
        GatewayMethod::SupportCoins,
        GatewayMethod::CreateAddress,
        GatewayMethod::CheckAddress,
        GatewayMethod::ExistAddress,
        GatewayMethod::Withdraw,
    ];

    /// Path appended to the gateway base URL
    pub fn path(self) -> &'static str {
        match self {
            GatewayMethod::SupportCoins => "/mch/support-coins",
            GatewayMethod::CreateAddress => "/mch/address/create",
            GatewayMethod::CheckAddress => "/mch/check/address",
            GatewayMethod::ExistAddress => "/mch/exist/address",
            GatewayMethod::Withdraw => "/mch/withdraw",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.path() == path)
    }

    pub fn body_encoding(self) -> BodyEncoding {
        BODY_ENCODINGS
            .iter()
            .find(|(method, _)| *method == self)
            .map(|(_, encoding)| *encoding)
            .unwrap_or(BodyEncoding::WrappedArray)
    }
}

impl BodyEncoding {
    /// Serialize the business body into the string that gets signed
    pub fn encode<T: Serialize + ?Sized>(self, body: &T) -> Result<String> {
        let encoded = match self {
            BodyEncoding::Object => serde_json::to_string(body)?,
            BodyEncoding::WrappedArray => serde_json::to_string(&[body])?,
        };
        Ok(encoded)
    }
}

/// Callback classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    Deposit,
    Withdrawal,
}

impl TradeType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(TradeType::Deposit),
            2 => Some(TradeType::Withdrawal),
            _ => None,
        }
    }
}

/// Withdrawal lifecycle reported through callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawalStatus {
    PendingReview,
    ReviewApproved,
    ReviewRejected,
    Completed,
    Failed,
}

impl WithdrawalStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(WithdrawalStatus::PendingReview),
            1 => Some(WithdrawalStatus::ReviewApproved),
            2 => Some(WithdrawalStatus::ReviewRejected),
            3 => Some(WithdrawalStatus::Completed),
            4 => Some(WithdrawalStatus::Failed),
            _ => None,
        }
    }
}

/// Deposit status code that triggers crediting
pub const DEPOSIT_COMPLETED_STATUS: i64 = 3;
