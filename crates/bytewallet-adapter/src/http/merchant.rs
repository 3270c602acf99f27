/*
[INPUT]:  Merchant endpoint parameters and client credentials
[OUTPUT]: Gateway responses for coin listing, addresses and withdrawals
[POS]:    HTTP layer - merchant endpoints (all signed)
[UPDATE]: When adding new endpoints or changing request bodies
*/

use crate::http::{GatewayClient, Result};
use crate::types::{
    AddressQueryRequest, CreateAddressRequest, GatewayMethod, GatewayResponse,
    SupportCoinsRequest, WithdrawParams, WithdrawRequest,
};

impl GatewayClient {
    /// List coins supported for this merchant
    ///
    /// POST /mch/support-coins
    pub async fn support_coins(&self, show_balance: bool) -> Result<GatewayResponse> {
        let body = SupportCoinsRequest {
            merchant_id: self.credentials().merchant_id.clone(),
            show_balance,
        };
        self.request(GatewayMethod::SupportCoins, &body).await
    }

    /// Create a deposit address; `wallet_id` defaults to the main wallet
    ///
    /// POST /mch/address/create
    pub async fn create_address(
        &self,
        main_coin_type: &str,
        wallet_id: Option<&str>,
        alias: Option<&str>,
    ) -> Result<GatewayResponse> {
        let body = CreateAddressRequest {
            merchant_id: self.credentials().merchant_id.clone(),
            main_coin_type: main_coin_type.to_string(),
            call_url: self.credentials().callback_url.clone(),
            wallet_id: wallet_id.map(str::to_string),
            alias: alias.map(str::to_string),
        };
        self.request(GatewayMethod::CreateAddress, &body).await
    }

    /// Validate an address for a coin
    ///
    /// POST /mch/check/address
    pub async fn check_address(&self, main_coin_type: &str, address: &str) -> Result<GatewayResponse> {
        let body = self.address_query(main_coin_type, address);
        self.request(GatewayMethod::CheckAddress, &body).await
    }

    /// Check whether an address belongs to this merchant
    ///
    /// POST /mch/exist/address
    pub async fn exist_address(&self, main_coin_type: &str, address: &str) -> Result<GatewayResponse> {
        let body = self.address_query(main_coin_type, address);
        self.request(GatewayMethod::ExistAddress, &body).await
    }

    /// Submit a withdrawal
    ///
    /// POST /mch/withdraw
    pub async fn withdraw(&self, params: WithdrawParams) -> Result<GatewayResponse> {
        let body = WithdrawRequest {
            merchant_id: self.credentials().merchant_id.clone(),
            main_coin_type: params.main_coin_type,
            coin_type: params.coin_type,
            address: params.address,
            business_id: params.business_id,
            amount: params.amount,
            call_url: self.credentials().callback_url.clone(),
            memo: params.memo,
        };
        self.request(GatewayMethod::Withdraw, &body).await
    }

    fn address_query(&self, main_coin_type: &str, address: &str) -> AddressQueryRequest {
        AddressQueryRequest {
            merchant_id: self.credentials().merchant_id.clone(),
            main_coin_type: main_coin_type.to_string(),
            address: address.to_string(),
        }
    }
}
