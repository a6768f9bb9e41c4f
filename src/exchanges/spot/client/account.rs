use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::spot::rest::SpotRest;
use crate::exchanges::spot::types::{InnerToType, TransferRequest, WithdrawRequest};
use rust_decimal::Decimal;
use serde_json::Value;

/// Spot account endpoints (private, MD5-signed).
#[derive(Debug, Clone)]
pub struct SpotAccount<R: RestClient> {
    rest: SpotRest<R>,
}

impl<R: RestClient + Clone> SpotAccount<R> {
    pub(crate) fn new(rest: &R) -> Self {
        Self {
            rest: SpotRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> SpotAccount<R> {
    /// Available balances per currency.
    pub async fn balances(&self) -> Result<Value, ExchangeError> {
        self.rest.private("returnBalances", &[]).await
    }

    /// Balances including frozen amounts.
    pub async fn complete_balances(&self) -> Result<Value, ExchangeError> {
        self.rest.private("returnCompleteBalances", &[]).await
    }

    /// Deposit address for a currency on a given chain.
    ///
    /// `symbol_id` is the exchange's numeric currency ID (e.g. "50" for BTC).
    pub async fn deposit_address(
        &self,
        symbol_id: &str,
        chain: &str,
    ) -> Result<Value, ExchangeError> {
        let params = vec![
            ("symbolId".to_string(), symbol_id.to_string()),
            ("chain".to_string(), chain.to_string()),
        ];
        self.rest.private("returnDepositAddresses", &params).await
    }

    /// Deposit and withdrawal history for a currency.
    pub async fn deposit_history(
        &self,
        symbol: &str,
        deposit_number: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let mut params = vec![("symbol".to_string(), symbol.to_string())];
        if let Some(deposit_number) = deposit_number {
            params.push(("depositNumber".to_string(), deposit_number.to_string()));
        }
        self.rest.private("returnDepositsWithdrawals", &params).await
    }

    pub async fn withdraw(&self, request: &WithdrawRequest) -> Result<Value, ExchangeError> {
        self.rest.private("doWithdraw", &request.to_params()).await
    }

    pub async fn cancel_withdraw(&self, withdraw_id: &str) -> Result<Value, ExchangeError> {
        let params = vec![("id".to_string(), withdraw_id.to_string())];
        self.rest.private("cancelWithdraw", &params).await
    }

    /// Move funds between the wealth and spot accounts.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<Value, ExchangeError> {
        self.rest
            .private("spotWealthTransfer", &request.to_params())
            .await
    }

    /// Transfer to another user by ID, phone number or email.
    pub async fn internal_transfer(
        &self,
        currency: &str,
        amount: Decimal,
        address: &str,
        chain: &str,
        inner_to_type: InnerToType,
    ) -> Result<Value, ExchangeError> {
        self.withdraw(&WithdrawRequest::internal(
            currency,
            amount,
            address,
            chain,
            inner_to_type,
        ))
        .await
    }
}
