use crate::core::errors::ExchangeError;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Order side; serialized as `"0"` (buy) / `"1"` (sell) on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            Self::Buy => "0",
            Self::Sell => "1",
        }
    }
}

impl FromStr for OrderSide {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(ExchangeError::InvalidParameter(format!(
                "side must be 'buy' or 'sell', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotOrderType {
    Limit,
    Market,
}

/// A spot order for the `doTrade` command.
#[derive(Debug, Clone)]
pub struct SpotOrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: SpotOrderType,
    /// Quantity in base currency; required for limit orders and market sells.
    pub amount: Option<Decimal>,
    /// Price; required for limit orders.
    pub price: Option<Decimal>,
    /// Quote-currency spend; required for market buys.
    pub funds: Option<Decimal>,
    pub client_order_id: Option<String>,
}

impl SpotOrderRequest {
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: SpotOrderType::Limit,
            amount: Some(amount),
            price: Some(price),
            funds: None,
            client_order_id: None,
        }
    }

    pub fn market_buy(symbol: impl Into<String>, funds: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side: OrderSide::Buy,
            order_type: SpotOrderType::Market,
            amount: None,
            price: None,
            funds: Some(funds),
            client_order_id: None,
        }
    }

    pub fn market_sell(symbol: impl Into<String>, amount: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side: OrderSide::Sell,
            order_type: SpotOrderType::Market,
            amount: Some(amount),
            price: None,
            funds: None,
            client_order_id: None,
        }
    }

    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.client_order_id = Some(client_order_id.into());
        self
    }

    /// Reject invalid side/type/field combinations before any network call.
    pub fn validate(&self) -> Result<(), ExchangeError> {
        match self.order_type {
            SpotOrderType::Limit => {
                if self.amount.is_none() || self.price.is_none() {
                    return Err(ExchangeError::InvalidParameter(
                        "limit orders require amount and price".to_string(),
                    ));
                }
            }
            SpotOrderType::Market => match self.side {
                OrderSide::Buy => {
                    if self.funds.is_none() {
                        return Err(ExchangeError::InvalidParameter(
                            "market buys require funds".to_string(),
                        ));
                    }
                }
                OrderSide::Sell => {
                    if self.amount.is_none() {
                        return Err(ExchangeError::InvalidParameter(
                            "market sells require amount".to_string(),
                        ));
                    }
                }
            },
        }
        Ok(())
    }

    /// Wire-format request parameters.
    pub fn to_params(&self) -> Result<Vec<(String, String)>, ExchangeError> {
        self.validate()?;

        let is_market = self.order_type == SpotOrderType::Market;
        let mut params = vec![
            ("symbol".to_string(), self.symbol.clone()),
            ("type".to_string(), self.side.as_wire().to_string()),
            ("isMarket".to_string(), is_market.to_string()),
        ];

        match (self.order_type, self.side) {
            (SpotOrderType::Limit, _) => {
                if let (Some(amount), Some(price)) = (self.amount, self.price) {
                    params.push(("amount".to_string(), amount.to_string()));
                    params.push(("rate".to_string(), price.to_string()));
                }
            }
            (SpotOrderType::Market, OrderSide::Buy) => {
                if let Some(funds) = self.funds {
                    params.push(("funds".to_string(), funds.to_string()));
                }
            }
            (SpotOrderType::Market, OrderSide::Sell) => {
                if let Some(amount) = self.amount {
                    params.push(("amount".to_string(), amount.to_string()));
                }
            }
        }

        if let Some(client_order_id) = &self.client_order_id {
            params.push(("out_trade_no".to_string(), client_order_id.clone()));
        }

        Ok(params)
    }
}

/// Filter for `getUserTrades` order history queries.
#[derive(Debug, Clone, Default)]
pub struct SpotOrderHistoryFilter {
    pub symbol: Option<String>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    /// Page size; clamped to 1..=100.
    pub limit: Option<u32>,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl SpotOrderHistoryFilter {
    /// Wire-format request parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(symbol) = &self.symbol {
            params.push(("symbol".to_string(), symbol.clone()));
        }
        if let Some(start_at) = self.start_at {
            params.push(("startAt".to_string(), start_at.to_string()));
        }
        if let Some(end_at) = self.end_at {
            params.push(("endAt".to_string(), end_at.to_string()));
        }
        if let Some(limit) = self.limit {
            let limit = limit.clamp(1, 100);
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(before) = &self.before {
            params.push(("before".to_string(), before.clone()));
        }
        if let Some(after) = &self.after {
            params.push(("after".to_string(), after.clone()));
        }
        params
    }
}

/// Withdrawal kind for `doWithdraw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawType {
    /// On-chain withdrawal to a blockchain address.
    Ordinary,
    /// Transfer to another user by ID, phone number or email.
    InternalTransfer,
}

impl WithdrawType {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            Self::Ordinary => "ordinary_withdraw",
            Self::InternalTransfer => "internal_transfer",
        }
    }
}

/// Address kind for internal transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerToType {
    UserId = 1,
    Phone = 2,
    Email = 3,
}

#[derive(Debug, Clone)]
pub struct WithdrawRequest {
    pub currency: String,
    pub amount: Decimal,
    /// Blockchain address, or user ID/phone/email for internal transfers.
    pub address: String,
    pub chain: String,
    pub memo: Option<String>,
    pub withdraw_type: WithdrawType,
    pub inner_to_type: Option<InnerToType>,
}

impl WithdrawRequest {
    pub fn ordinary(
        currency: impl Into<String>,
        amount: Decimal,
        address: impl Into<String>,
        chain: impl Into<String>,
    ) -> Self {
        Self {
            currency: currency.into(),
            amount,
            address: address.into(),
            chain: chain.into(),
            memo: None,
            withdraw_type: WithdrawType::Ordinary,
            inner_to_type: None,
        }
    }

    pub fn internal(
        currency: impl Into<String>,
        amount: Decimal,
        address: impl Into<String>,
        chain: impl Into<String>,
        inner_to_type: InnerToType,
    ) -> Self {
        Self {
            currency: currency.into(),
            amount,
            address: address.into(),
            chain: chain.into(),
            memo: None,
            withdraw_type: WithdrawType::InternalTransfer,
            inner_to_type: Some(inner_to_type),
        }
    }

    /// Wire-format request parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("currency".to_string(), self.currency.clone()),
            ("amount".to_string(), self.amount.to_string()),
            ("address".to_string(), self.address.clone()),
            ("chain".to_string(), self.chain.clone()),
            (
                "memo".to_string(),
                self.memo.clone().unwrap_or_else(|| "None".to_string()),
            ),
            ("type".to_string(), self.withdraw_type.as_wire().to_string()),
        ];

        if self.withdraw_type == WithdrawType::InternalTransfer {
            if let Some(inner_to_type) = self.inner_to_type {
                params.push(("innerToType".to_string(), (inner_to_type as i32).to_string()));
            }
        }

        params
    }
}

/// Account kinds for `spotWealthTransfer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Wealth,
    Spot,
}

impl AccountType {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            Self::Wealth => "WEALTH",
            Self::Spot => "SPOT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    WealthToSpot,
    SpotToWealth,
}

impl TransferDirection {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            Self::WealthToSpot => "WEALTH_TO_SPOT",
            Self::SpotToWealth => "SPOT_TO_WEALTH",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub account_type: AccountType,
    pub target_account_type: AccountType,
    pub direction: TransferDirection,
    pub coin_code: String,
    pub amount: Decimal,
}

impl TransferRequest {
    /// Wire-format request parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        vec![
            (
                "accountType".to_string(),
                self.account_type.as_wire().to_string(),
            ),
            (
                "targetAccountType".to_string(),
                self.target_account_type.as_wire().to_string(),
            ),
            ("bizType".to_string(), self.direction.as_wire().to_string()),
            ("coinCode".to_string(), self.coin_code.clone()),
            ("amount".to_string(), self.amount.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_limit_order_params() {
        let order = SpotOrderRequest::limit(
            "BTC_USDT",
            OrderSide::Buy,
            Decimal::new(5, 1),
            Decimal::from(60000),
        );
        let params = order.to_params().unwrap();

        assert!(params.contains(&("symbol".to_string(), "BTC_USDT".to_string())));
        assert!(params.contains(&("type".to_string(), "0".to_string())));
        assert!(params.contains(&("isMarket".to_string(), "false".to_string())));
        assert!(params.contains(&("amount".to_string(), "0.5".to_string())));
        assert!(params.contains(&("rate".to_string(), "60000".to_string())));
    }

    #[test]
    fn test_market_buy_requires_funds() {
        let order = SpotOrderRequest {
            symbol: "BTC_USDT".to_string(),
            side: OrderSide::Buy,
            order_type: SpotOrderType::Market,
            amount: None,
            price: None,
            funds: None,
            client_order_id: None,
        };
        assert!(matches!(
            order.validate().unwrap_err(),
            ExchangeError::InvalidParameter(_)
        ));
    }

    #[test]
    fn test_market_sell_uses_amount() {
        let order = SpotOrderRequest::market_sell("BTC_USDT", Decimal::ONE);
        let params = order.to_params().unwrap();

        assert!(params.contains(&("type".to_string(), "1".to_string())));
        assert!(params.contains(&("isMarket".to_string(), "true".to_string())));
        assert!(params.contains(&("amount".to_string(), "1".to_string())));
        assert!(!params.iter().any(|(k, _)| k == "funds"));
    }

    #[test]
    fn test_limit_order_missing_price_rejected() {
        let order = SpotOrderRequest {
            symbol: "BTC_USDT".to_string(),
            side: OrderSide::Sell,
            order_type: SpotOrderType::Limit,
            amount: Some(Decimal::ONE),
            price: None,
            funds: None,
            client_order_id: None,
        };
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_invalid_side_string_rejected() {
        assert!(matches!(
            "hold".parse::<OrderSide>().unwrap_err(),
            ExchangeError::InvalidParameter(_)
        ));
    }

    #[test]
    fn test_history_filter_clamps_limit() {
        let filter = SpotOrderHistoryFilter {
            limit: Some(500),
            ..Default::default()
        };
        let params = filter.to_params();
        assert!(params.contains(&("limit".to_string(), "100".to_string())));
    }

    #[test]
    fn test_internal_withdraw_params() {
        let request = WithdrawRequest::internal(
            "USDT",
            Decimal::from(25),
            "user@example.com",
            "TRC20",
            InnerToType::Email,
        );
        let params = request.to_params();

        assert!(params.contains(&("type".to_string(), "internal_transfer".to_string())));
        assert!(params.contains(&("innerToType".to_string(), "3".to_string())));
        assert!(params.contains(&("memo".to_string(), "None".to_string())));
    }
}
