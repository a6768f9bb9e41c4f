use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::spot::rest::SpotRest;
use crate::exchanges::spot::types::{
    OrderSide, SpotOrderHistoryFilter, SpotOrderRequest,
};
use rust_decimal::Decimal;
use serde_json::Value;

/// Spot trading endpoints (private, MD5-signed).
#[derive(Debug, Clone)]
pub struct SpotTrading<R: RestClient> {
    rest: SpotRest<R>,
}

impl<R: RestClient + Clone> SpotTrading<R> {
    pub(crate) fn new(rest: &R) -> Self {
        Self {
            rest: SpotRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> SpotTrading<R> {
    /// Place an order. Invalid side/type/field combinations are rejected
    /// before any network call.
    pub async fn place_order(&self, order: &SpotOrderRequest) -> Result<Value, ExchangeError> {
        let params = order.to_params()?;
        self.rest.private("doTrade", &params).await
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Value, ExchangeError> {
        let params = vec![("orderNumber".to_string(), order_id.to_string())];
        self.rest.private("cancelOrder", &params).await
    }

    /// Cancel every open order, optionally restricted to one pair.
    pub async fn cancel_all_orders(&self, symbol: Option<&str>) -> Result<Value, ExchangeError> {
        let mut params = Vec::new();
        if let Some(symbol) = symbol {
            params.push(("currencyPair".to_string(), symbol.to_string()));
        }
        self.rest.private("cancelAllOrder", &params).await
    }

    /// Fills belonging to one order.
    pub async fn order_trades(&self, order_id: &str) -> Result<Value, ExchangeError> {
        let params = vec![("orderNumber".to_string(), order_id.to_string())];
        self.rest.private("returnOrderTrades", &params).await
    }

    pub async fn order_status(&self, order_id: &str) -> Result<Value, ExchangeError> {
        let params = vec![("orderNumber".to_string(), order_id.to_string())];
        self.rest.private("returnOrderStatus", &params).await
    }

    pub async fn open_orders(
        &self,
        symbol: &str,
        start_at: Option<i64>,
        end_at: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let mut params = vec![("currencyPair".to_string(), symbol.to_string())];
        if let Some(start_at) = start_at {
            params.push(("startAt".to_string(), start_at.to_string()));
        }
        if let Some(end_at) = end_at {
            params.push(("endAt".to_string(), end_at.to_string()));
        }
        self.rest.private("returnOpenOrders", &params).await
    }

    /// The account's own fills on one pair.
    pub async fn trade_history(
        &self,
        symbol: &str,
        start_at: Option<i64>,
        end_at: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let mut params = vec![("currencyPair".to_string(), symbol.to_string())];
        if let Some(start_at) = start_at {
            params.push(("startAt".to_string(), start_at.to_string()));
        }
        if let Some(end_at) = end_at {
            params.push(("endAt".to_string(), end_at.to_string()));
        }
        self.rest.private("returnUTradeHistory", &params).await
    }

    pub async fn order_history(
        &self,
        filter: &SpotOrderHistoryFilter,
    ) -> Result<Value, ExchangeError> {
        self.rest.private("getUserTrades", &filter.to_params()).await
    }

    pub async fn buy_limit(
        &self,
        symbol: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<Value, ExchangeError> {
        self.place_order(&SpotOrderRequest::limit(symbol, OrderSide::Buy, amount, price))
            .await
    }

    pub async fn sell_limit(
        &self,
        symbol: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<Value, ExchangeError> {
        self.place_order(&SpotOrderRequest::limit(
            symbol,
            OrderSide::Sell,
            amount,
            price,
        ))
        .await
    }

    /// Market buy, sized in quote currency.
    pub async fn buy_market(&self, symbol: &str, funds: Decimal) -> Result<Value, ExchangeError> {
        self.place_order(&SpotOrderRequest::market_buy(symbol, funds))
            .await
    }

    /// Market sell, sized in base currency.
    pub async fn sell_market(&self, symbol: &str, amount: Decimal) -> Result<Value, ExchangeError> {
        self.place_order(&SpotOrderRequest::market_sell(symbol, amount))
            .await
    }
}
