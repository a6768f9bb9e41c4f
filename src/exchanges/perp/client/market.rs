use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::perp::rest::PerpRest;
use crate::exchanges::perp::types::{Instrument, KlineGranularity, PerpTicker};
use serde_json::Value;

/// Futures market data endpoints.
///
/// Most are public; the ladder and public-trade-history endpoints require
/// authentication even though they serve market-wide data.
#[derive(Debug, Clone)]
pub struct PerpMarket<R: RestClient> {
    rest: PerpRest<R>,
}

impl<R: RestClient + Clone> PerpMarket<R> {
    pub(crate) fn new(rest: &R) -> Self {
        Self {
            rest: PerpRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> PerpMarket<R> {
    /// Contract metadata for one instrument, or all when `name` is `None`.
    pub async fn instruments(&self, name: Option<&str>) -> Result<Vec<Instrument>, ExchangeError> {
        let mut params = Vec::new();
        if let Some(name) = name {
            params.push(("name".to_string(), name.to_string()));
        }
        self.rest
            .get_data("/v1/perpum/instruments", &params, false)
            .await
    }

    /// Latest trading summary for one contract.
    pub async fn ticker(&self, instrument: &str) -> Result<PerpTicker, ExchangeError> {
        let params = vec![("instrument".to_string(), instrument.to_string())];
        self.rest
            .get_data("/v1/perpumPublic/ticker", &params, false)
            .await
    }

    /// Latest trading summaries for every contract.
    pub async fn tickers(&self) -> Result<Vec<PerpTicker>, ExchangeError> {
        self.rest
            .get_data("/v1/perpumPublic/ticker", &[], false)
            .await
    }

    /// Candlestick data. `limit` outside 1..=1500 falls back to 100.
    pub async fn klines(
        &self,
        currency_code: &str,
        granularity: KlineGranularity,
        limit: Option<u32>,
    ) -> Result<Value, ExchangeError> {
        let mut params = vec![
            ("currencyCode".to_string(), currency_code.to_string()),
            ("granularity".to_string(), granularity.as_code().to_string()),
        ];
        if let Some(limit) = limit {
            let limit = if (1..=1500).contains(&limit) { limit } else { 100 };
            params.push(("limit".to_string(), limit.to_string()));
        }
        self.rest
            .get("/v1/perpumPublic/klines", &params, false)
            .await
    }

    /// Funding rate applied at the most recent settlement.
    pub async fn last_funding_rate(&self, instrument: &str) -> Result<Value, ExchangeError> {
        let params = vec![("instrument".to_string(), instrument.to_string())];
        self.rest.get("/v1/perpum/fundingRate", &params, false).await
    }

    /// 20-level order book for a contract.
    pub async fn order_book(&self, base: &str) -> Result<Value, ExchangeError> {
        let params = vec![("base".to_string(), base.to_string())];
        self.rest.get("/v1/perpumPublic/depth", &params, false).await
    }

    /// Most recent public trades (last 20).
    pub async fn trades(&self, base: &str) -> Result<Value, ExchangeError> {
        let params = vec![("base".to_string(), base.to_string())];
        self.rest.get("/v1/perpumPublic/trades", &params, false).await
    }

    /// Tiered margin requirements for every contract. Authenticated.
    pub async fn ladders(&self) -> Result<Value, ExchangeError> {
        self.rest.get("/v1/perpum/ladders", &[], true).await
    }

    /// Paged public trade history. Authenticated.
    pub async fn public_trade_history(
        &self,
        instrument: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Value, ExchangeError> {
        let params = vec![
            ("instrument".to_string(), instrument.to_string()),
            ("page".to_string(), page.to_string()),
            ("pageSize".to_string(), page_size.to_string()),
        ];
        self.rest.get("/v1/perpum/orders/trades", &params, true).await
    }
}
