use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::spot::rest::SpotRest;
use serde_json::Value;

/// Spot market data endpoints (public).
#[derive(Debug, Clone)]
pub struct SpotMarket<R: RestClient> {
    rest: SpotRest<R>,
}

impl<R: RestClient + Clone> SpotMarket<R> {
    pub(crate) fn new(rest: &R) -> Self {
        Self {
            rest: SpotRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> SpotMarket<R> {
    /// Ticker for one pair, or all pairs when `symbol` is `None`.
    pub async fn ticker(&self, symbol: Option<&str>) -> Result<Value, ExchangeError> {
        let mut params = Vec::new();
        if let Some(symbol) = symbol {
            params.push(("symbol".to_string(), symbol.to_string()));
        }
        self.rest.public("returnTicker", &params).await
    }

    /// Order book; only depths of 5 and 20 are supported.
    pub async fn order_book(&self, symbol: &str, depth: u32) -> Result<Value, ExchangeError> {
        let depth = if depth == 20 { 20 } else { 5 };
        let params = vec![
            ("symbol".to_string(), symbol.to_string()),
            ("size".to_string(), depth.to_string()),
        ];
        self.rest.public("returnOrderBook", &params).await
    }

    /// Recent public trades, optionally bounded by millisecond timestamps.
    pub async fn trade_history(
        &self,
        symbol: &str,
        start: Option<i64>,
        end: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let mut params = vec![("symbol".to_string(), symbol.to_string())];
        if let Some(start) = start {
            params.push(("start".to_string(), start.to_string()));
        }
        if let Some(end) = end {
            params.push(("end".to_string(), end.to_string()));
        }
        self.rest.public("returnTradeHistory", &params).await
    }

    /// All listed trading pairs.
    pub async fn symbols(&self) -> Result<Value, ExchangeError> {
        self.rest.public("returnSymbol", &[]).await
    }

    /// All listed currencies.
    pub async fn currencies(&self) -> Result<Value, ExchangeError> {
        self.rest.public("returnCurrencies", &[]).await
    }

    /// 24-hour volume statistics.
    pub async fn volume_24h(&self) -> Result<Value, ExchangeError> {
        self.rest.public("return24hVolume", &[]).await
    }

    /// Candlestick data. `period_secs` is the candle width in seconds
    /// (60, 300, 900, 1800, 7200, 14400, ...).
    pub async fn klines(
        &self,
        symbol: &str,
        period_secs: u32,
        start: Option<i64>,
        end: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        // The chart endpoint keys the pair as currencyPair, unlike the rest
        // of the public commands.
        let mut params = vec![
            ("currencyPair".to_string(), symbol.to_string()),
            ("period".to_string(), period_secs.to_string()),
        ];
        if let Some(start) = start {
            params.push(("start".to_string(), start.to_string()));
        }
        if let Some(end) = end {
            params.push(("end".to_string(), end.to_string()));
        }
        self.rest.public("returnChartData", &params).await
    }

    pub async fn server_time(&self) -> Result<Value, ExchangeError> {
        self.rest.public("returnServerTime", &[]).await
    }
}
