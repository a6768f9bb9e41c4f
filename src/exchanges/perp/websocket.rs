use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{WsClient, WsConfig, WsCredentials, WsEvent};
use crate::exchanges::perp::codec::PerpCodec;
use tokio::sync::mpsc;

pub const PERP_WS_URL: &str = "wss://ws.futurescw.com/perpum";

/// Channel parameter builders for the futures stream.
///
/// Public channels carry the instrument's base currency as `pairCode`;
/// private channels cover the whole account and need the login handshake.
pub mod channels {
    use serde_json::{json, Value};

    pub fn ticker(pair_code: &str) -> Value {
        json!({"biz": "futures", "type": "ticker_swap", "pairCode": pair_code})
    }

    pub fn depth(pair_code: &str) -> Value {
        json!({"biz": "futures", "type": "depth", "pairCode": pair_code})
    }

    pub fn fills(pair_code: &str) -> Value {
        json!({"biz": "futures", "type": "fills", "pairCode": pair_code})
    }

    pub fn candles(pair_code: &str, interval: &str) -> Value {
        json!({
            "biz": "futures",
            "type": "candles_swap",
            "pairCode": pair_code,
            "interval": interval,
        })
    }

    pub fn candles_utc(pair_code: &str, interval: &str) -> Value {
        json!({
            "biz": "futures",
            "type": "candles_swap_utc",
            "pairCode": pair_code,
            "interval": interval,
        })
    }

    pub fn index_price(pair_code: &str) -> Value {
        json!({"biz": "futures", "type": "index_price", "pairCode": pair_code})
    }

    pub fn mark_price(pair_code: &str) -> Value {
        json!({"biz": "futures", "type": "mark_price", "pairCode": pair_code})
    }

    pub fn funding_rate(pair_code: &str) -> Value {
        json!({"biz": "futures", "type": "funding_rate", "pairCode": pair_code})
    }

    pub fn orders() -> Value {
        json!({"biz": "futures", "type": "order"})
    }

    pub fn positions() -> Value {
        json!({"biz": "futures", "type": "position"})
    }

    pub fn position_changes() -> Value {
        json!({"biz": "futures", "type": "position_change"})
    }

    pub fn assets() -> Value {
        json!({"biz": "futures", "type": "assets"})
    }

    pub fn almighty_gold_assets() -> Value {
        json!({"biz": "futures", "type": "assets_ag"})
    }

    pub fn user_settings() -> Value {
        json!({"biz": "futures", "type": "user_setting"})
    }
}

/// Connect to the futures WebSocket stream.
pub async fn connect(
    config: &ExchangeConfig,
    ws_config: WsConfig,
) -> Result<(WsClient, mpsc::Receiver<WsEvent>), ExchangeError> {
    connect_with_url(PERP_WS_URL, config, ws_config).await
}

/// Connect to a non-default futures WebSocket endpoint.
pub async fn connect_with_url(
    url: &str,
    config: &ExchangeConfig,
    ws_config: WsConfig,
) -> Result<(WsClient, mpsc::Receiver<WsEvent>), ExchangeError> {
    let credentials = config.has_credentials().then(|| WsCredentials {
        api_key: config.api_key().to_string(),
        passphrase: config.secret_key().to_string(),
    });

    WsClient::connect(url, "perp", PerpCodec, credentials, ws_config).await
}
