use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{WsClient, WsConfig, WsCredentials, WsEvent};
use crate::exchanges::spot::codec::SpotCodec;
use tokio::sync::mpsc;

pub const SPOT_WS_URL: &str = "wss://ws.futurescw.com";

/// Channel parameter builders for the spot stream.
pub mod channels {
    use serde_json::{json, Value};

    pub fn ticker(pair_code: &str) -> Value {
        json!({"biz": "exchange", "type": "ticker", "pairCode": pair_code})
    }

    pub fn depth_snapshot(pair_code: &str) -> Value {
        json!({"biz": "exchange", "type": "depth_snapshot", "pairCode": pair_code})
    }

    pub fn candles(pair_code: &str, interval: &str) -> Value {
        json!({
            "biz": "exchange",
            "type": "candles",
            "pairCode": pair_code,
            "interval": interval,
        })
    }

    pub fn fills(pair_code: &str) -> Value {
        json!({"biz": "exchange", "type": "fills", "pairCode": pair_code})
    }
}

/// Connect to the spot WebSocket stream.
///
/// Credentials from `config` are used for the private-channel login when
/// present; public subscriptions work without them.
pub async fn connect(
    config: &ExchangeConfig,
    ws_config: WsConfig,
) -> Result<(WsClient, mpsc::Receiver<WsEvent>), ExchangeError> {
    connect_with_url(SPOT_WS_URL, config, ws_config).await
}

/// Connect to a non-default spot WebSocket endpoint.
pub async fn connect_with_url(
    url: &str,
    config: &ExchangeConfig,
    ws_config: WsConfig,
) -> Result<(WsClient, mpsc::Receiver<WsEvent>), ExchangeError> {
    let credentials = config.has_credentials().then(|| WsCredentials {
        api_key: config.api_key().to_string(),
        passphrase: config.secret_key().to_string(),
    });

    WsClient::connect(url, "spot", SpotCodec, credentials, ws_config).await
}
