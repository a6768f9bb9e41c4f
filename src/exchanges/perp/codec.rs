use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::{message_text, WsCodec, WsFrame};
use serde_json::{json, Value};
use tokio_tungstenite::tungstenite::Message;

/// Codec for the futures WebSocket stream.
///
/// Same subscription grammar as spot, but the login ack is a top-level
/// `{"event":"login","success":...}` frame.
pub struct PerpCodec;

impl WsCodec for PerpCodec {
    fn encode_subscribe(&self, params: &Value) -> Result<Message, ExchangeError> {
        let frame = json!({ "event": "sub", "params": params });
        Ok(Message::Text(frame.to_string()))
    }

    fn encode_unsubscribe(&self, params: &Value) -> Result<Message, ExchangeError> {
        let frame = json!({ "event": "unsub", "params": params });
        Ok(Message::Text(frame.to_string()))
    }

    fn encode_login(&self, api_key: &str, passphrase: &str) -> Result<Message, ExchangeError> {
        let frame = json!({
            "event": "login",
            "params": {
                "api_key": api_key,
                "passphrase": passphrase,
            }
        });
        Ok(Message::Text(frame.to_string()))
    }

    fn channel_key(&self, params: &Value) -> String {
        let channel_type = params
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let pair_code = params
            .get("pairCode")
            .and_then(Value::as_str)
            .unwrap_or("all");
        format!("{}_{}", channel_type, pair_code)
    }

    fn decode(&self, message: Message) -> Result<Option<WsFrame>, ExchangeError> {
        let Some(text) = message_text(message)? else {
            return Ok(None);
        };

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to parse frame: {}", e))
        })?;

        if value.get("event").and_then(Value::as_str) == Some("login") {
            let success = match value.get("success") {
                Some(Value::Bool(b)) => *b,
                Some(Value::String(s)) => s == "true",
                _ => false,
            };
            let message = value
                .get("msg")
                .or_else(|| value.get("message"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Ok(Some(WsFrame::LoginAck { success, message }));
        }

        Ok(Some(WsFrame::Data(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_subscribe() {
        let codec = PerpCodec;
        let params = json!({"biz": "futures", "type": "ticker_swap", "pairCode": "BTC"});

        let Message::Text(text) = codec.encode_subscribe(&params).unwrap() else {
            panic!("expected text message");
        };
        let frame: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(frame["event"], "sub");
        assert_eq!(frame["params"]["biz"], "futures");
        assert_eq!(frame["params"]["pairCode"], "BTC");
    }

    #[test]
    fn test_encode_unsubscribe_mirrors_subscribe() {
        let codec = PerpCodec;
        let params = json!({"biz": "futures", "type": "depth", "pairCode": "BTC"});

        let Message::Text(text) = codec.encode_unsubscribe(&params).unwrap() else {
            panic!("expected text message");
        };
        let frame: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(frame["event"], "unsub");
        assert_eq!(frame["params"], params);
    }

    #[test]
    fn test_channel_key() {
        let codec = PerpCodec;
        assert_eq!(
            codec.channel_key(&json!({"biz": "futures", "type": "depth", "pairCode": "BTC"})),
            "depth_BTC"
        );
        assert_eq!(
            codec.channel_key(&json!({"biz": "futures", "type": "assets"})),
            "assets_all"
        );
    }

    #[test]
    fn test_decode_login_ack() {
        let codec = PerpCodec;

        let ok = r#"{"event":"login","success":true}"#;
        assert!(matches!(
            codec.decode(Message::Text(ok.to_string())).unwrap(),
            Some(WsFrame::LoginAck { success: true, .. })
        ));

        let rejected = r#"{"event":"login","success":false,"msg":"invalid key"}"#;
        match codec.decode(Message::Text(rejected.to_string())).unwrap() {
            Some(WsFrame::LoginAck { success, message }) => {
                assert!(!success);
                assert_eq!(message, "invalid key");
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn test_decode_data_frame() {
        let codec = PerpCodec;
        let data = r#"{"biz":"futures","type":"ticker_swap","data":{"last_price":60000}}"#;

        match codec.decode(Message::Text(data.to_string())).unwrap() {
            Some(WsFrame::Data(value)) => {
                assert_eq!(value["data"]["last_price"], 60000);
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_frame_is_error() {
        let codec = PerpCodec;
        assert!(codec.decode(Message::Text("{broken".to_string())).is_err());
    }

    #[test]
    fn test_control_messages_are_filtered() {
        let codec = PerpCodec;
        assert!(codec
            .decode(Message::Pong(Vec::new()))
            .unwrap()
            .is_none());
    }
}
