use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::{message_text, WsCodec, WsFrame};
use serde_json::{json, Value};
use tokio_tungstenite::tungstenite::Message;

/// Codec for the spot WebSocket stream.
///
/// Subscriptions are `{"event":"sub","params":{...}}` frames; the login ack
/// arrives on the `login` channel with the result nested under `data`.
pub struct SpotCodec;

fn field<'a>(params: &'a Value, key: &str) -> &'a str {
    params.get(key).and_then(Value::as_str).unwrap_or("unknown")
}

impl WsCodec for SpotCodec {
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
        let pair_code = params
            .get("pairCode")
            .and_then(Value::as_str)
            .unwrap_or("all");
        format!("{}:{}:{}", field(params, "biz"), field(params, "type"), pair_code)
    }

    fn decode(&self, message: Message) -> Result<Option<WsFrame>, ExchangeError> {
        let Some(text) = message_text(message)? else {
            return Ok(None);
        };

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to parse frame: {}", e))
        })?;

        if value.get("channel").and_then(Value::as_str) == Some("login") {
            let success = value
                .pointer("/data/result")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let message = value
                .pointer("/data/msg")
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
        let codec = SpotCodec;
        let params = json!({"biz": "exchange", "type": "ticker", "pairCode": "BTC-USDT"});

        let message = codec.encode_subscribe(&params).unwrap();
        let Message::Text(text) = message else {
            panic!("expected text message");
        };
        let frame: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(frame["event"], "sub");
        assert_eq!(frame["params"]["type"], "ticker");
        assert_eq!(frame["params"]["pairCode"], "BTC-USDT");
    }

    #[test]
    fn test_encode_unsubscribe_mirrors_subscribe() {
        let codec = SpotCodec;
        let params = json!({"biz": "exchange", "type": "depth_snapshot", "pairCode": "78"});

        let Message::Text(text) = codec.encode_unsubscribe(&params).unwrap() else {
            panic!("expected text message");
        };
        let frame: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(frame["event"], "unsub");
        assert_eq!(frame["params"], params);
    }

    #[test]
    fn test_encode_login_frame() {
        let codec = SpotCodec;
        let Message::Text(text) = codec.encode_login("key", "secret").unwrap() else {
            panic!("expected text message");
        };
        let frame: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(frame["event"], "login");
        assert_eq!(frame["params"]["api_key"], "key");
        assert_eq!(frame["params"]["passphrase"], "secret");
    }

    #[test]
    fn test_channel_key() {
        let codec = SpotCodec;
        let params = json!({"biz": "exchange", "type": "ticker", "pairCode": "78"});
        assert_eq!(codec.channel_key(&params), "exchange:ticker:78");

        let params = json!({"biz": "exchange", "type": "candles"});
        assert_eq!(codec.channel_key(&params), "exchange:candles:all");
    }

    #[test]
    fn test_decode_login_ack() {
        let codec = SpotCodec;
        let ack = r#"{"channel":"login","data":{"result":true}}"#;

        let frame = codec.decode(Message::Text(ack.to_string())).unwrap();
        assert!(matches!(
            frame,
            Some(WsFrame::LoginAck { success: true, .. })
        ));

        let rejected = r#"{"channel":"login","data":{"result":false,"msg":"bad key"}}"#;
        let frame = codec.decode(Message::Text(rejected.to_string())).unwrap();
        match frame {
            Some(WsFrame::LoginAck { success, message }) => {
                assert!(!success);
                assert_eq!(message, "bad key");
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn test_decode_data_frame() {
        let codec = SpotCodec;
        let data = r#"{"biz":"exchange","type":"ticker","data":{"last":"60000"}}"#;

        let frame = codec.decode(Message::Text(data.to_string())).unwrap();
        match frame {
            Some(WsFrame::Data(value)) => assert_eq!(value["data"]["last"], "60000"),
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_frame_is_error() {
        let codec = SpotCodec;
        assert!(codec.decode(Message::Text("not json".to_string())).is_err());
    }
}
