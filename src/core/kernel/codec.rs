use crate::core::errors::ExchangeError;
use serde_json::Value;
use tokio_tungstenite::tungstenite::Message;

/// A decoded inbound WebSocket frame.
#[derive(Debug, Clone)]
pub enum WsFrame {
    /// Authentication acknowledgment for a private-channel login.
    LoginAck { success: bool, message: String },
    /// Any other decoded payload, forwarded to the caller.
    Data(Value),
}

/// Codec trait for handling family-specific WebSocket message encoding/decoding
///
/// The two API families share the subscription grammar (`sub`/`unsub` events
/// carrying a `params` object, a `login` event for private channels) but
/// differ in how they acknowledge the login and how channel keys are derived.
/// Control frames (ping, pong, close) are handled at the transport level and
/// never reach the codec.
pub trait WsCodec: Send + Sync + 'static {
    /// Encode a subscription request for the given channel parameters.
    fn encode_subscribe(&self, params: &Value) -> Result<Message, ExchangeError>;

    /// Encode an unsubscription request for the given channel parameters.
    fn encode_unsubscribe(&self, params: &Value) -> Result<Message, ExchangeError>;

    /// Encode the private-channel login frame.
    fn encode_login(&self, api_key: &str, passphrase: &str) -> Result<Message, ExchangeError>;

    /// Derive the stable registry key for the given channel parameters.
    ///
    /// Subscribing twice with the same key replaces the earlier entry;
    /// unsubscribing removes it so it is not replayed after a reconnect.
    fn channel_key(&self, params: &Value) -> String;

    /// Decode a raw WebSocket message into a frame.
    ///
    /// # Returns
    /// - `Ok(Some(frame))` - Successfully decoded frame
    /// - `Ok(None)` - Message was ignored/filtered by the codec
    /// - `Err(error)` - Malformed frame; the connection logs and drops it
    fn decode(&self, message: Message) -> Result<Option<WsFrame>, ExchangeError>;
}

/// Extract the text payload of a data message, if any.
pub(crate) fn message_text(message: Message) -> Result<Option<String>, ExchangeError> {
    match message {
        Message::Text(text) => Ok(Some(text)),
        Message::Binary(data) => String::from_utf8(data).map(Some).map_err(|e| {
            ExchangeError::DeserializationError(format!("Invalid UTF-8 in binary message: {}", e))
        }),
        _ => Ok(None),
    }
}
