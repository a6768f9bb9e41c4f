use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Signature error: {0}")]
    SignatureError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {code} - {message}")]
    ApiError { code: String, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ExchangeError {
    /// Transient transport failures that the session layer may retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::ServerError(_))
    }

    /// Classify a non-200 HTTP status before the body is inspected.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::InvalidCredentials("API key invalid or expired".to_string()),
            429 => Self::RateLimited("request rate limit exceeded".to_string()),
            s if s >= 500 => Self::ServerError(format!("HTTP {}", s)),
            s => Self::ApiError {
                code: s.to_string(),
                message: body.to_string(),
            },
        }
    }
}

/// Map a business error code embedded in a response body to the taxonomy.
///
/// Codes arrive as integers or strings depending on the API family.
pub fn map_business_error(code: &Value, message: &str) -> ExchangeError {
    let code_str = match code {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    match code_str.as_str() {
        "INSUFFICIENT_BALANCE" => ExchangeError::InsufficientBalance(message.to_string()),
        "ORDER_NOT_FOUND" => ExchangeError::OrderNotFound(message.to_string()),
        "INVALID_PARAMETER" => ExchangeError::InvalidParameter(message.to_string()),
        "SIGNATURE_ERROR" => ExchangeError::SignatureError(message.to_string()),
        _ => ExchangeError::ApiError {
            code: code_str,
            message: message.to_string(),
        },
    }
}

/// Inspect a decoded 200 body for an embedded business failure marker.
///
/// A `code` of `0` (or `"0"`) is success; any other code, or
/// `success == false`, raises the same taxonomy as an HTTP-level failure.
pub fn check_business_envelope(value: &Value) -> Result<(), ExchangeError> {
    let Some(obj) = value.as_object() else {
        return Ok(());
    };

    if let Some(code) = obj.get("code") {
        let ok = match code {
            Value::Number(n) => n.as_i64() == Some(0),
            Value::String(s) => s == "0",
            _ => false,
        };
        if !ok {
            return Err(map_business_error(code, envelope_message(obj)));
        }
    } else if obj.get("success").and_then(Value::as_bool) == Some(false) {
        let code = obj.get("error").cloned().unwrap_or(Value::from(-1));
        return Err(map_business_error(&code, envelope_message(obj)));
    }

    Ok(())
}

fn envelope_message(obj: &serde_json::Map<String, Value>) -> &str {
    obj.get("message")
        .or_else(|| obj.get("msg"))
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
}
