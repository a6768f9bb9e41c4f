use crate::core::errors::{check_business_envelope, ExchangeError};
use crate::core::kernel::signer::{parse_query_pairs, Signer};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::RetryIf;
use tracing::{debug, error, instrument, trace};

/// REST client trait for making HTTP requests
///
/// This trait provides a unified interface for HTTP operations across the
/// spot and futures API families. The spot private family submits signed
/// parameters as a form body (`post_form`); the futures family signs into
/// headers and sends JSON bodies, including on DELETE.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Make a GET request with strongly-typed response
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<T, ExchangeError>;

    /// Make a POST request with a JSON body
    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Make a POST request with strongly-typed response
    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<T, ExchangeError>;

    /// Make a PUT request with a JSON body
    async fn put(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Make a DELETE request with a JSON body
    async fn delete(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Make a POST request with a form-encoded body
    ///
    /// When `authenticated`, the signer merges the key and signature into the
    /// submitted form fields (spot private convention).
    async fn post_form(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// API family name for logging and tracing ("spot" or "perp")
    pub api_family: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum number of retries for transient failures
    pub max_retries: u32,
    /// Base delay between retries in milliseconds; attempt k waits k times this
    pub retry_delay_ms: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    /// Create a new configuration
    pub fn new(base_url: String, api_family: String) -> Self {
        Self {
            base_url,
            api_family,
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_ms: 500,
            user_agent: "CoinW-Rust-SDK/0.1".to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base retry delay
    pub fn with_retry_delay(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// Implementation of `RestClient` using reqwest
///
/// One pooled connection per instance; retry policy and authentication are
/// applied transparently per request.
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Get the current timestamp in milliseconds
    fn timestamp_millis() -> u64 {
        chrono::Utc::now().timestamp_millis() as u64
    }

    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Create a query string from parameters, sorted by key.
    ///
    /// The same ordering is used for signing and for the transmitted URL so
    /// the signature always matches what goes on the wire.
    fn create_query_string(params: &[(&str, &str)]) -> String {
        let mut pairs = params.to_vec();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Make a request with the given parameters
    #[instrument(skip(self, body, query_params), fields(api_family = %self.config.api_family, method = %method, endpoint = %endpoint))]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
        body: Option<&Value>,
        as_form: bool,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let url = self.build_url(endpoint);

        let body_bytes = match body {
            Some(value) => serde_json::to_vec(value).map_err(|e| {
                ExchangeError::SerializationError(format!(
                    "Failed to serialize request body: {}",
                    e
                ))
            })?,
            None => Vec::new(),
        };

        let query_string = Self::create_query_string(query_params);

        let mut headers: Vec<(String, String)> = Vec::new();
        let mut query: Vec<(String, String)>;
        let mut form: Option<Vec<(String, String)>> = None;

        if authenticated {
            let signer = self.signer.as_ref().ok_or_else(|| {
                ExchangeError::InvalidCredentials(
                    "authentication required but no credentials configured".to_string(),
                )
            })?;

            let timestamp = Self::timestamp_millis();
            let (signed_headers, signed_params) = signer.sign_request(
                method.as_str(),
                endpoint,
                &query_string,
                &body_bytes,
                timestamp,
            )?;

            headers.extend(signed_headers);
            if as_form {
                form = Some(signed_params);
                query = Vec::new();
            } else {
                query = signed_params;
            }
        } else {
            query = parse_query_pairs(&query_string);
            if as_form {
                form = Some(std::mem::take(&mut query));
            }
        }

        debug!(param_count = query_params.len(), "submitting request");

        // Business errors are never retried; only transient transport
        // failures on idempotent verbs are.
        let idempotent = method != Method::POST;
        let strategy = (1..=u64::from(self.config.max_retries))
            .map(|attempt| Duration::from_millis(self.config.retry_delay_ms * attempt));

        RetryIf::spawn(
            strategy,
            || self.execute_once(&method, &url, &headers, &query, &body_bytes, form.as_deref()),
            |e: &ExchangeError| idempotent && e.is_transient(),
        )
        .await
    }

    async fn execute_once(
        &self,
        method: &Method,
        url: &str,
        headers: &[(String, String)],
        query: &[(String, String)],
        body: &[u8],
        form: Option<&[(String, String)]>,
    ) -> Result<Value, ExchangeError> {
        let mut request = self.client.request(method.clone(), url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        if !query.is_empty() {
            request = request.query(&query);
        }

        if let Some(fields) = form {
            request = request.form(&fields);
        } else if !body.is_empty() {
            request = request
                .header("Content-Type", "application/json")
                .body(body.to_vec());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ExchangeError::NetworkError("request timed out".to_string())
            } else {
                ExchangeError::NetworkError(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            ExchangeError::NetworkError(format!("Failed to read response body: {}", e))
        })?;

        trace!(status = %status, "response body: {}", response_text);

        if !status.is_success() {
            error!(status = %status, "request failed: {}", response_text);
            return Err(ExchangeError::from_status(status.as_u16(), &response_text));
        }

        let value: Value = serde_json::from_str(&response_text).map_err(|e| {
            ExchangeError::NetworkError(format!("unparseable response body: {}", e))
        })?;

        // 200 OK with an embedded failure marker is a first-class error path.
        check_business_envelope(&value)?;

        Ok(value)
    }

    fn deserialize<T: DeserializeOwned>(value: Value) -> Result<T, ExchangeError> {
        serde_json::from_value(value).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to deserialize JSON: {}", e))
        })
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.make_request(Method::GET, endpoint, query_params, None, false, authenticated)
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        self.get(endpoint, query_params, authenticated)
            .await
            .and_then(Self::deserialize)
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.make_request(Method::POST, endpoint, &[], Some(body), false, authenticated)
            .await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        self.post(endpoint, body, authenticated)
            .await
            .and_then(Self::deserialize)
    }

    async fn put(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.make_request(Method::PUT, endpoint, &[], Some(body), false, authenticated)
            .await
    }

    async fn delete(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.make_request(
            Method::DELETE,
            endpoint,
            &[],
            Some(body),
            false,
            authenticated,
        )
        .await
    }

    async fn post_form(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.make_request(Method::POST, endpoint, params, None, true, authenticated)
            .await
    }
}

/// Pull the `data` field out of a response envelope and deserialize it.
///
/// Envelopes that carry the payload at the top level are deserialized
/// directly.
pub fn extract_data<T: DeserializeOwned>(value: Value) -> Result<T, ExchangeError> {
    let payload = match value {
        Value::Object(mut obj) => match obj.remove("data") {
            Some(data) => data,
            None => Value::Object(obj),
        },
        other => other,
    };

    serde_json::from_value(payload).map_err(|e| {
        ExchangeError::DeserializationError(format!("Failed to deserialize response data: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_is_sorted() {
        let params = [("symbol", "BTC_USDT"), ("command", "returnTicker")];
        assert_eq!(
            ReqwestRest::create_query_string(&params),
            "command=returnTicker&symbol=BTC_USDT"
        );
    }

    #[test]
    fn test_empty_query_string() {
        assert_eq!(ReqwestRest::create_query_string(&[]), "");
    }

    #[tokio::test]
    async fn test_authenticated_request_without_signer_fails() {
        let config = RestClientConfig::new(
            "https://api.coinw.com".to_string(),
            "spot".to_string(),
        );
        let rest = RestClientBuilder::new(config).build().unwrap();

        let err = rest
            .post_form("/api/v1/private", &[("command", "returnBalances")], true)
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidCredentials(_)));
    }
}
