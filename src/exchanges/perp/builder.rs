use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::perp::client::PerpClient;
use crate::exchanges::perp::rest::DEFAULT_BASE_URL;
use crate::exchanges::perp::signer::PerpSigner;
use std::sync::Arc;

/// Builder for futures clients.
///
/// Credentials are optional; without them only the public market data
/// endpoints are usable.
#[derive(Default)]
pub struct PerpBuilder {
    config: ExchangeConfig,
    timeout_seconds: Option<u64>,
    max_retries: Option<u32>,
}

impl PerpBuilder {
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::read_only(),
            timeout_seconds: None,
            max_retries: None,
        }
    }

    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_credentials(mut self, api_key: String, secret_key: String) -> Self {
        let base_url = self.config.base_url.clone();
        self.config = ExchangeConfig::new(api_key, secret_key);
        self.config.base_url = base_url;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn build(self) -> Result<PerpClient<ReqwestRest>, ExchangeError> {
        let base_url = self
            .config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut rest_config = RestClientConfig::new(base_url, "perp".to_string());
        if let Some(timeout_seconds) = self.timeout_seconds {
            rest_config = rest_config.with_timeout(timeout_seconds);
        }
        if let Some(max_retries) = self.max_retries {
            rest_config = rest_config.with_max_retries(max_retries);
        }

        let mut rest_builder = RestClientBuilder::new(rest_config);
        if self.config.has_credentials() {
            let signer = Arc::new(PerpSigner::new(
                self.config.api_key().to_string(),
                self.config.secret_key().to_string(),
            ));
            rest_builder = rest_builder.with_signer(signer);
        }

        Ok(PerpClient::new(rest_builder.build()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_credentials() {
        assert!(PerpBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_with_credentials() {
        let result = PerpBuilder::new()
            .with_credentials("test_key".to_string(), "test_secret".to_string())
            .with_timeout(60)
            .with_max_retries(5)
            .build();
        assert!(result.is_ok());
    }
}
