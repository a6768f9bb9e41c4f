use crate::core::errors::ExchangeError;
use crate::core::kernel::rest::extract_data;
use crate::core::kernel::RestClient;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.coinw.com";

/// Transport shim for the futures family.
///
/// Private endpoints live under `/v1/perpum`, public market data under
/// `/v1/perpumPublic`. Non-GET requests carry JSON bodies, including DELETE.
#[derive(Debug, Clone)]
pub struct PerpRest<R: RestClient> {
    rest: R,
}

impl<R: RestClient> PerpRest<R> {
    pub fn new(rest: R) -> Self {
        Self { rest }
    }

    pub async fn get(
        &self,
        endpoint: &str,
        params: &[(String, String)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let borrowed: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        self.rest.get(endpoint, &borrowed, authenticated).await
    }

    pub async fn get_data<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        self.get(endpoint, params, authenticated)
            .await
            .and_then(extract_data)
    }

    pub async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.rest.post(endpoint, body, authenticated).await
    }

    pub async fn put(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.rest.put(endpoint, body, authenticated).await
    }

    pub async fn delete(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.rest.delete(endpoint, body, authenticated).await
    }
}
