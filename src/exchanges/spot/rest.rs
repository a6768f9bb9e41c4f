use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.coinw.com";
pub const PUBLIC_PATH: &str = "/api/v1/public";
pub const PRIVATE_PATH: &str = "/api/v1/private";

/// Transport shim for the spot family.
///
/// Every spot endpoint is one of two shapes: a public GET against
/// `/api/v1/public` or a signed form POST against `/api/v1/private`, both
/// discriminated by a `command` field.
#[derive(Debug, Clone)]
pub struct SpotRest<R: RestClient> {
    rest: R,
}

impl<R: RestClient> SpotRest<R> {
    pub fn new(rest: R) -> Self {
        Self { rest }
    }

    pub async fn public(
        &self,
        command: &str,
        params: &[(String, String)],
    ) -> Result<Value, ExchangeError> {
        let mut all: Vec<(&str, &str)> = vec![("command", command)];
        all.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        self.rest.get(PUBLIC_PATH, &all, false).await
    }

    pub async fn private(
        &self,
        command: &str,
        params: &[(String, String)],
    ) -> Result<Value, ExchangeError> {
        let mut all: Vec<(&str, &str)> = vec![("command", command)];
        all.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        self.rest.post_form(PRIVATE_PATH, &all, true).await
    }
}
