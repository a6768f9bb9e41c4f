use crate::core::errors::ExchangeError;
use std::collections::HashMap;

/// Result type for signing operations: (headers, `signed_params`)
pub type SignatureResult = Result<(HashMap<String, String>, Vec<(String, String)>), ExchangeError>;

/// Signer trait for request authentication
///
/// The two API families authenticate differently: the spot family merges an
/// MD5 signature into the request parameters, the futures family carries an
/// HMAC-SHA256 signature in headers. Both are pure functions of the request
/// descriptor, the timestamp and the secret, so implementations stay
/// directly unit-testable.
pub trait Signer: Send + Sync {
    /// Sign a request and return headers plus signed parameters.
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `endpoint` - API endpoint path
    /// * `query_string` - Query string, sorted by key, without leading '?'
    /// * `body` - Raw request body bytes
    /// * `timestamp` - Request timestamp in milliseconds
    ///
    /// The session layer decides where the signed parameters travel: query
    /// string for GET-style requests, form body for the spot private family.
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult;
}

/// Split a `k=v&k=v` query string back into pairs.
pub(crate) fn parse_query_pairs(query_string: &str) -> Vec<(String, String)> {
    if query_string.is_empty() {
        return Vec::new();
    }
    query_string
        .split('&')
        .filter_map(|param| {
            param
                .split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
        })
        .collect()
}
