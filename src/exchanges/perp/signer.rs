use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{parse_query_pairs, SignatureResult, Signer};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer for the futures API family.
///
/// The prehash is `{timestamp}{method}{path}?{sorted_query}` for GET (the
/// `?query` suffix is omitted when there are no parameters) and
/// `{timestamp}{method}{path}{json_body}` for every other verb. The
/// base64-encoded signature travels in the `sign`/`api_key`/`timestamp`
/// headers.
pub struct PerpSigner {
    api_key: String,
    secret_key: String,
}

impl PerpSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key,
        }
    }

    pub(crate) fn prehash(
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> String {
        if method == "GET" {
            if query_string.is_empty() {
                format!("{}{}{}", timestamp, method, endpoint)
            } else {
                format!("{}{}{}?{}", timestamp, method, endpoint, query_string)
            }
        } else {
            let body_str = std::str::from_utf8(body).unwrap_or_default();
            format!("{}{}{}{}", timestamp, method, endpoint, body_str)
        }
    }
}

impl Signer for PerpSigner {
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult {
        if self.api_key.is_empty() || self.secret_key.is_empty() {
            return Err(ExchangeError::InvalidCredentials(
                "contract API requires api_key and secret_key".to_string(),
            ));
        }

        let prehash = Self::prehash(method, endpoint, query_string, body, timestamp);

        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| ExchangeError::SignatureError(format!("Failed to create HMAC: {}", e)))?;
        mac.update(prehash.as_bytes());
        let signature = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        debug!("generated signature: {}...", &signature[..12]);

        let mut headers = HashMap::new();
        headers.insert("sign".to_string(), signature);
        headers.insert("api_key".to_string(), self.api_key.clone());
        headers.insert("timestamp".to_string(), timestamp.to_string());

        // Query parameters already carry the sorted order used in the prehash.
        Ok((headers, parse_query_pairs(query_string)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_prehash_omits_empty_query() {
        let prehash = PerpSigner::prehash("GET", "/v1/perpum/positions/all", "", &[], 1700000000000);
        assert_eq!(prehash, "1700000000000GET/v1/perpum/positions/all");
    }

    #[test]
    fn test_get_prehash_includes_query() {
        let prehash = PerpSigner::prehash(
            "GET",
            "/v1/perpum/positions",
            "instrument=BTC&openIds=1",
            &[],
            1700000000000,
        );
        assert_eq!(
            prehash,
            "1700000000000GET/v1/perpum/positions?instrument=BTC&openIds=1"
        );
    }

    #[test]
    fn test_post_prehash_uses_body() {
        let body = br#"{"instrument":"BTC"}"#;
        let prehash = PerpSigner::prehash("POST", "/v1/perpum/order", "", body, 1700000000000);
        assert_eq!(
            prehash,
            "1700000000000POST/v1/perpum/order{\"instrument\":\"BTC\"}"
        );
    }

    #[test]
    fn test_signature_headers_and_determinism() {
        let signer = PerpSigner::new("key".to_string(), "secret".to_string());

        let (headers, params) = signer
            .sign_request("GET", "/v1/perpum/positions", "instrument=BTC", &[], 1700000000000)
            .unwrap();

        assert_eq!(headers.get("api_key").map(String::as_str), Some("key"));
        assert_eq!(
            headers.get("timestamp").map(String::as_str),
            Some("1700000000000")
        );
        let signature = headers.get("sign").unwrap();
        // Base64 of a 32-byte HMAC digest.
        assert_eq!(signature.len(), 44);
        assert_eq!(
            params,
            vec![("instrument".to_string(), "BTC".to_string())]
        );

        let (headers_again, _) = signer
            .sign_request("GET", "/v1/perpum/positions", "instrument=BTC", &[], 1700000000000)
            .unwrap();
        assert_eq!(signature, headers_again.get("sign").unwrap());
    }

    #[test]
    fn test_different_inputs_change_signature() {
        let signer = PerpSigner::new("key".to_string(), "secret".to_string());

        let sig = |method: &str, query: &str, ts: u64| {
            let (headers, _) = signer
                .sign_request(method, "/v1/perpum/positions", query, &[], ts)
                .unwrap();
            headers.get("sign").unwrap().clone()
        };

        let base = sig("GET", "instrument=BTC", 1700000000000);
        assert_ne!(base, sig("GET", "instrument=ETH", 1700000000000));
        assert_ne!(base, sig("GET", "instrument=BTC", 1700000000001));
        assert_ne!(base, sig("DELETE", "instrument=BTC", 1700000000000));
    }

    #[test]
    fn test_missing_secret_fails_before_network() {
        let signer = PerpSigner::new("key".to_string(), String::new());
        let err = signer
            .sign_request("GET", "/v1/perpum/positions", "", &[], 0)
            .unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidCredentials(_)));
    }
}
