use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{parse_query_pairs, SignatureResult, Signer};
use md5::{Digest, Md5};
use std::collections::HashMap;
use tracing::debug;

/// MD5 signer for the spot API family.
///
/// The signature is computed over the request parameters: `api_key` is
/// merged in, the pairs are sorted by key and concatenated as `k=v&…&`,
/// `secret_key={secret}` is appended, and the MD5 digest is uppercased.
/// The signed parameters (including `sign`) travel in the form body.
pub struct SpotSigner {
    api_key: String,
    secret_key: String,
}

impl SpotSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key,
        }
    }
}

impl Signer for SpotSigner {
    fn sign_request(
        &self,
        _method: &str,
        _endpoint: &str,
        query_string: &str,
        _body: &[u8],
        _timestamp: u64,
    ) -> SignatureResult {
        if self.api_key.is_empty() || self.secret_key.is_empty() {
            return Err(ExchangeError::InvalidCredentials(
                "api_key and secret_key must be set to sign spot requests".to_string(),
            ));
        }

        let mut params = parse_query_pairs(query_string);
        params.push(("api_key".to_string(), self.api_key.clone()));

        let mut sorted = params.clone();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let mut sign_string = String::new();
        for (key, value) in &sorted {
            sign_string.push_str(key);
            sign_string.push('=');
            sign_string.push_str(value);
            sign_string.push('&');
        }
        sign_string.push_str("secret_key=");
        sign_string.push_str(&self.secret_key);

        let mut hasher = Md5::new();
        hasher.update(sign_string.as_bytes());
        let signature = hex::encode(hasher.finalize()).to_uppercase();

        debug!("generated signature: {}...", &signature[..8]);

        params.push(("sign".to_string(), signature));
        Ok((HashMap::new(), params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(signer: &SpotSigner, query: &str) -> String {
        let (_, params) = signer.sign_request("POST", "/api/v1/private", query, &[], 0).unwrap();
        params
            .into_iter()
            .find(|(k, _)| k == "sign")
            .map(|(_, v)| v)
            .unwrap()
    }

    #[test]
    fn test_signature_is_deterministic() {
        let signer = SpotSigner::new("key".to_string(), "secret".to_string());
        let a = sign(&signer, "command=returnBalances");
        let b = sign(&signer, "command=returnBalances");
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_is_uppercase_hex() {
        let signer = SpotSigner::new("key".to_string(), "secret".to_string());
        let signature = sign(&signer, "command=doTrade&symbol=BTC_USDT");
        assert_eq!(signature.len(), 32);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_changing_any_input_changes_signature() {
        let signer = SpotSigner::new("key".to_string(), "secret".to_string());
        let base = sign(&signer, "amount=1&symbol=BTC_USDT");

        assert_ne!(base, sign(&signer, "amount=2&symbol=BTC_USDT"));
        assert_ne!(base, sign(&signer, "amount=1&symbol=ETH_USDT"));
        assert_ne!(base, sign(&signer, "amounts=1&symbol=BTC_USDT"));

        let other_secret = SpotSigner::new("key".to_string(), "secret2".to_string());
        assert_ne!(base, sign(&other_secret, "amount=1&symbol=BTC_USDT"));

        let other_key = SpotSigner::new("key2".to_string(), "secret".to_string());
        assert_ne!(base, sign(&other_key, "amount=1&symbol=BTC_USDT"));
    }

    #[test]
    fn test_parameter_order_does_not_matter() {
        let signer = SpotSigner::new("key".to_string(), "secret".to_string());
        assert_eq!(
            sign(&signer, "amount=1&symbol=BTC_USDT"),
            sign(&signer, "symbol=BTC_USDT&amount=1")
        );
    }

    #[test]
    fn test_signed_params_include_key_and_signature() {
        let signer = SpotSigner::new("key".to_string(), "secret".to_string());
        let (headers, params) = signer
            .sign_request("POST", "/api/v1/private", "command=returnBalances", &[], 0)
            .unwrap();

        assert!(headers.is_empty());
        assert!(params.iter().any(|(k, v)| k == "api_key" && v == "key"));
        assert!(params.iter().any(|(k, _)| k == "sign"));
        assert!(params
            .iter()
            .any(|(k, v)| k == "command" && v == "returnBalances"));
    }

    #[test]
    fn test_missing_secret_fails_before_network() {
        let signer = SpotSigner::new("key".to_string(), String::new());
        let err = signer
            .sign_request("POST", "/api/v1/private", "command=returnBalances", &[], 0)
            .unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidCredentials(_)));
    }
}
