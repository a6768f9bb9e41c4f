use coinw::core::kernel::{RestClient, RestClientBuilder, RestClientConfig};
use coinw::exchanges::perp::PerpSigner;
use coinw::exchanges::spot::SpotSigner;
use coinw::ExchangeError;
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

fn build_client(base_url: String, max_retries: u32) -> coinw::core::kernel::ReqwestRest {
    let config = RestClientConfig::new(base_url, "perp".to_string())
        .with_max_retries(max_retries)
        .with_retry_delay(10);
    RestClientBuilder::new(config)
        .with_signer(Arc::new(PerpSigner::new(
            "test_key".to_string(),
            "test_secret".to_string(),
        )))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_success_envelope_passes_through() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/perpum/instruments")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"code":0,"data":[{"base":"BTC"}]}"#)
        .create_async()
        .await;

    let rest = build_client(server.url(), 0);
    let value = rest.get("/v1/perpum/instruments", &[], false).await.unwrap();

    assert_eq!(value["data"][0]["base"], "BTC");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_embedded_business_failure_in_200_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/perpum/instruments")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"code":1,"message":"x"}"#)
        .create_async()
        .await;

    let rest = build_client(server.url(), 0);
    let err = rest
        .get("/v1/perpum/instruments", &[], false)
        .await
        .unwrap_err();

    match err {
        ExchangeError::ApiError { code, message } => {
            assert_eq!(code, "1");
            assert_eq!(message, "x");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_known_business_code_maps_to_kind() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/perpum/order")
        .with_status(200)
        .with_body(r#"{"code":"INSUFFICIENT_BALANCE","msg":"not enough USDT"}"#)
        .create_async()
        .await;

    let rest = build_client(server.url(), 0);
    let err = rest
        .post("/v1/perpum/order", &json!({"instrument": "BTC"}), true)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::InsufficientBalance(_)));
}

#[tokio::test]
async fn test_transient_status_is_retried_for_get_until_cap() {
    let mut server = mockito::Server::new_async().await;
    // One initial attempt plus two retries.
    let mock = server
        .mock("GET", "/v1/perpum/instruments")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let rest = build_client(server.url(), 2);
    let err = rest
        .get("/v1/perpum/instruments", &[], false)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::ServerError(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_is_never_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/perpum/order")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let rest = build_client(server.url(), 2);
    let err = rest
        .post("/v1/perpum/order", &json!({"instrument": "BTC"}), true)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::ServerError(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_statuses_classified_before_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/perpum/account/fees")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("unauthorized")
        .create_async()
        .await;

    let rest = build_client(server.url(), 0);
    let err = rest
        .get("/v1/perpum/account/fees", &[], true)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::InvalidCredentials(_)));
}

#[tokio::test]
async fn test_unparseable_body_is_a_network_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/perpum/instruments")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let rest = build_client(server.url(), 0);
    let err = rest
        .get("/v1/perpum/instruments", &[], false)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::NetworkError(_)));
}

#[tokio::test]
async fn test_hmac_auth_headers_attached_to_get() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/perpum/positions/all")
        .match_query(Matcher::Any)
        .match_header("api_key", "test_key")
        .match_header("sign", Matcher::Regex("^[A-Za-z0-9+/=]{44}$".to_string()))
        .match_header("timestamp", Matcher::Regex("^[0-9]{13}$".to_string()))
        .with_status(200)
        .with_body(r#"{"code":0,"data":[]}"#)
        .create_async()
        .await;

    let rest = build_client(server.url(), 0);
    rest.get("/v1/perpum/positions/all", &[], true).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_md5_signed_form_carries_key_and_signature() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/private")
        .match_header("content-type", Matcher::Regex("urlencoded".to_string()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("command=returnBalances".to_string()),
            Matcher::Regex("api_key=test_key".to_string()),
            Matcher::Regex("sign=[A-F0-9]{32}".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"code":0,"data":{}}"#)
        .create_async()
        .await;

    let config = RestClientConfig::new(server.url(), "spot".to_string()).with_retry_delay(10);
    let rest = RestClientBuilder::new(config)
        .with_signer(Arc::new(SpotSigner::new(
            "test_key".to_string(),
            "test_secret".to_string(),
        )))
        .build()
        .unwrap();

    rest.post_form("/api/v1/private", &[("command", "returnBalances")], true)
        .await
        .unwrap();

    mock.assert_async().await;
}
