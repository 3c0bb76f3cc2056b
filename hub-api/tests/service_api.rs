use hub_api::{CouponApi, CouponHubApi};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_client(server: &MockServer) -> CouponHubApi {
    CouponHubApi::new(&server.uri(), Duration::from_secs(2)).expect("valid base url")
}

#[tokio::test]
async fn status_decodes_eligibility() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "canClaim": false,
            "timeLeft": 3661
        })))
        .mount(&server)
        .await;

    let api = make_client(&server);
    let status = api.status().await.expect("status fetch");
    assert!(!status.can_claim);
    assert_eq!(status.time_left, 3661);
}

#[tokio::test]
async fn claim_returns_coupon_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/claim-coupon"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "coupon": "SAVE20" })),
        )
        .mount(&server)
        .await;

    let api = make_client(&server);
    assert_eq!(api.claim().await.expect("claim"), "SAVE20");
}

#[tokio::test]
async fn claim_error_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/claim-coupon"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "message": "Already claimed" })),
        )
        .mount(&server)
        .await;

    let api = make_client(&server);
    let err = api.claim().await.expect_err("claim should fail");
    assert_eq!(err.server_message(), Some("Already claimed"));
}

#[tokio::test]
async fn claim_error_without_body_has_no_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/claim-coupon"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = make_client(&server);
    let err = api.claim().await.expect_err("claim should fail");
    assert_eq!(err.server_message(), None);
}
