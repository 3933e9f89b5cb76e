use axum::http::StatusCode;

use super::harness::{TestHarness, header_value};

#[tokio::test]
async fn api_responses_include_security_headers() {
    let harness = TestHarness::setup();

    let response = harness.get("/api/v01/terms?q=cell").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(response.headers(), "x-content-type-options"),
        Some("nosniff")
    );
    assert_eq!(
        header_value(response.headers(), "referrer-policy"),
        Some("no-referrer")
    );
    let csp = header_value(response.headers(), "content-security-policy").expect("csp header");
    assert!(csp.contains("default-src 'none'"));
}

#[tokio::test]
async fn routes_outside_the_versioned_prefix_are_not_served() {
    let harness = TestHarness::setup();

    assert_eq!(harness.get("/samples?and=CL:0000000").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(harness.get("/api/v02/terms?q=cell").await.status(), StatusCode::NOT_FOUND);
}
