mod common;

use serde_json::json;

#[tokio::test]
async fn test_shorten_success() {
    let app = common::create_test_app();
    let server = app.server();

    let response = server
        .post("/short")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["original_url"], "https://example.com/a");

    let short_url = json["short_url"].as_str().unwrap();
    assert!(short_url.starts_with("http://localhost:8080/"));
    assert!(!common::code_of(short_url).is_empty());
    assert_eq!(app.repo.len().await, 1);
}

#[tokio::test]
async fn test_shorten_is_idempotent() {
    let app = common::create_test_app();
    let server = app.server();

    let first = server
        .post("/short")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/short")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(first["short_url"], second["short_url"]);
    assert_eq!(app.repo.len().await, 1);
}

#[tokio::test]
async fn test_shorten_uses_configured_base_url() {
    let app = common::create_test_app_with(Some("https://s.example.com"), 4);
    let server = app.server();

    let response = server
        .post("/short")
        .json(&json!({ "original_url": "https://example.com/b" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert!(
        json["short_url"]
            .as_str()
            .unwrap()
            .starts_with("https://s.example.com/")
    );
}

#[tokio::test]
async fn test_shorten_missing_host_header() {
    let app = common::create_test_app();
    let server = app.server();

    let response = server
        .post("/short")
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await;

    response.assert_status_bad_request();
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let app = common::create_test_app();
    let server = app.server();

    let response = server
        .post("/short")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "original_url": "" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_rejects_url_unusable_as_location() {
    let app = common::create_test_app();
    let server = app.server();

    let response = server
        .post("/short")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "original_url": "https://example.com/a\nSet-Cookie: x=1" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["details"]["original_url"].is_array());
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_shorten_malformed_body() {
    let app = common::create_test_app();
    let server = app.server();

    let response = server
        .post("/short")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "url": "https://example.com/a" }))
        .await;

    assert!(response.status_code().is_client_error());
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_shorten_store_unavailable() {
    let app = common::create_test_app();
    let server = app.server();
    app.repo.set_available(false);

    let response = server
        .post("/short")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await;

    assert_eq!(response.status_code(), 500);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert!(!json["error"]["message"].as_str().unwrap().contains("memory"));
}

#[tokio::test]
async fn test_shorten_distinct_urls_get_distinct_codes() {
    let app = common::create_test_app();
    let server = app.server();

    let mut codes = std::collections::HashSet::new();

    for i in 0..20 {
        let json = server
            .post("/short")
            .add_header("Host", common::TEST_HOST)
            .json(&json!({ "original_url": format!("https://example.com/{i}") }))
            .await
            .json::<serde_json::Value>();

        codes.insert(common::code_of(json["short_url"].as_str().unwrap()));
    }

    assert_eq!(codes.len(), 20);
}
