mod common;

use common::*;
use jaundice::server::{self, AppState};
use jaundice::BatchCoordinator;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Starts the service on an ephemeral port and returns its base URL.
async fn spawn_service() -> String {
    let coordinator = Arc::new(BatchCoordinator::new(processor(), None));
    let state = AppState::new(coordinator, 10);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, server::router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn rejects_more_than_ten_urls_without_fetching() {
    let upstream = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_HTML))
        .expect(0)
        .mount(&upstream)
        .await;

    let urls: Vec<String> = (0..11)
        .map(|i| format!("{}/article-{}.html", upstream.uri(), i))
        .collect();
    let service = spawn_service().await;

    let response = reqwest::Client::new()
        .get(&service)
        .query(&[("urls", urls.join(","))])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": "too many urls in request, should be 10 or less"})
    );
}

#[tokio::test]
async fn missing_urls_is_bad_request() {
    let service = spawn_service().await;
    let client = reqwest::Client::new();

    let response = client.get(&service).send().await.unwrap();
    assert_eq!(response.status(), 400);

    let response = client.get(format!("{}/?urls=", service)).send().await.unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn scores_mixed_batch_with_ok_status() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/20230204/neft-260327000.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_HTML))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/brief/2021/08/26/afg_terror/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FOREIGN_HTML))
        .mount(&upstream)
        .await;

    let ok_url = format!("{}/20230204/neft-260327000.html", upstream.uri());
    let foreign_url = format!("{}/brief/2021/08/26/afg_terror/", upstream.uri());
    let missing_url = format!("{}/not/exist.html", upstream.uri());
    let service = spawn_service().await;

    let response = reqwest::Client::new()
        .get(&service)
        .query(&[("urls", [ok_url.as_str(), foreign_url.as_str(), missing_url.as_str()].join(","))])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let text = response.text().await.unwrap();
    assert!(text.contains("\n    \"url\""), "response should be indented");

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        body,
        json!([
            {"url": ok_url, "status": "OK", "words_count": 3, "rate": 33.33},
            {"url": foreign_url, "status": "PARSING_ERROR", "words_count": null, "rate": null},
            {"url": missing_url, "status": "FETCH_ERROR", "words_count": null, "rate": null},
        ])
    );
}

#[tokio::test]
async fn any_path_is_served() {
    let service = spawn_service().await;

    let response = reqwest::Client::new()
        .get(format!("{}/articles", service))
        .query(&[("urls", "not a url")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body[0]["status"], "FETCH_ERROR");
    assert_eq!(body[0]["url"], "not a url");
}
