//! HTTP front end: `GET /?urls=a,b,c` scores up to `max_urls` articles per request.

use crate::coordinator::BatchCoordinator;
use crate::error::{Error, Result};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    coordinator: Arc<BatchCoordinator>,
    max_urls: usize,
}

impl AppState {
    pub fn new(coordinator: Arc<BatchCoordinator>, max_urls: usize) -> Self {
        Self {
            coordinator,
            max_urls,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ArticlesQuery {
    urls: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle))
        .route("/:name", get(handle))
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener
        .local_addr()
        .map_err(|e| Error::Server(e.to_string()))?;
    log::info!("Listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("Shutting down...");
        })
        .await
        .map_err(|e| Error::Server(e.to_string()))
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("cannot bind {}: {}", addr, e)))
}

async fn handle(State(state): State<AppState>, Query(query): Query<ArticlesQuery>) -> Response {
    let Some(raw) = query.urls.filter(|urls| !urls.is_empty()) else {
        return bad_request("urls query parameter is required".to_string());
    };

    let urls: Vec<String> = raw.split(',').map(str::to_string).collect();
    if urls.len() > state.max_urls {
        log::warn!("Rejected request with {} urls", urls.len());
        return bad_request(format!(
            "too many urls in request, should be {} or less",
            state.max_urls
        ));
    }

    log::info!("Scoring {} articles", urls.len());
    let results = state.coordinator.run(&urls).await;

    match serde_json::to_string_pretty(&results) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            log::error!("Failed to encode results: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn bad_request(message: String) -> Response {
    let body = serde_json::to_string_pretty(&json!({ "error": message })).unwrap_or_default();
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
