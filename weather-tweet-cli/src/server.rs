//! HTTP trigger: lets an external scheduler start an invocation with a request.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{any, get},
};
use weather_tweet_core::invoke;

#[derive(Clone)]
struct AppState {
    config_path: Arc<PathBuf>,
}

async fn trigger(State(state): State<AppState>) -> (StatusCode, String) {
    let response = invoke(&state.config_path).await;
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, response.body)
}

async fn health_check() -> &'static str {
    "OK"
}

pub fn create_router(config_path: PathBuf) -> Router {
    let state = AppState { config_path: Arc::new(config_path) };

    Router::new()
        .route("/", any(trigger))
        .route("/health", get(health_check))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, config_path: PathBuf) -> anyhow::Result<()> {
    let app = create_router(config_path);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP trigger listening");

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn(config_path: PathBuf) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_router(config_path)).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let addr = spawn(PathBuf::from("/unused.toml")).await;

        let res = reqwest::get(format!("http://{addr}/health")).await.unwrap();

        assert_eq!(res.status(), 200);
        assert_eq!(res.text().await.unwrap(), "OK");
    }

    #[tokio::test]
    async fn trigger_reports_failed_invocation_as_500() {
        let dir = tempfile::tempdir().unwrap();
        let addr = spawn(dir.path().join("missing.toml")).await;

        let res = reqwest::Client::new()
            .post(format!("http://{addr}/"))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 500);
        assert!(res.text().await.unwrap().contains("\"kind\":\"config_load\""));
    }
}
