//! Tests for the trigger API routes.

mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use common::{MockDriver, MockPlatform, orchestrator};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use tr4c3_bot::{ApiState, ReplyConfig, create_router};

fn router(driver: MockDriver, platform: Arc<MockPlatform>) -> axum::Router {
    let bot = orchestrator(driver, platform, ReplyConfig::default());
    create_router(ApiState::new(Arc::new(bot)))
}

async fn call(app: axum::Router, method: &str, uri: &str) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let response = app
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, body.to_vec()))
}

#[tokio::test]
async fn test_post_tweet_returns_text_and_id() -> anyhow::Result<()> {
    let platform = Arc::new(MockPlatform::new());
    let app = router(MockDriver::replying("'01001 whispers'"), platform.clone());

    let (status, body) = call(app, "POST", "/tweet").await?;
    let json: Value = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["tweet"], "01001 whispers");
    assert_eq!(json["id"], "post_1");
    assert_eq!(platform.posts().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_post_tweet_failure_is_500() -> anyhow::Result<()> {
    let platform = Arc::new(MockPlatform::new());
    let app = router(MockDriver::without_choices(), platform.clone());

    let (status, body) = call(app, "POST", "/tweet").await?;
    let json: Value = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap_or_default().contains("no content"));
    assert!(platform.posts().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_rate_limited_post_is_500() -> anyhow::Result<()> {
    let platform = Arc::new(MockPlatform::new().with_post_failure(429));
    let app = router(MockDriver::replying("x"), platform);

    let (status, body) = call(app, "POST", "/tweet").await?;
    let json: Value = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap_or_default().contains("429"));
    Ok(())
}

#[tokio::test]
async fn test_init_posts_with_message() -> anyhow::Result<()> {
    let platform = Arc::new(MockPlatform::new());
    let app = router(MockDriver::replying("first light"), platform.clone());

    let (status, body) = call(app, "GET", "/init").await?;
    let json: Value = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Initial tweet posted");
    assert_eq!(json["tweet"], "first light");
    assert_eq!(json["id"], "post_1");
    Ok(())
}

#[tokio::test]
async fn test_root_serves_banner() -> anyhow::Result<()> {
    let app = router(MockDriver::replying("x"), Arc::new(MockPlatform::new()));

    let (status, body) = call(app, "GET", "/").await?;
    let text = String::from_utf8(body)?;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("TR4C3 bot is running"));
    assert!(text.contains("POST /tweet"));
    Ok(())
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let app = router(MockDriver::replying("x"), Arc::new(MockPlatform::new()));

    let (status, body) = call(app, "GET", "/health").await?;
    let json: Value = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn test_metrics_reflect_manual_posts() -> anyhow::Result<()> {
    let bot = Arc::new(orchestrator(
        MockDriver::replying("x"),
        Arc::new(MockPlatform::new()),
        ReplyConfig::default(),
    ));
    let app = create_router(ApiState::new(bot));

    call(app.clone(), "POST", "/tweet").await?;
    let (status, body) = call(app, "GET", "/metrics").await?;
    let json: Value = serde_json::from_slice(&body)?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["posting"]["successes"], 1);
    assert_eq!(json["posting"]["failures"], 0);
    Ok(())
}

#[tokio::test]
async fn test_get_on_tweet_is_rejected() -> anyhow::Result<()> {
    let platform = Arc::new(MockPlatform::new());
    let app = router(MockDriver::replying("x"), platform.clone());

    let (status, _) = call(app, "GET", "/tweet").await?;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(platform.posts().is_empty());
    Ok(())
}
