//! Tests for cycle orchestration against mock platform and driver.

mod common;

use common::{MockDriver, MockPlatform, mentions, orchestrator};
use std::sync::Arc;
use std::time::Duration;
use tr4c3_bot::ReplyConfig;
use tr4c3_error::{SocialErrorKind, Tr4c3ErrorKind};

#[tokio::test]
async fn test_publish_posts_generated_text() -> anyhow::Result<()> {
    let platform = Arc::new(MockPlatform::new());
    let bot = orchestrator(
        MockDriver::replying("\"◆ the oracle lies\""),
        platform.clone(),
        ReplyConfig::default(),
    );

    let post = bot.publish().await?;

    assert_eq!(post.text(), "◆ the oracle lies");
    let posts = platform.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].request.text(), "◆ the oracle lies");
    assert!(posts[0].request.in_reply_to().is_none());
    assert_eq!(bot.metrics().posts(), 1);
    Ok(())
}

#[tokio::test]
async fn test_empty_completion_never_reaches_platform() {
    let platform = Arc::new(MockPlatform::new().with_mentions(mentions(2)));
    let bot = orchestrator(
        MockDriver::without_choices(),
        platform.clone(),
        ReplyConfig::default(),
    );

    let report = bot.run_cycle(None).await;

    assert!(!report.is_success());
    assert!(report.posted().is_none());
    assert!(report.error().as_deref().unwrap_or_default().contains("no content"));
    assert!(platform.posts().is_empty());
    assert!(platform.queries.lock().unwrap().is_empty());
    assert_eq!(bot.metrics().post_failures(), 1);
    assert_eq!(bot.metrics().cycle_failures(), 1);
}

#[tokio::test]
async fn test_rate_limited_post_is_reported_not_propagated() {
    let platform = Arc::new(MockPlatform::new().with_post_failure(429));
    let bot = orchestrator(
        MockDriver::replying("ok"),
        platform.clone(),
        ReplyConfig::default(),
    );

    let err = bot.publish().await.unwrap_err();
    match err.kind() {
        Tr4c3ErrorKind::Social(social) => {
            assert_eq!(
                social.kind(),
                &SocialErrorKind::Remote {
                    status: 429,
                    body: "Too Many Requests".to_string()
                }
            );
        }
        other => panic!("Expected social error, got {:?}", other),
    }

    let report = bot.run_cycle(Some("7".to_string())).await;
    assert!(report.error().as_deref().unwrap_or_default().contains("429"));
    assert_eq!(report.newest_mention_id(), &Some("7".to_string()));
    assert_eq!(report.replies_sent(), &0);
}

#[tokio::test(start_paused = true)]
async fn test_five_mentions_get_three_replies_with_delay() {
    let platform = Arc::new(MockPlatform::new().with_mentions(mentions(5)));
    let bot = orchestrator(
        MockDriver::replying("Not for you."),
        platform.clone(),
        ReplyConfig::default(),
    );

    let report = bot.run_cycle(None).await;

    assert!(report.is_success());
    assert!(report.posted().is_some());
    assert_eq!(report.replies_sent(), &3);
    assert_eq!(report.replies_failed(), &0);
    assert_eq!(report.newest_mention_id(), &Some("5".to_string()));

    let replies = platform.replies();
    let targets: Vec<String> = replies
        .iter()
        .filter_map(|r| r.request.in_reply_to().as_ref().map(|id| id.0.clone()))
        .collect();
    assert_eq!(targets, vec!["5", "4", "3"]);

    for pair in replies.windows(2) {
        assert!(pair[1].at - pair[0].at >= Duration::from_secs(2));
    }
    assert_eq!(bot.metrics().replies(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_one_failed_reply_does_not_stop_the_rest() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_mentions(mentions(3))
            .with_reply_failure("2"),
    );
    let bot = orchestrator(
        MockDriver::replying("Decode this."),
        platform.clone(),
        ReplyConfig::default(),
    );

    let report = bot.run_cycle(None).await;

    assert!(report.is_success());
    assert_eq!(report.replies_sent(), &2);
    assert_eq!(report.replies_failed(), &1);
    assert_eq!(bot.metrics().reply_failures(), 1);
    // Failed mentions are not retried; the cursor still moves past them.
    assert_eq!(report.newest_mention_id(), &Some("3".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_reply_generation_failure_is_isolated() {
    let platform = Arc::new(MockPlatform::new().with_mentions(mentions(3)));
    let bot = orchestrator(
        MockDriver::replying("Hm.").failing_on("question 2"),
        platform.clone(),
        ReplyConfig::default(),
    );

    let summary = bot.reply_to_mentions(None).await.expect("Lookup should succeed");

    assert_eq!(summary.sent(), &2);
    assert_eq!(summary.failed(), &1);
}

#[tokio::test]
async fn test_since_id_is_passed_to_lookup() -> anyhow::Result<()> {
    let platform = Arc::new(MockPlatform::new());
    let bot = orchestrator(
        MockDriver::replying("x"),
        platform.clone(),
        ReplyConfig::default(),
    );

    let summary = bot.reply_to_mentions(Some("41".to_string())).await?;

    assert_eq!(summary.sent(), &0);
    let queries = platform.queries.lock().unwrap().clone();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].since_id(), &Some("41".to_string()));
    assert_eq!(queries[0].max_results(), &10);
    Ok(())
}

#[tokio::test]
async fn test_mentions_failure_keeps_post_and_records_error() {
    let platform = Arc::new(MockPlatform::new().with_mentions_failure());
    let bot = orchestrator(
        MockDriver::replying("x"),
        platform.clone(),
        ReplyConfig::default(),
    );

    let report = bot.run_cycle(Some("9".to_string())).await;

    assert!(report.posted().is_some());
    assert!(report.error().is_some());
    assert_eq!(report.newest_mention_id(), &Some("9".to_string()));
}

#[tokio::test]
async fn test_disabled_replies_skip_lookup() {
    let platform = Arc::new(MockPlatform::new().with_mentions(mentions(2)));
    let bot = orchestrator(
        MockDriver::replying("x"),
        platform.clone(),
        ReplyConfig {
            enabled: false,
            ..ReplyConfig::default()
        },
    );

    let report = bot.run_cycle(None).await;

    assert!(report.is_success());
    assert_eq!(platform.posts().len(), 1);
    assert!(platform.queries.lock().unwrap().is_empty());
}
