//! One cycle of generate, publish and reply.

use crate::{ApiEndpoints, BotMetrics, Credentials, ReplyConfig};
use derive_getters::Getters;
use serde::Serialize;
use std::sync::Arc;
use tr4c3_error::Tr4c3Result;
use tr4c3_models::{ContentGenerator, GenerationSettings, OpenAiClient, PromptContext};
use tr4c3_social::{
    Mention, MentionQuery, OAuthSigner, PostId, PostRequest, SocialPlatform, TwitterClient,
};
use tracing::{debug, error, info, instrument, warn};

/// A post that made it onto the platform.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct PublishedPost {
    /// Platform id
    id: PostId,
    /// Text as sent
    text: String,
}

/// Outcome of one pass over recent mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize)]
pub struct ReplySummary {
    /// Replies posted
    sent: usize,
    /// Mentions whose reply failed
    failed: usize,
    /// Newest mention id seen, for the next cursor
    newest_id: Option<String>,
}

/// Outcome of one cycle.
///
/// A cycle never fails as a whole; errors end up in `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize)]
pub struct CycleReport {
    /// Standalone post, if publishing succeeded
    posted: Option<PostId>,
    /// Replies posted
    replies_sent: usize,
    /// Mentions whose reply failed
    replies_failed: usize,
    /// Newest mention id seen
    newest_mention_id: Option<String>,
    /// First cycle-level error, rendered
    error: Option<String>,
}

impl CycleReport {
    /// Whether the cycle ran without a cycle-level error.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Drives content generation and publishing against one platform.
#[derive(Clone)]
pub struct Orchestrator {
    generator: ContentGenerator,
    platform: Arc<dyn SocialPlatform>,
    replies: ReplyConfig,
    metrics: BotMetrics,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("generator", &self.generator)
            .field("platform", &self.platform.metadata().name())
            .field("replies", &self.replies)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Creates an orchestrator from its parts.
    pub fn new(
        generator: ContentGenerator,
        platform: Arc<dyn SocialPlatform>,
        replies: ReplyConfig,
        metrics: BotMetrics,
    ) -> Self {
        Self {
            generator,
            platform,
            replies,
            metrics,
        }
    }

    /// Wires the OpenAI and Twitter clients from credentials and settings.
    pub fn connect(
        credentials: &Credentials,
        endpoints: &ApiEndpoints,
        generation: GenerationSettings,
        replies: ReplyConfig,
        metrics: BotMetrics,
    ) -> Self {
        let driver = OpenAiClient::with_base_url(
            credentials.openai_api_key(),
            generation.model().clone(),
            &endpoints.openai_base_url,
        );
        let signer = OAuthSigner::new(credentials.twitter().clone());
        let platform = TwitterClient::with_base_url(signer, &endpoints.twitter_base_url);

        Self::new(
            ContentGenerator::new(Arc::new(driver), generation),
            Arc::new(platform),
            replies,
            metrics,
        )
    }

    /// Shared metrics collector.
    pub fn metrics(&self) -> &BotMetrics {
        &self.metrics
    }

    /// Generate a standalone post and publish it.
    #[instrument(skip(self))]
    pub async fn publish(&self) -> Tr4c3Result<PublishedPost> {
        let result = self.try_publish().await;
        match &result {
            Ok(post) => {
                self.metrics.record_post_success();
                info!(post_id = %post.id, "Published post");
            }
            Err(e) => {
                self.metrics.record_post_failure();
                error!(error = %e, "Publishing failed");
            }
        }
        result
    }

    async fn try_publish(&self) -> Tr4c3Result<PublishedPost> {
        let content = self.generator.generate(PromptContext::Post).await?;
        let text = content.text().clone();
        let id = self.platform.post(PostRequest::new(text.clone())).await?;
        Ok(PublishedPost { id, text })
    }

    /// Answer up to `max_per_cycle` recent mentions.
    ///
    /// Failures on individual mentions are logged and counted; only the
    /// mentions lookup itself can fail the call.
    #[instrument(skip(self, since_id), fields(since_id = since_id.as_deref().unwrap_or("none")))]
    pub async fn reply_to_mentions(&self, since_id: Option<String>) -> Tr4c3Result<ReplySummary> {
        let query = MentionQuery::new(self.replies.page_size).since(since_id);
        let batch = self.platform.recent_mentions(&query).await?;

        let newest_id = batch
            .newest_id()
            .clone()
            .or_else(|| batch.mentions().first().map(|m| m.id().clone()));

        if batch.is_empty() {
            debug!("No new mentions");
            return Ok(ReplySummary {
                newest_id,
                ..Default::default()
            });
        }

        let mut summary = ReplySummary {
            newest_id,
            ..Default::default()
        };
        let delay = self.replies.delay();

        for (index, mention) in batch
            .mentions()
            .iter()
            .take(self.replies.max_per_cycle)
            .enumerate()
        {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.reply_to(mention).await {
                Ok(reply_id) => {
                    summary.sent += 1;
                    self.metrics.record_reply_success();
                    info!(mention_id = %mention.id(), reply_id = %reply_id, "Replied to mention");
                }
                Err(e) => {
                    summary.failed += 1;
                    self.metrics.record_reply_failure();
                    warn!(mention_id = %mention.id(), error = %e, "Reply failed");
                }
            }
        }

        Ok(summary)
    }

    async fn reply_to(&self, mention: &Mention) -> Tr4c3Result<PostId> {
        let content = self
            .generator
            .generate(PromptContext::Reply {
                mention_text: mention.text().clone(),
            })
            .await?;
        let id = self
            .platform
            .post(PostRequest::reply(content.text().clone(), mention.id().as_str()))
            .await?;
        Ok(id)
    }

    /// Run one full cycle: publish, then answer mentions.
    ///
    /// Never fails. If publishing fails the reply pass is skipped and the
    /// mention cursor is left where it was.
    #[instrument(skip(self))]
    pub async fn run_cycle(&self, since_id: Option<String>) -> CycleReport {
        self.metrics.record_cycle();
        let mut report = CycleReport {
            newest_mention_id: since_id.clone(),
            ..Default::default()
        };

        match self.publish().await {
            Ok(post) => report.posted = Some(post.id),
            Err(e) => {
                report.error = Some(e.to_string());
                self.metrics.record_cycle_failure();
                return report;
            }
        }

        if !self.replies.enabled || self.replies.max_per_cycle == 0 {
            return report;
        }

        match self.reply_to_mentions(since_id).await {
            Ok(summary) => {
                report.replies_sent = summary.sent;
                report.replies_failed = summary.failed;
                if summary.newest_id.is_some() {
                    report.newest_mention_id = summary.newest_id;
                }
            }
            Err(e) => {
                error!(error = %e, "Mention lookup failed");
                report.error = Some(e.to_string());
                self.metrics.record_cycle_failure();
            }
        }

        info!(
            posted = report.posted.is_some(),
            replies_sent = report.replies_sent,
            replies_failed = report.replies_failed,
            "Cycle complete"
        );
        report
    }
}
