//! Mock platform and completion driver shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;
use tr4c3_bot::{BotMetrics, Orchestrator, ReplyConfig};
use tr4c3_error::{
    GenerationError, GenerationErrorKind, GenerationResult, SocialError, SocialErrorKind,
    SocialResult,
};
use tr4c3_models::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage, CompletionDriver,
    ContentGenerator, GenerationSettings,
};
use tr4c3_social::{
    Mention, MentionBatch, MentionQuery, PlatformMetadata, PostId, PostRequest, SocialPlatform,
};

/// Mock completion driver.
pub struct MockDriver {
    text: Option<String>,
    fail_when_prompt_contains: Option<String>,
}

impl MockDriver {
    pub fn replying(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            fail_when_prompt_contains: None,
        }
    }

    pub fn without_choices() -> Self {
        Self {
            text: None,
            fail_when_prompt_contains: None,
        }
    }

    pub fn failing_on(mut self, marker: &str) -> Self {
        self.fail_when_prompt_contains = Some(marker.to_string());
        self
    }
}

#[async_trait]
impl CompletionDriver for MockDriver {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> GenerationResult<ChatCompletionResponse> {
        if let Some(marker) = &self.fail_when_prompt_contains
            && request.messages.iter().any(|m| m.content.contains(marker.as_str()))
        {
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: 500,
                message: "Mock failure".to_string(),
            }));
        }

        let choices = match &self.text {
            None => vec![],
            Some(text) => vec![Choice {
                index: 0,
                message: ChoiceMessage {
                    role: "assistant".to_string(),
                    content: Some(text.clone()),
                },
                finish_reason: Some("stop".to_string()),
            }],
        };

        Ok(ChatCompletionResponse {
            choices,
            ..Default::default()
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// A post the mock platform accepted, with the (virtual) time it arrived.
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub request: PostRequest,
    pub at: Instant,
}

/// Mock platform for testing.
#[derive(Default)]
pub struct MockPlatform {
    pub posts: Mutex<Vec<RecordedPost>>,
    pub queries: Mutex<Vec<MentionQuery>>,
    mentions: Vec<Mention>,
    fail_post_status: Option<u16>,
    fail_replies_to: Vec<String>,
    fail_mentions: bool,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mentions(mut self, mentions: Vec<Mention>) -> Self {
        self.mentions = mentions;
        self
    }

    pub fn with_post_failure(mut self, status: u16) -> Self {
        self.fail_post_status = Some(status);
        self
    }

    pub fn with_reply_failure(mut self, mention_id: &str) -> Self {
        self.fail_replies_to.push(mention_id.to_string());
        self
    }

    pub fn with_mentions_failure(mut self) -> Self {
        self.fail_mentions = true;
        self
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<RecordedPost> {
        self.posts()
            .into_iter()
            .filter(|p| p.request.in_reply_to().is_some())
            .collect()
    }
}

#[async_trait]
impl SocialPlatform for MockPlatform {
    async fn post(&self, request: PostRequest) -> SocialResult<PostId> {
        if let Some(status) = self.fail_post_status {
            return Err(SocialError::new(SocialErrorKind::Remote {
                status,
                body: "Too Many Requests".to_string(),
            }));
        }
        if let Some(target) = request.in_reply_to()
            && self.fail_replies_to.contains(&target.0)
        {
            return Err(SocialError::new(SocialErrorKind::Remote {
                status: 403,
                body: "Forbidden".to_string(),
            }));
        }

        let mut posts = self.posts.lock().unwrap();
        posts.push(RecordedPost {
            request,
            at: Instant::now(),
        });
        Ok(PostId(format!("post_{}", posts.len())))
    }

    async fn recent_mentions(&self, query: &MentionQuery) -> SocialResult<MentionBatch> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fail_mentions {
            return Err(SocialError::new(SocialErrorKind::Transport(
                "connection reset".to_string(),
            )));
        }
        let newest = self.mentions.first().map(|m| m.id().clone());
        Ok(MentionBatch::new(
            self.mentions.clone(),
            self.mentions.len() as u32,
            newest,
        ))
    }

    fn metadata(&self) -> PlatformMetadata {
        PlatformMetadata::new("mock", 280)
    }
}

/// `count` mentions with ids counting down from `count`, newest first.
pub fn mentions(count: usize) -> Vec<Mention> {
    (1..=count)
        .rev()
        .map(|i| Mention::new(i.to_string(), format!("@tr4c3 question {}", i)))
        .collect()
}

pub fn orchestrator(
    driver: MockDriver,
    platform: Arc<MockPlatform>,
    replies: ReplyConfig,
) -> Orchestrator {
    Orchestrator::new(
        ContentGenerator::new(Arc::new(driver), GenerationSettings::default()),
        platform,
        replies,
        BotMetrics::new(),
    )
}
