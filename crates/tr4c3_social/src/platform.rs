//! Social platform trait and types.

use async_trait::async_trait;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tr4c3_error::{SocialError, SocialErrorKind, SocialResult};

/// Platform-specific post identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct PostId(pub String);

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PostId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Text to publish, optionally as a reply.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PostRequest {
    /// Body of the post.
    text: String,
    /// Post being replied to.
    in_reply_to: Option<PostId>,
}

impl PostRequest {
    /// Standalone post.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            in_reply_to: None,
        }
    }

    /// Reply to an existing post.
    pub fn reply(text: impl Into<String>, in_reply_to: impl Into<PostId>) -> Self {
        Self {
            text: text.into(),
            in_reply_to: Some(in_reply_to.into()),
        }
    }
}

/// Metadata about a platform.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlatformMetadata {
    /// Platform name (e.g., "twitter").
    name: String,

    /// Maximum text length for posts, in characters.
    max_text_length: usize,
}

impl PlatformMetadata {
    /// Create platform metadata.
    pub fn new(name: impl Into<String>, max_text_length: usize) -> Self {
        Self {
            name: name.into(),
            max_text_length,
        }
    }
}

/// A post addressed to the bot account.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Mention {
    /// Post identifier.
    id: String,
    /// Body text.
    text: String,
    /// Thread the mention belongs to.
    #[serde(default)]
    conversation_id: Option<String>,
    /// Account that wrote the mention.
    #[serde(default)]
    author_id: Option<String>,
}

impl Mention {
    /// Create a mention with just an id and text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            conversation_id: None,
            author_id: None,
        }
    }
}

/// Paging options for a mentions lookup.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MentionQuery {
    /// Page size requested from the platform.
    max_results: u32,
    /// Only return mentions newer than this id.
    since_id: Option<String>,
}

impl Default for MentionQuery {
    fn default() -> Self {
        Self {
            max_results: 10,
            since_id: None,
        }
    }
}

impl MentionQuery {
    /// Query with an explicit page size.
    pub fn new(max_results: u32) -> Self {
        Self {
            max_results,
            since_id: None,
        }
    }

    /// Restrict to mentions newer than `since_id`.
    pub fn since(mut self, since_id: Option<String>) -> Self {
        self.since_id = since_id;
        self
    }
}

/// Mentions returned by one lookup, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MentionBatch {
    /// Mentions in platform order.
    mentions: Vec<Mention>,
    /// Count reported by the platform.
    result_count: u32,
    /// Newest id in the batch, for cursoring.
    newest_id: Option<String>,
}

impl MentionBatch {
    /// Create a batch.
    pub fn new(mentions: Vec<Mention>, result_count: u32, newest_id: Option<String>) -> Self {
        Self {
            mentions,
            result_count,
            newest_id,
        }
    }

    /// Whether the batch has no mentions.
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }
}

/// Trait for social platform implementations.
#[async_trait]
pub trait SocialPlatform: Send + Sync {
    /// Publish a post or reply.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Content validation fails
    /// - The request cannot be signed
    /// - The platform answers with a non-success status
    async fn post(&self, request: PostRequest) -> SocialResult<PostId>;

    /// Fetch recent mentions of the authenticated account.
    ///
    /// # Errors
    ///
    /// Returns error if the account lookup or the mentions lookup fails.
    async fn recent_mentions(&self, query: &MentionQuery) -> SocialResult<MentionBatch>;

    /// Get platform-specific metadata.
    fn metadata(&self) -> PlatformMetadata;
}

/// Check post text against a platform's limits.
///
/// Length is counted in characters (Unicode scalar values), not bytes and not
/// platform-weighted units; see [`crate::MAX_TWEET_LENGTH`].
///
/// # Examples
///
/// ```
/// use tr4c3_social::{PlatformMetadata, validate_post};
///
/// let twitter = PlatformMetadata::new("twitter", 280);
/// assert!(validate_post("◆".repeat(280).as_str(), &twitter).is_ok());
/// assert!(validate_post("", &twitter).is_err());
/// ```
pub fn validate_post(text: &str, metadata: &PlatformMetadata) -> SocialResult<()> {
    if text.trim().is_empty() {
        return Err(SocialError::new(SocialErrorKind::Validation(
            "Post text must not be empty".to_string(),
        )));
    }

    let length = text.chars().count();
    if length > metadata.max_text_length {
        return Err(SocialError::new(SocialErrorKind::Validation(format!(
            "Text exceeds {} limit of {} characters ({})",
            metadata.name, metadata.max_text_length, length
        ))));
    }

    Ok(())
}
