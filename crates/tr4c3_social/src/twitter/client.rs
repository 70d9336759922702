//! Signed HTTP client for the Twitter API v2.

use super::dto::{CreateTweetBody, CreatedTweet, DataEnvelope, MentionsPage, TweetReply, TwitterUser};
use crate::{
    HttpMethod, MentionBatch, MentionQuery, OAuthSigner, PlatformMetadata, PostId, PostRequest,
    SocialPlatform, percent_encode, validate_post,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tr4c3_error::{SocialError, SocialErrorKind, SocialResult};
use tracing::{debug, error, instrument, warn};

/// Production API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com";

/// Tweet length limit in characters.
///
/// Checked against Unicode scalar values. Twitter's own counter weights many
/// code points (most symbols, CJK, emoji) as two, so text this client accepts
/// can still be refused upstream with a 400.
pub const MAX_TWEET_LENGTH: usize = 280;

const MENTION_FIELDS: &str = "conversation_id,in_reply_to_user_id,author_id";
const MIN_PAGE_SIZE: u32 = 5;
const MAX_PAGE_SIZE: u32 = 100;

/// Twitter API v2 client authenticated with OAuth 1.0a user context.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: Client,
    base_url: String,
    signer: OAuthSigner,
}

impl TwitterClient {
    /// Client for the production API.
    pub fn new(signer: OAuthSigner) -> Self {
        Self::with_base_url(signer, DEFAULT_API_BASE_URL)
    }

    /// Client for an alternate host, e.g. a local mock server.
    pub fn with_base_url(signer: OAuthSigner, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "Creating Twitter client");
        Self {
            http: Client::new(),
            base_url,
            signer,
        }
    }

    /// Host this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign and send one request, decoding the success body as `T`.
    ///
    /// `query` is appended to the URL and included in the signature. The JSON
    /// body never is.
    async fn dispatch<B, T>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &BTreeMap<String, String>,
        body: Option<&B>,
    ) -> SocialResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let authorization = self.signer.authorize(method, &url, query)?;

        let full_url = if query.is_empty() {
            url
        } else {
            let encoded = query
                .iter()
                .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
                .collect::<Vec<_>>()
                .join("&");
            format!("{}?{}", url, encoded)
        };

        let mut request = self
            .http
            .request(method.into(), &full_url)
            .header(reqwest::header::AUTHORIZATION, authorization);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = ?e, "Failed to reach Twitter API");
            SocialError::new(SocialErrorKind::Transport(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Twitter API returned error");
            return Err(SocialError::new(SocialErrorKind::Remote {
                status: status.as_u16(),
                body,
            }));
        }

        let bytes = response.bytes().await.map_err(|e| {
            SocialError::new(SocialErrorKind::Transport(format!(
                "Failed to read response body: {}",
                e
            )))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            error!(error = ?e, "Failed to decode Twitter response");
            SocialError::new(SocialErrorKind::Decode(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }

    /// Publish a tweet, optionally as a reply.
    #[instrument(skip(self, text), fields(length = text.chars().count()))]
    pub async fn post_tweet(&self, text: &str, reply_to: Option<&str>) -> SocialResult<CreatedTweet> {
        let body = CreateTweetBody {
            text: text.to_string(),
            reply: reply_to.map(|id| TweetReply {
                in_reply_to_tweet_id: id.to_string(),
            }),
        };

        let envelope: DataEnvelope<CreatedTweet> = self
            .dispatch(HttpMethod::Post, "/2/tweets", &BTreeMap::new(), Some(&body))
            .await?;

        debug!(tweet_id = %envelope.data.id(), "Tweet created");
        Ok(envelope.data)
    }

    /// Look up the authenticated account.
    #[instrument(skip(self))]
    pub async fn me(&self) -> SocialResult<TwitterUser> {
        let envelope: DataEnvelope<TwitterUser> = self
            .dispatch::<(), _>(HttpMethod::Get, "/2/users/me", &BTreeMap::new(), None)
            .await?;
        Ok(envelope.data)
    }

    /// Fetch one page of mentions for `user_id`.
    ///
    /// Page size is clamped to the 5..=100 range the API accepts.
    #[instrument(skip(self, query), fields(user_id = %user_id))]
    pub async fn mentions(&self, user_id: &str, query: &MentionQuery) -> SocialResult<MentionsPage> {
        let page_size = (*query.max_results()).clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        if page_size != *query.max_results() {
            warn!(
                requested = query.max_results(),
                used = page_size,
                "Mention page size out of range, clamped"
            );
        }

        let mut params = BTreeMap::from([
            ("max_results".to_string(), page_size.to_string()),
            ("tweet.fields".to_string(), MENTION_FIELDS.to_string()),
        ]);
        if let Some(since_id) = query.since_id() {
            params.insert("since_id".to_string(), since_id.clone());
        }

        let path = format!("/2/users/{}/mentions", percent_encode(user_id));
        self.dispatch::<(), _>(HttpMethod::Get, &path, &params, None)
            .await
    }
}

#[async_trait]
impl SocialPlatform for TwitterClient {
    #[instrument(skip(self, request), fields(reply = request.in_reply_to().is_some()))]
    async fn post(&self, request: PostRequest) -> SocialResult<PostId> {
        validate_post(request.text(), &self.metadata())?;

        let reply_to = request.in_reply_to().as_ref().map(|id| id.0.as_str());
        let tweet = self.post_tweet(request.text(), reply_to).await?;
        Ok(PostId(tweet.id().clone()))
    }

    #[instrument(skip(self, query))]
    async fn recent_mentions(&self, query: &MentionQuery) -> SocialResult<MentionBatch> {
        let user = self.me().await?;
        let (mentions, meta) = self.mentions(user.id(), query).await?.into_parts();

        debug!(count = mentions.len(), "Fetched mentions");
        Ok(MentionBatch::new(
            mentions,
            *meta.result_count(),
            meta.newest_id().clone(),
        ))
    }

    fn metadata(&self) -> PlatformMetadata {
        PlatformMetadata::new("twitter", MAX_TWEET_LENGTH)
    }
}
