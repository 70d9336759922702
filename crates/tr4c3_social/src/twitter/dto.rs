//! Twitter API v2 data transfer objects.

use crate::Mention;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Body of `POST /2/tweets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CreateTweetBody {
    pub(crate) text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reply: Option<TweetReply>,
}

/// Reply target inside [`CreateTweetBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct TweetReply {
    pub(crate) in_reply_to_tweet_id: String,
}

/// `{"data": ...}` wrapper every v2 endpoint uses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub(crate) data: T,
}

/// A tweet as returned by the create endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CreatedTweet {
    /// Tweet id
    id: String,
    /// Tweet text as stored by the platform
    #[serde(default)]
    text: String,
}

/// The authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TwitterUser {
    /// Numeric user id, as a string
    id: String,
    /// Handle without the `@`
    #[serde(default)]
    username: String,
}

/// Paging metadata for a mentions page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MentionsMeta {
    /// Number of mentions on this page
    #[serde(default)]
    result_count: u32,
    /// Newest mention id on this page
    #[serde(default)]
    newest_id: Option<String>,
    /// Oldest mention id on this page
    #[serde(default)]
    oldest_id: Option<String>,
}

/// One page of `GET /2/users/{id}/mentions`.
///
/// `data` is omitted entirely by the API when there are no mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MentionsPage {
    /// Mentions, newest first
    #[serde(default)]
    data: Vec<Mention>,
    /// Paging metadata
    #[serde(default)]
    meta: MentionsMeta,
}

impl MentionsPage {
    /// Split into mentions and metadata.
    pub fn into_parts(self) -> (Vec<Mention>, MentionsMeta) {
        (self.data, self.meta)
    }
}
