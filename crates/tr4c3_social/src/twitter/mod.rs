//! Twitter API v2 integration.

mod client;
mod dto;

pub use client::{DEFAULT_API_BASE_URL, MAX_TWEET_LENGTH, TwitterClient};
pub use dto::{CreatedTweet, MentionsMeta, MentionsPage, TwitterUser};
