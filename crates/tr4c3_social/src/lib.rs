//! Request signing and social platform dispatch for TR4C3.
//!
//! This crate owns the only piece of real protocol work in the bot: computing
//! OAuth 1.0a HMAC-SHA1 signatures for outbound calls to the Twitter v2 API and
//! dispatching those calls.
//!
//! # Architecture
//!
//! - **oauth**: percent-encoding, signature base construction, HMAC-SHA1 signing,
//!   `Authorization` header rendering, and the [`OAuthSigner`] that binds
//!   credentials to an injected clock and nonce source
//! - **twitter**: [`TwitterClient`], a signed HTTP dispatcher plus the tweet,
//!   user and mention endpoints
//! - **platform**: the [`SocialPlatform`] trait the orchestrator talks to
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use tr4c3_social::{HttpMethod, OAuthParams, authorization_header, sign};
//!
//! let params = OAuthParams::new("CKEY", "TOKEN", 1_700_000_000, "abc123");
//! let signature = sign(
//!     HttpMethod::Post,
//!     "https://api.twitter.com/2/tweets",
//!     params.as_map(),
//!     "CSECRET",
//!     "TSECRET",
//! )?;
//! let header = authorization_header(&params.with_signature(signature));
//! assert!(header.starts_with("OAuth oauth_consumer_key=\"CKEY\""));
//! # Ok::<(), tr4c3_error::SigningError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod oauth;
mod platform;
mod twitter;

pub use oauth::{
    Clock, HttpMethod, NonceGenerator, OAuthCredentials, OAuthParams, OAuthSigner, RandomNonce,
    SIGNATURE_METHOD, SignatureRequest, SystemClock, authorization_header, percent_decode,
    percent_encode, sign,
};
pub use platform::{
    Mention, MentionBatch, MentionQuery, PlatformMetadata, PostId, PostRequest, SocialPlatform,
    validate_post,
};
pub use twitter::{
    CreatedTweet, DEFAULT_API_BASE_URL, MAX_TWEET_LENGTH, MentionsMeta, MentionsPage,
    TwitterClient, TwitterUser,
};
