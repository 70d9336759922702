//! Protocol parameters and the `Authorization` header.

use super::encode::percent_encode;
use super::signature::SIGNATURE_METHOD;
use std::collections::BTreeMap;

const OAUTH_VERSION: &str = "1.0";
const PROTOCOL_PREFIX: &str = "oauth_";

/// OAuth protocol parameters for a single request.
///
/// Built fresh for every request so nonces and timestamps never repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthParams(BTreeMap<String, String>);

impl OAuthParams {
    /// Protocol parameters for an HMAC-SHA1 signed request, without the signature.
    pub fn new(
        consumer_key: impl Into<String>,
        token: impl Into<String>,
        timestamp: u64,
        nonce: impl Into<String>,
    ) -> Self {
        let mut params = Self::default();
        params.insert("oauth_consumer_key", consumer_key);
        params.insert("oauth_token", token);
        params.insert("oauth_signature_method", SIGNATURE_METHOD);
        params.insert("oauth_timestamp", timestamp.to_string());
        params.insert("oauth_nonce", nonce);
        params.insert("oauth_version", OAUTH_VERSION);
        params
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Borrow the underlying map, e.g. to feed [`crate::sign`].
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// Attach the computed `oauth_signature`.
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.insert("oauth_signature", signature);
        self
    }
}

impl<K, V> FromIterator<(K, V)> for OAuthParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Render the `Authorization` header value.
///
/// Only `oauth_*` parameters are emitted; keys and values are percent-encoded
/// and ordered by encoded key.
///
/// # Examples
///
/// ```
/// use tr4c3_social::{OAuthParams, authorization_header};
///
/// let params: OAuthParams = [("oauth_version", "1.0"), ("oauth_nonce", "a b")].into_iter().collect();
/// assert_eq!(
///     authorization_header(&params),
///     r#"OAuth oauth_nonce="a%20b", oauth_version="1.0""#
/// );
/// ```
pub fn authorization_header(params: &OAuthParams) -> String {
    let mut pairs: Vec<(String, String)> = params
        .as_map()
        .iter()
        .filter(|(key, _)| key.starts_with(PROTOCOL_PREFIX))
        .map(|(key, value)| (percent_encode(key), percent_encode(value)))
        .collect();
    pairs.sort();

    let rendered = pairs
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", key, value))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {}", rendered)
}
