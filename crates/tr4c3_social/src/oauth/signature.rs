//! Signature base construction and HMAC-SHA1 signing.

use super::encode::{percent_decode, percent_encode};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use derive_getters::Getters;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use std::collections::BTreeMap;
use tr4c3_error::{SigningError, SigningResult};

type HmacSha1 = Hmac<Sha1>;

/// Value of `oauth_signature_method` for every request this crate signs.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// HTTP methods the bot signs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum HttpMethod {
    /// `GET`
    #[display("GET")]
    Get,
    /// `POST`
    #[display("POST")]
    Post,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Everything needed to compute one request signature.
///
/// `parameters` holds the protocol parameters plus any query or form
/// parameters. JSON bodies never take part in the signature.
#[derive(Clone, PartialEq, Eq, Getters)]
pub struct SignatureRequest {
    method: HttpMethod,
    url: String,
    parameters: BTreeMap<String, String>,
    consumer_secret: String,
    token_secret: String,
}

impl std::fmt::Debug for SignatureRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("parameters", &self.parameters)
            .field("consumer_secret", &"<redacted>")
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

impl SignatureRequest {
    /// Create a signature request.
    pub fn new(
        method: HttpMethod,
        url: impl Into<String>,
        parameters: BTreeMap<String, String>,
        consumer_secret: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            method,
            url: url.into(),
            parameters,
            consumer_secret: consumer_secret.into(),
            token_secret: token_secret.into(),
        }
    }

    /// Split the URL into its base and the full, encoded, sorted parameter list.
    ///
    /// Query parameters found on the URL are decoded and merged with
    /// `parameters`; the returned base URL never carries a query.
    fn normalize(&self) -> SigningResult<(String, Vec<(String, String)>)> {
        let lower = self.url.to_ascii_lowercase();
        if !(lower.starts_with("https://") || lower.starts_with("http://")) {
            return Err(SigningError::encoding(format!(
                "URL must be absolute http(s): {}",
                self.url
            )));
        }
        if self.url.contains('#') {
            return Err(SigningError::encoding(format!(
                "URL must not carry a fragment: {}",
                self.url
            )));
        }

        let (base, query) = match self.url.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (self.url.as_str(), None),
        };

        let mut pairs = Vec::with_capacity(self.parameters.len());
        for (key, value) in &self.parameters {
            if key.is_empty() {
                return Err(SigningError::encoding("Parameter key must not be empty"));
            }
            pairs.push((percent_encode(key), percent_encode(value)));
        }

        for pair in query.into_iter().flat_map(|q| q.split('&')) {
            if pair.is_empty() {
                continue;
            }
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = percent_decode(&raw_key.replace('+', " "))?;
            let value = percent_decode(&raw_value.replace('+', " "))?;
            if key.is_empty() {
                return Err(SigningError::encoding(format!(
                    "Query parameter without a key in {}",
                    self.url
                )));
            }
            pairs.push((percent_encode(&key), percent_encode(&value)));
        }

        pairs.sort();
        Ok((base.to_string(), pairs))
    }

    /// The exact string that gets hashed.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if the URL is not absolute http(s), carries a
    /// fragment, has a query that does not decode to UTF-8, or if any
    /// parameter key is empty.
    pub fn base_string(&self) -> SigningResult<String> {
        let (base_url, pairs) = self.normalize()?;
        let joined = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!(
            "{}&{}&{}",
            self.method,
            percent_encode(&base_url),
            percent_encode(&joined)
        ))
    }

    /// `enc(consumer_secret)&enc(token_secret)`.
    pub fn signing_key(&self) -> String {
        format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(&self.token_secret)
        )
    }

    /// Compute the base64-encoded HMAC-SHA1 signature.
    #[tracing::instrument(skip(self), fields(method = %self.method, url = %self.url))]
    pub fn sign(&self) -> SigningResult<String> {
        let base = self.base_string()?;
        tracing::trace!(base = %base, "Computed signature base");

        let mut mac = HmacSha1::new_from_slice(self.signing_key().as_bytes())
            .map_err(|e| SigningError::crypto(format!("HMAC-SHA1 rejected signing key: {}", e)))?;
        mac.update(base.as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// Sign a request in one call.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use tr4c3_social::{HttpMethod, sign};
///
/// let params = BTreeMap::from([("oauth_nonce".to_string(), "n".to_string())]);
/// let a = sign(HttpMethod::Get, "https://example.com/a", &params, "cs", "ts")?;
/// let b = sign(HttpMethod::Get, "https://example.com/a", &params, "cs", "ts")?;
/// assert_eq!(a, b);
/// # Ok::<(), tr4c3_error::SigningError>(())
/// ```
pub fn sign(
    method: HttpMethod,
    url: &str,
    parameters: &BTreeMap<String, String>,
    consumer_secret: &str,
    token_secret: &str,
) -> SigningResult<String> {
    SignatureRequest::new(
        method,
        url,
        parameters.clone(),
        consumer_secret,
        token_secret,
    )
    .sign()
}
