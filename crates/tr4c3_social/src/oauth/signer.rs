//! Credentials bound to a clock and nonce source.

use super::header::{OAuthParams, authorization_header};
use super::signature::{HttpMethod, SignatureRequest};
use derive_getters::Getters;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::collections::BTreeMap;
use std::sync::Arc;
use tr4c3_error::SigningResult;

/// Source of `oauth_timestamp` values.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn unix_timestamp(&self) -> u64;
}

/// Source of `oauth_nonce` values.
pub trait NonceGenerator: Send + Sync {
    /// A fresh single-use token.
    fn nonce(&self) -> String;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

/// Alphanumeric nonces from the thread-local RNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomNonce {
    length: usize,
}

impl RandomNonce {
    /// Nonces of the given length.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomNonce {
    fn default() -> Self {
        Self::new(32)
    }
}

impl NonceGenerator for RandomNonce {
    fn nonce(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

/// Consumer and access-token key pairs for user-context requests.
#[derive(Clone, PartialEq, Eq, Getters)]
pub struct OAuthCredentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_secret: String,
}

impl OAuthCredentials {
    /// Create a credential set.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
        }
    }
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

/// Produces `Authorization` headers for outbound requests.
///
/// Stateless apart from its injected clock and nonce source; each call builds
/// a fresh parameter set.
#[derive(Clone)]
pub struct OAuthSigner {
    credentials: OAuthCredentials,
    clock: Arc<dyn Clock>,
    nonces: Arc<dyn NonceGenerator>,
}

impl std::fmt::Debug for OAuthSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSigner")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl OAuthSigner {
    /// Signer using the wall clock and random nonces.
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self::with_entropy(
            credentials,
            Arc::new(SystemClock),
            Arc::new(RandomNonce::default()),
        )
    }

    /// Signer with explicit time and nonce sources.
    pub fn with_entropy(
        credentials: OAuthCredentials,
        clock: Arc<dyn Clock>,
        nonces: Arc<dyn NonceGenerator>,
    ) -> Self {
        Self {
            credentials,
            clock,
            nonces,
        }
    }

    /// Credentials this signer was built with.
    pub fn credentials(&self) -> &OAuthCredentials {
        &self.credentials
    }

    /// Fresh protocol parameters, unsigned.
    pub fn protocol_params(&self) -> OAuthParams {
        OAuthParams::new(
            &self.credentials.consumer_key,
            &self.credentials.access_token,
            self.clock.unix_timestamp(),
            self.nonces.nonce(),
        )
    }

    /// Sign a request and render its `Authorization` header.
    ///
    /// `request_params` are query or form parameters. They take part in the
    /// signature but never appear in the header.
    #[tracing::instrument(skip(self, request_params), fields(method = %method, url = %url))]
    pub fn authorize(
        &self,
        method: HttpMethod,
        url: &str,
        request_params: &BTreeMap<String, String>,
    ) -> SigningResult<String> {
        let params = self.protocol_params();

        let mut all = params.as_map().clone();
        for (key, value) in request_params {
            all.entry(key.clone()).or_insert_with(|| value.clone());
        }

        let signature = SignatureRequest::new(
            method,
            url,
            all,
            &self.credentials.consumer_secret,
            &self.credentials.access_secret,
        )
        .sign()?;

        tracing::debug!("Request signed");
        Ok(authorization_header(&params.with_signature(signature)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_nonce_length_and_alphabet() {
        let nonce = RandomNonce::new(24).nonce();
        assert_eq!(nonce.len(), 24);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_nonces_differ() {
        let source = RandomNonce::default();
        assert_ne!(source.nonce(), source.nonce());
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = OAuthCredentials::new("ck", "consumer-secret", "at", "access-secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("ck"));
        assert!(!debug.contains("consumer-secret"));
        assert!(!debug.contains("access-secret"));
    }
}
