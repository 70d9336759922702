//! OAuth 1.0a request signing (RFC 5849, HMAC-SHA1).

mod encode;
mod header;
mod signature;
mod signer;

pub use encode::{percent_decode, percent_encode};
pub use header::{OAuthParams, authorization_header};
pub use signature::{HttpMethod, SIGNATURE_METHOD, SignatureRequest, sign};
pub use signer::{Clock, NonceGenerator, OAuthCredentials, OAuthSigner, RandomNonce, SystemClock};
