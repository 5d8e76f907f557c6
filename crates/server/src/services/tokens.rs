//! Session token authority.
//!
//! Issues and verifies the stateless JWTs that carry a client's identity
//! between requests. The server keeps no session table: a token is valid iff
//! its signature checks out against the process-wide secret and its expiry
//! has not passed.
//!
//! Two verification paths exist on purpose:
//!
//! - [`TokenAuthority::try_verify`] answers "is anyone logged in" without
//!   ever failing, for call sites like login's double-session check.
//! - [`TokenAuthority::require_authenticated`] is the hard gate used by every
//!   account-scoped operation; the identity it returns is the scoping key for
//!   all storage filters.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use parceldock_core::ClientId;

/// Default token lifetime.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// A signed session token, opaque to everything but this module.
pub type SessionToken = String;

/// Errors that can occur in the token authority.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed; infrastructure-level and fatal for the operation.
    #[error("token issuance failed: {0}")]
    Issuance(jsonwebtoken::errors::Error),

    /// No valid token was presented on a gated operation.
    #[error("Unauthorized")]
    Unauthorized,
}

/// JWT claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Owning client's ID.
    sub: i32,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Expiry, seconds since the epoch.
    exp: i64,
}

/// Issues and verifies session tokens (HS256).
///
/// Stateless and cheap to share: holds only the derived keys and the TTL.
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenAuthority {
    /// Create a token authority from the process-wide signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        Self::with_ttl(secret, DEFAULT_TTL)
    }

    /// Create a token authority with an explicit token lifetime.
    #[must_use]
    pub fn with_ttl(secret: &SecretString, ttl: Duration) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: an expired token is expired, which keeps the expiry
        // tests deterministic as well.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation,
            ttl,
        }
    }

    /// Issue a signed token binding to `client_id`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Issuance` if signing fails.
    pub fn issue(&self, client_id: ClientId) -> Result<SessionToken, TokenError> {
        let now = chrono::Utc::now().timestamp();
        #[allow(clippy::cast_possible_wrap)] // TTL is nowhere near i64::MAX seconds
        let claims = Claims {
            sub: client_id.as_i32(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Issuance)
    }

    /// Attempt to verify a presented token, recovering the client identity.
    ///
    /// Returns `None` on any failure - malformed, expired, bad signature,
    /// empty input. Never errors, and never reveals which check failed.
    #[must_use]
    pub fn try_verify(&self, token: &str) -> Option<ClientId> {
        if token.is_empty() {
            return None;
        }

        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .ok()
            .map(|data| ClientId::new(data.claims.sub))
    }

    /// Verify a presented token, failing loudly when it doesn't resolve.
    ///
    /// This is the sole authorization mechanism: the returned `ClientId` is
    /// the scoping key for every storage filter.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Unauthorized` iff [`Self::try_verify`] returns
    /// `None`.
    pub fn require_authenticated(&self, token: &str) -> Result<ClientId, TokenError> {
        self.try_verify(token).ok_or(TokenError::Unauthorized)
    }
}
