//! Session cookie codec.
//!
//! The `auth-token` cookie holds the session as the claims of an HS256 JSON
//! Web Token signed with the server secret. A cookie is only trusted after
//! the signature and expiry both verify.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::SessionError;
use super::session::Session;
use crate::domain::foundation::Timestamp;

/// Lifetime of a session cookie, in days.
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    session: Session,
    iat: i64,
    exp: i64,
}

/// Encodes and verifies session tokens.
#[derive(Clone)]
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Encodes a session issued now.
    pub fn encode(&self, session: &Session) -> Result<String, SessionError> {
        self.encode_at(session, Timestamp::now())
    }

    fn encode_at(&self, session: &Session, issued_at: Timestamp) -> Result<String, SessionError> {
        let claims = SessionClaims {
            session: session.clone(),
            iat: issued_at.as_unix_secs(),
            exp: issued_at.plus_days(SESSION_TTL_DAYS).as_unix_secs(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Encoding(e.to_string()))
    }

    /// Decodes a token back into the session it was issued for.
    pub fn decode(&self, token: &str) -> Result<Session, SessionError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.session)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("Session token expired"),
                    ErrorKind::InvalidSignature => tracing::warn!("Session token signature mismatch"),
                    _ => tracing::debug!("Session token rejected: {}", e),
                }
                SessionError::InvalidSession
            })
    }
}

impl std::fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCodec").finish_non_exhaustive()
    }
}
