use crate::models::{ClaimsError, IdentityClaims};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Lifetime of every issued access token.
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Signing secret is not configured")]
    MissingSecret,
    #[error("Invalid identity claims: {0}")]
    InvalidClaims(#[from] ClaimsError),
    #[error("Token signature does not match")]
    InvalidToken,
    #[error("Token has expired")]
    Expired,
    #[error("Token is malformed")]
    Malformed,
    #[error("Token encoding failed: {0}")]
    Encoding(jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct SignedClaims {
    #[serde(flatten)]
    identity: IdentityClaims,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HS256 access tokens.
///
/// The secret is optional so the server can start without one; every
/// call then fails with [`TokenError::MissingSecret`].
#[derive(Clone)]
pub struct TokenService {
    secret: Option<String>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: Option<String>) -> Self {
        Self::with_ttl(secret, Duration::seconds(TOKEN_TTL_SECONDS))
    }

    pub fn with_ttl(secret: Option<String>, ttl: Duration) -> Self {
        let secret = secret.filter(|s| !s.is_empty());
        Self { secret, ttl }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    pub fn issue(&self, claims: &IdentityClaims) -> Result<String, TokenError> {
        let secret = self.secret.as_deref().ok_or(TokenError::MissingSecret)?;
        claims.validate()?;

        let now = Utc::now();
        let signed = SignedClaims {
            identity: claims.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &signed,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(TokenError::Encoding)
    }

    pub fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let secret = self.secret.as_deref().ok_or(TokenError::MissingSecret)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<SignedClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(classify)?;

        Ok(data.claims.identity)
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => TokenError::Malformed,
        _ => TokenError::InvalidToken,
    }
}
