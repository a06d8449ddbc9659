use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims the token service owns; callers may not set them.
pub const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("email is required")]
    MissingEmail,
    #[error("email is not a valid address")]
    InvalidEmail,
    #[error("claim '{0}' is set by the server")]
    ReservedClaim(String),
}

/// Identity embedded in an access token.
///
/// `email` is the only member the server relies on. Anything else the
/// caller sends is carried through the token unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaims {
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdentityClaims {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            extra: Map::new(),
        }
    }

    pub fn with_claim(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn validate(&self) -> Result<(), ClaimsError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ClaimsError::MissingEmail);
        }
        if !email.contains('@') || email.len() > 255 {
            return Err(ClaimsError::InvalidEmail);
        }
        if let Some(key) = RESERVED_CLAIMS
            .iter()
            .find(|key| self.extra.contains_key(**key))
        {
            return Err(ClaimsError::ReservedClaim(key.to_string()));
        }
        Ok(())
    }
}

/// Identity decoded by the access guard, stored in request extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedIdentity(pub IdentityClaims);

impl VerifiedIdentity {
    pub fn email(&self) -> &str {
        &self.0.email
    }
}
