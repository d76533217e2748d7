//! Permission gate: bearer credential → [`PermissionClaim`] → scope check.

pub mod claims;
pub mod gate;
pub mod verifier;

use axum::http::StatusCode;
use thiserror::Error;

pub use claims::PermissionClaim;
pub use gate::{authenticate, authorize, bearer_token};
pub use verifier::{CredentialVerifier, JwtVerifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// The credential was missing, malformed, expired or failed verification.
    InvalidCredential,
    /// The credential is valid but lacks the required scope.
    InsufficientScope,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub code: &'static str,
    pub description: String,
}

impl AuthError {
    pub fn invalid_credential(code: &'static str, description: impl Into<String>) -> Self {
        Self {
            kind: AuthErrorKind::InvalidCredential,
            code,
            description: description.into(),
        }
    }

    pub fn insufficient_scope(required_scope: &str) -> Self {
        Self {
            kind: AuthErrorKind::InsufficientScope,
            code: "unauthorized",
            description: format!("Permission not found: {}", required_scope),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            AuthErrorKind::InvalidCredential => StatusCode::UNAUTHORIZED,
            AuthErrorKind::InsufficientScope => StatusCode::FORBIDDEN,
        }
    }
}
