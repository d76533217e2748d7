use super::{AuthError, PermissionClaim};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use serde::Deserialize;

/// Turns a raw bearer token into verified scopes.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<PermissionClaim, AuthError>;
}

/// Claims read from an access token issued by the identity provider.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    sub: Option<String>,
    /// RBAC permissions array.
    permissions: Option<Vec<String>>,
    /// OAuth2 space-delimited scope string, used when `permissions` is absent.
    scope: Option<String>,
}

/// JWT-backed [`CredentialVerifier`].
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// HS256 verifier sharing `secret` with the issuer.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self::new(DecodingKey::from_secret(secret), Algorithm::HS256)
    }

    /// RS256 verifier for the issuer's PEM-encoded public key.
    pub fn from_rsa_pem(pem: &[u8]) -> Result<Self, anyhow::Error> {
        let decoding_key = DecodingKey::from_rsa_pem(pem)
            .map_err(|e| anyhow::anyhow!("Failed to parse public key: {}", e))?;

        Ok(Self::new(decoding_key, Algorithm::RS256))
    }

    fn new(decoding_key: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.validate_aud = true;
        self
    }

    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }
}

impl CredentialVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<PermissionClaim, AuthError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AuthError::invalid_credential("token_expired", "Token expired.")
                }
                ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => {
                    AuthError::invalid_credential(
                        "invalid_claims",
                        "Incorrect claims. Please, check the audience and issuer.",
                    )
                }
                _ => {
                    tracing::debug!(error = %e, "Rejected bearer token");
                    AuthError::invalid_credential(
                        "invalid_header",
                        "Unable to parse authentication token.",
                    )
                }
            },
        )?;

        let TokenClaims {
            sub,
            permissions,
            scope,
        } = data.claims;

        let scopes = match (permissions, scope) {
            (Some(permissions), _) => permissions,
            (None, Some(scope)) => scope.split_whitespace().map(str::to_string).collect(),
            (None, None) => {
                return Err(AuthError::invalid_credential(
                    "invalid_claims",
                    "Permissions not included in JWT.",
                ));
            }
        };

        Ok(PermissionClaim::new(sub, scopes))
    }
}
