use crate::auth::{self, AuthErrorKind, CredentialVerifier, PermissionClaim};
use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use metrics::counter;
use std::sync::Arc;

/// State for [`require_scope`]: who verifies credentials and which scope the route needs.
#[derive(Clone)]
pub struct ScopeGate {
    verifier: Arc<dyn CredentialVerifier>,
    required_scope: Arc<str>,
}

impl ScopeGate {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, required_scope: &str) -> Self {
        Self {
            verifier,
            required_scope: Arc::from(required_scope),
        }
    }

    pub fn required_scope(&self) -> &str {
        &self.required_scope
    }
}

/// Rejects the request unless its bearer credential carries the gate's scope.
///
/// On success the verified [`PermissionClaim`] is stored in the request
/// extensions for the [`Claims`] extractor.
pub async fn require_scope(
    State(gate): State<ScopeGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let method = req.method().to_string();
    let endpoint = req.uri().path().to_string();

    let claim = auth::authenticate(req.headers(), gate.verifier.as_ref())
        .and_then(|claim| auth::authorize(&claim, gate.required_scope()).map(|_| claim))
        .map_err(|err| {
            let reason = match err.kind {
                AuthErrorKind::InvalidCredential => "invalid_credential",
                AuthErrorKind::InsufficientScope => "insufficient_scope",
            };
            tracing::warn!(
                method = %method,
                endpoint = %endpoint,
                required_scope = %gate.required_scope(),
                code = err.code,
                "Request denied by permission gate"
            );
            counter!("authorization_denied_total", "reason" => reason).increment(1);
            err
        })?;

    tracing::debug!(
        subject = claim.subject().unwrap_or("-"),
        required_scope = %gate.required_scope(),
        "Permission granted"
    );

    req.extensions_mut().insert(claim);

    Ok(next.run(req).await)
}

/// Extractor for the claim placed by [`require_scope`].
pub struct Claims(pub PermissionClaim);

#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claim = parts
            .extensions
            .get::<PermissionClaim>()
            .cloned()
            .ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!(
                    "Permission claim missing from request extensions"
                ))
            })?;

        Ok(Claims(claim))
    }
}
