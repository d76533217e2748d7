use super::{AuthError, CredentialVerifier, PermissionClaim};
use axum::http::{HeaderMap, header};

/// Succeeds iff `required_scope` is one of the claim's scopes.
pub fn authorize(claim: &PermissionClaim, required_scope: &str) -> Result<(), AuthError> {
    if claim.has_scope(required_scope) {
        Ok(())
    } else {
        Err(AuthError::insufficient_scope(required_scope))
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(header::AUTHORIZATION).ok_or_else(|| {
        AuthError::invalid_credential(
            "authorization_header_missing",
            "Authorization header is expected.",
        )
    })?;

    let value = value.to_str().map_err(|_| {
        AuthError::invalid_credential("invalid_header", "Authorization header is not valid text.")
    })?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => Err(
            AuthError::invalid_credential("invalid_header", "Authorization header must start with \"Bearer\"."),
        ),
        (Some(_), None, _) => Err(AuthError::invalid_credential(
            "invalid_header",
            "Token not found.",
        )),
        _ => Err(AuthError::invalid_credential(
            "invalid_header",
            "Authorization header must be bearer token.",
        )),
    }
}

/// Reads the bearer credential from `headers` and hands it to `verifier`.
pub fn authenticate(
    headers: &HeaderMap,
    verifier: &dyn CredentialVerifier,
) -> Result<PermissionClaim, AuthError> {
    let token = bearer_token(headers)?;
    verifier.verify(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthErrorKind;
    use axum::http::{HeaderValue, StatusCode};

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_authorize_with_matching_scope() {
        let claim = PermissionClaim::from_scopes(["get:drinks-detail"]);
        assert!(authorize(&claim, "get:drinks-detail").is_ok());
    }

    #[test]
    fn test_authorize_without_scope_is_forbidden() {
        let err = authorize(&PermissionClaim::default(), "post:drinks").unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::InsufficientScope);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_authorize_requires_exact_scope() {
        let claim = PermissionClaim::from_scopes(["get:drinks", "patch:drinks"]);
        assert!(authorize(&claim, "get:drinks-detail").is_err());
        assert!(authorize(&claim, "patch:drinks").is_ok());
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&headers("bearer xyz")).unwrap(), "xyz");
    }

    #[test]
    fn test_missing_header() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.code, "authorization_header_missing");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_malformed_headers() {
        for value in ["Basic abc", "Bearer", "Bearer a b"] {
            let err = bearer_token(&headers(value)).unwrap_err();
            assert_eq!(err.kind, AuthErrorKind::InvalidCredential, "{}", value);
            assert_eq!(err.code, "invalid_header");
        }
    }
}
