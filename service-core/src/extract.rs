use crate::error::AppError;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has been deserialized and passed `validator` checks.
///
/// Malformed bodies and failed validation both surface as 422.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Unprocessable(anyhow::anyhow!(rejection.body_text())))?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path parameters; a value that fails to parse is a 400 in the JSON error body.
#[derive(Debug, Clone, Copy)]
pub struct Path<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Path(value)| Path(value))
            .map_err(|rejection| AppError::BadRequest(anyhow::anyhow!(rejection.body_text())))
    }
}

/// Query string parameters, rejected as 400 in the JSON error body.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Query::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Query(value)| Query(value))
            .map_err(|rejection| AppError::BadRequest(anyhow::anyhow!(rejection.body_text())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{StatusCode, header},
        routing::post,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Title {
        #[validate(length(min = 1, message = "Title cannot be empty"))]
        title: String,
    }

    async fn status_for(body: &'static str) -> StatusCode {
        let app = Router::new().route(
            "/",
            post(|ValidatedJson(t): ValidatedJson<Title>| async move { t.title }),
        );

        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn test_unparsable_path_is_bad_request_json() {
        let app = Router::new().route(
            "/items/:id",
            axum::routing::get(|Path(id): Path<i64>| async move { id.to_string() }),
        );

        let response = app
            .oneshot(Request::builder().uri("/items/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 400);
    }

    #[tokio::test]
    async fn test_valid_body() {
        assert_eq!(status_for(r#"{"title": "Latte"}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_bodies_are_unprocessable() {
        assert_eq!(
            status_for(r#"{"title": ""}"#).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(r#"{"name": "Latte"}"#).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_for("not json").await, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
