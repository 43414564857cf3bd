//! JSON extractor whose rejection uses the standard error body.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`axum::Json`] in handler arguments.
///
/// Syntax errors, missing fields and a missing `Content-Type` are rejected
/// with [`AppError::JsonExtractorRejection`], so clients always receive an
/// [`ErrorResponse`](crate::errors::ErrorResponse) instead of plain text.
///
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create(JsonBody(input): JsonBody<CreateTask>) -> impl IntoResponse { /* ... */ }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}
