use axum::extract::{FromRequestParts, Query, rejection::QueryRejection};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A `Query<T>` wrapper that reports a missing parameter by name as a plain-text 400.
pub struct AppQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(rejection_to_error)?;
        Ok(AppQuery(value))
    }
}

fn rejection_to_error(rejection: QueryRejection) -> AppError {
    let text = rejection.body_text();
    match missing_field(&text) {
        Some(name) => AppError::MalformedRequest(format!("Missing required parameter: {name}")),
        None => AppError::MalformedRequest(text),
    }
}

/// Extract `name` from serde's "missing field `name`" message.
fn missing_field(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("missing field `")?;
    let (name, _) = rest.split_once('`')?;
    Some(name)
}
