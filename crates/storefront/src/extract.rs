//! Request extractors whose rejections are [`AppError`]s.
//!
//! axum's own `Form` and `Path` reject with plain-text bodies. These wrappers
//! keep every client error in the `{"detail": "..."}` shape.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// URL-encoded form body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct Form<T>(pub T);

/// Typed path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// A form where every field is optional.
///
/// A request with neither a body nor a `Content-Type` yields `T::default()`
/// instead of a 415.
#[derive(Debug)]
pub struct PartialForm<T>(pub T);

impl<T, S> FromRequest<S> for PartialForm<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.headers().contains_key(CONTENT_TYPE) {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            return Ok(Self(value));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        if body.is_empty() {
            Ok(Self(T::default()))
        } else {
            Err(AppError::BadRequest(
                "Form requests must have Content-Type: application/x-www-form-urlencoded".to_owned(),
            ))
        }
    }
}
