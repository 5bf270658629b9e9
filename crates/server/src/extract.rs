// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request body extraction.
//!
//! Issue fields arrive either as JSON or as an HTML form post. An empty body
//! is an empty field set, so `DELETE` with no body still reaches the store and
//! gets the usual "missing _id" answer.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use serde_json::json;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Extracts `T` from a JSON or form-encoded body.
#[derive(Debug, Clone, Default)]
pub struct Fields<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Fields<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            return match Form::<T>::from_request(req, state).await {
                Ok(Form(fields)) => Ok(Fields(fields)),
                Err(rejection) => Err(bad_request(rejection.body_text())),
            };
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Fields(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Fields)
            .map_err(|e| bad_request(e.to_string()))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}

/// A body that could not be parsed never reaches the store.
fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}
