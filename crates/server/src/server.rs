// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP server implementation.
//!
//! Routes `/api/issues/:project` to the issue store. Every logical outcome,
//! success or failure, is answered with status 200; clients tell them apart by
//! the presence of an `error` key in the JSON body.

use std::future::Future;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use it_core::{Filters, IssueRef, IssueUpdate, NewIssue};

use crate::error::Result;
use crate::extract::Fields;
use crate::state::AppState;

/// Body sent for a failed store operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl From<&it_core::Error> for ErrorBody {
    fn from(err: &it_core::Error) -> Self {
        ErrorBody {
            error: err.to_string(),
            id: err.id().map(str::to_string),
        }
    }
}

/// Builds the application router around `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/issues/:project",
            get(list_issues)
                .post(create_issue)
                .put(update_issue)
                .delete(delete_issue),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Listening on: {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn create_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Fields(fields): Fields<NewIssue>,
) -> Response {
    reply(state.create(&project, fields).await)
}

async fn list_issues(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let filters: Filters = pairs.into_iter().collect();
    Json(state.list(&project, &filters).await).into_response()
}

async fn update_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Fields(fields): Fields<IssueUpdate>,
) -> Response {
    reply(state.update(&project, fields).await)
}

async fn delete_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Fields(fields): Fields<IssueRef>,
) -> Response {
    reply(state.delete(&project, fields).await)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn reply<T: Serialize>(result: it_core::Result<T>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => Json(ErrorBody::from(&e)).into_response(),
    }
}
