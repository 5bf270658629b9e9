// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test server utilities and HTTP-level tests.
//!
//! Provides a TestServer that runs on a random port so requests travel over a
//! real socket, alongside in-process router tests for body parsing edge cases.

#![cfg(test)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::server;
use crate::state::AppState;

/// A test server that runs on a random port and can be controlled.
pub struct TestServer {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    state: AppState,
}

impl TestServer {
    /// Start a new test server on a random available port.
    pub async fn start() -> Self {
        let state = AppState::new();

        // Bind to port 0 to get a random available port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let state_clone = state.clone();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = server::run(listener, state_clone, shutdown).await {
                eprintln!("Test server error: {}", e);
            }
        });

        TestServer {
            addr,
            shutdown_tx,
            state,
        }
    }

    /// URL of the issue collection for `project`.
    pub fn issues_url(&self, project: &str) -> String {
        format!("http://{}/api/issues/{}", self.addr, project)
    }

    /// Get access to the server state for verification.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Shutdown the test server.
    pub fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use it_core::{Filters, Issue};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use yare::parameterized;

    const MAX_BODY: usize = 1 << 20;

    async fn create(client: &reqwest::Client, server: &TestServer, body: Value) -> Value {
        let response = client
            .post(server.issues_url("testproject"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }

    async fn list(client: &reqwest::Client, server: &TestServer, query: &[(&str, &str)]) -> Vec<Issue> {
        let response = client
            .get(server.issues_url("testproject"))
            .query(query)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }

    async fn send(
        client: &reqwest::Client,
        method: reqwest::Method,
        server: &TestServer,
        body: Value,
    ) -> Value {
        let response = client
            .request(method, server.issues_url("testproject"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }

    /// Drive the router in-process with a raw request.
    async fn oneshot(request: Request<Body>) -> (StatusCode, Value) {
        let app = server::router(AppState::new());
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), MAX_BODY).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_create_with_every_field() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let body = create(
            &client,
            &server,
            json!({
                "issue_title": "Test Title",
                "issue_text": "Test Text",
                "created_by": "Test Creator",
                "assigned_to": "Test Assignee",
                "status_text": "In Progress",
            }),
        )
        .await;

        assert_eq!(body["issue_title"], "Test Title");
        assert_eq!(body["issue_text"], "Test Text");
        assert_eq!(body["created_by"], "Test Creator");
        assert_eq!(body["assigned_to"], "Test Assignee");
        assert_eq!(body["status_text"], "In Progress");
        assert_eq!(body["open"], true);
        assert!(body["_id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(body["created_on"], body["updated_on"]);

        server.shutdown();
    }

    #[tokio::test]
    async fn test_create_with_only_required_fields() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let body = create(
            &client,
            &server,
            json!({
                "issue_title": "Required Title",
                "issue_text": "Required Text",
                "created_by": "Required Creator",
            }),
        )
        .await;

        assert_eq!(body["assigned_to"], "");
        assert_eq!(body["status_text"], "");
        assert_eq!(body["open"], true);

        server.shutdown();
    }

    #[tokio::test]
    async fn test_create_with_missing_required_fields() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let body = create(
            &client,
            &server,
            json!({ "issue_title": "", "issue_text": "", "created_by": "" }),
        )
        .await;

        assert_eq!(body, json!({ "error": "required field(s) missing" }));
        assert!(list(&client, &server, &[]).await.is_empty());

        server.shutdown();
    }

    #[tokio::test]
    async fn test_view_unseen_project() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let response = client
            .get(server.issues_url("nobody-here"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!([]));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_view_with_filters() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let first = create(
            &client,
            &server,
            json!({ "issue_title": "a", "issue_text": "a", "created_by": "Test Creator" }),
        )
        .await;
        let closed = create(
            &client,
            &server,
            json!({ "issue_title": "b", "issue_text": "b", "created_by": "Test Creator" }),
        )
        .await;
        create(
            &client,
            &server,
            json!({ "issue_title": "c", "issue_text": "c", "created_by": "Someone Else" }),
        )
        .await;
        send(
            &client,
            reqwest::Method::PUT,
            &server,
            json!({ "_id": closed["_id"], "open": false }),
        )
        .await;

        let all = list(&client, &server, &[]).await;
        assert_eq!(all.len(), 3);

        let open = list(&client, &server, &[("open", "true")]).await;
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|issue| issue.open));

        let both = list(
            &client,
            &server,
            &[("open", "true"), ("created_by", "Test Creator")],
        )
        .await;
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, first["_id"].as_str().unwrap());

        let shut = list(&client, &server, &[("open", "false")]).await;
        assert_eq!(shut.len(), 1);
        assert_eq!(shut[0].id, closed["_id"].as_str().unwrap());

        let unknown = list(&client, &server, &[("priority", "undefined")]).await;
        assert!(unknown.is_empty());

        server.shutdown();
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let created = create(
            &client,
            &server,
            json!({ "issue_title": "t", "issue_text": "x", "created_by": "c" }),
        )
        .await;
        let listed: Value = client
            .get(server.issues_url("testproject"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(listed, json!([created]));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_update_one_field() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let created = create(
            &client,
            &server,
            json!({ "issue_title": "Test Title", "issue_text": "Test Text", "created_by": "c" }),
        )
        .await;
        let id = created["_id"].as_str().unwrap().to_string();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let body = send(
            &client,
            reqwest::Method::PUT,
            &server,
            json!({ "_id": id, "issue_text": "Updated Text" }),
        )
        .await;
        assert_eq!(body, json!({ "result": "successfully updated", "_id": id }));

        let stored = list(&client, &server, &[("_id", id.as_str())]).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].issue_text, "Updated Text");
        assert_eq!(stored[0].issue_title, "Test Title");
        assert!(stored[0].updated_on > stored[0].created_on);

        server.shutdown();
    }

    #[tokio::test]
    async fn test_update_errors() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let created = create(
            &client,
            &server,
            json!({ "issue_title": "t", "issue_text": "x", "created_by": "c" }),
        )
        .await;
        let id = created["_id"].clone();

        let missing = send(
            &client,
            reqwest::Method::PUT,
            &server,
            json!({ "issue_text": "Updated Text" }),
        )
        .await;
        assert_eq!(missing, json!({ "error": "missing _id" }));

        let nothing = send(&client, reqwest::Method::PUT, &server, json!({ "_id": id })).await;
        assert_eq!(nothing, json!({ "error": "no update field(s) sent", "_id": id }));

        let invalid = send(
            &client,
            reqwest::Method::PUT,
            &server,
            json!({ "_id": "invalid_id", "issue_text": "Updated Text" }),
        )
        .await;
        assert_eq!(invalid, json!({ "error": "could not update", "_id": "invalid_id" }));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_delete() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let created = create(
            &client,
            &server,
            json!({ "issue_title": "Delete Title", "issue_text": "Delete Text", "created_by": "c" }),
        )
        .await;
        let id = created["_id"].clone();

        let deleted = send(&client, reqwest::Method::DELETE, &server, json!({ "_id": id })).await;
        assert_eq!(deleted, json!({ "result": "successfully deleted", "_id": id }));
        assert!(list(&client, &server, &[]).await.is_empty());

        let again = send(&client, reqwest::Method::DELETE, &server, json!({ "_id": id })).await;
        assert_eq!(again, json!({ "error": "could not delete", "_id": id }));

        let invalid = send(
            &client,
            reqwest::Method::DELETE,
            &server,
            json!({ "_id": "invalid_id" }),
        )
        .await;
        assert_eq!(invalid, json!({ "error": "could not delete", "_id": "invalid_id" }));

        let missing = send(&client, reqwest::Method::DELETE, &server, json!({})).await;
        assert_eq!(missing, json!({ "error": "missing _id" }));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_concurrent_creates_all_land() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let mut handles = Vec::new();
        for n in 0..32 {
            let client = client.clone();
            let url = server.issues_url("testproject");
            handles.push(tokio::spawn(async move {
                let body: Value = client
                    .post(url)
                    .json(&json!({ "issue_title": format!("t{n}"), "issue_text": "x", "created_by": "c" }))
                    .send()
                    .await
                    .unwrap()
                    .json()
                    .await
                    .unwrap();
                body["_id"].as_str().unwrap().to_string()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);

        let stored = server.state().list("testproject", &Filters::new()).await;
        assert_eq!(stored.len(), 32);

        server.shutdown();
    }

    #[tokio::test]
    async fn test_form_encoded_bodies() {
        let server = TestServer::start().await;
        let client = reqwest::Client::new();

        let created: Value = client
            .post(server.issues_url("testproject"))
            .form(&[
                ("issue_title", "Form Title"),
                ("issue_text", "Form Text"),
                ("created_by", "Form Creator"),
                ("assigned_to", ""),
            ])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(created["issue_title"], "Form Title");
        assert_eq!(created["assigned_to"], "");
        let id = created["_id"].as_str().unwrap().to_string();

        let updated: Value = client
            .put(server.issues_url("testproject"))
            .form(&[("_id", id.as_str()), ("issue_title", ""), ("open", "false")])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(updated, json!({ "result": "successfully updated", "_id": id }));

        let stored = list(&client, &server, &[("_id", id.as_str())]).await;
        assert_eq!(stored[0].issue_title, "Form Title");
        assert!(!stored[0].open);

        server.shutdown();
    }

    #[tokio::test]
    async fn test_delete_without_body_is_missing_id() {
        let (status, body) = oneshot(
            Request::delete("/api/issues/testproject")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "missing _id" }));
    }

    #[parameterized(
        malformed_json = { "application/json", "{not json" },
        wrong_type = { "application/json", r#"{"_id": "a", "open": "maybe"}"# },
        bad_form = { "application/x-www-form-urlencoded", "_id=a&open=maybe" },
    )]
    #[test_macro(tokio::test)]
    async fn test_unparsable_body_is_rejected(content_type: &str, payload: &str) {
        let (status, body) = oneshot(
            Request::put("/api/issues/testproject")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = oneshot(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
