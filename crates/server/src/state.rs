// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server state management.
//!
//! Wraps the issue store for shared access from request handlers.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use it_core::{Filters, Issue, IssueRef, IssueStore, IssueUpdate, NewIssue, Receipt, Result};

/// Shared server state containing the issue store.
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Default)]
struct AppStateInner {
    /// The issue table. Reads share the lock; every mutation holds the write
    /// lock for its whole read-modify-write.
    store: RwLock<IssueStore>,
}

impl AppState {
    /// Creates state around an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, project: &str, fields: NewIssue) -> Result<Issue> {
        let result = self.inner.store.write().await.create(project, fields);
        match &result {
            Ok(issue) => debug!("Created issue {} in project {}", issue.id, project),
            Err(e) => debug!("Create in project {} rejected: {}", project, e),
        }
        result
    }

    pub async fn list(&self, project: &str, filters: &Filters) -> Vec<Issue> {
        let issues = self.inner.store.read().await.list(project, filters);
        debug!(
            "Listed {} issue(s) in project {} with {} filter(s)",
            issues.len(),
            project,
            filters.iter().count()
        );
        issues
    }

    pub async fn update(&self, project: &str, fields: IssueUpdate) -> Result<Receipt> {
        let result = self.inner.store.write().await.update(project, fields);
        match &result {
            Ok(receipt) => debug!("Updated issue {} in project {}", receipt.id, project),
            Err(e) => debug!("Update in project {} rejected: {}", project, e),
        }
        result
    }

    pub async fn delete(&self, project: &str, fields: IssueRef) -> Result<Receipt> {
        let result = self.inner.store.write().await.delete(project, fields);
        match &result {
            Ok(receipt) => debug!("Deleted issue {} from project {}", receipt.id, project),
            Err(e) => debug!("Delete in project {} rejected: {}", project, e),
        }
        result
    }

    /// Returns (project count, issue count) across the whole store.
    pub async fn totals(&self) -> (usize, usize) {
        let store = self.inner.store.read().await;
        let projects: Vec<&str> = store.projects().collect();
        let issues = projects.iter().map(|p| store.len(p)).sum();
        (projects.len(), issues)
    }
}
