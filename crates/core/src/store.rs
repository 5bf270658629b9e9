// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory issue table keyed by project.
//!
//! Each project holds its issues in insertion order. A project comes into
//! existence on its first successful create and is never removed; an unknown
//! project behaves exactly like an empty one on read.
//!
//! The store itself is not synchronized. Callers sharing it across tasks wrap
//! it in a lock and hold that lock for the whole of each operation.

use std::collections::HashMap;

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::filter::Filters;
use crate::id::generate_unique_id;
use crate::issue::{non_empty, Issue, IssueRef, IssueUpdate, NewIssue, Receipt};

/// The issue collection for every project.
pub struct IssueStore<C: Clock = SystemClock> {
    projects: HashMap<String, Vec<Issue>>,
    clock: C,
}

impl IssueStore<SystemClock> {
    /// Creates an empty store using the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for IssueStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> IssueStore<C> {
    /// Creates an empty store with a custom clock.
    pub fn with_clock(clock: C) -> Self {
        IssueStore {
            projects: HashMap::new(),
            clock,
        }
    }

    /// Creates an issue in `project` and returns the stored record.
    ///
    /// Fails without touching the store if any required field is missing or empty.
    pub fn create(&mut self, project: &str, fields: NewIssue) -> Result<Issue> {
        let (Some(issue_title), Some(issue_text), Some(created_by)) = (
            non_empty(&fields.issue_title),
            non_empty(&fields.issue_text),
            non_empty(&fields.created_by),
        ) else {
            return Err(Error::MissingRequiredFields);
        };

        let issues = self.projects.entry(project.to_string()).or_default();
        let id = generate_unique_id(|candidate| issues.iter().any(|i| i.has_id(candidate)));
        let now = self.clock.now();

        let issue = Issue {
            id,
            issue_title: issue_title.to_string(),
            issue_text: issue_text.to_string(),
            created_by: created_by.to_string(),
            assigned_to: fields.assigned_to.unwrap_or_default(),
            status_text: fields.status_text.unwrap_or_default(),
            created_on: now,
            updated_on: now,
            open: true,
        };
        issues.push(issue.clone());
        Ok(issue)
    }

    /// Returns the issues of `project` that satisfy every filter, in insertion order.
    pub fn list(&self, project: &str, filters: &Filters) -> Vec<Issue> {
        self.projects
            .get(project)
            .map(|issues| {
                issues
                    .iter()
                    .filter(|issue| filters.matches(issue))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Applies a sparse patch to one issue and refreshes its `updated_on`.
    pub fn update(&mut self, project: &str, fields: IssueUpdate) -> Result<Receipt> {
        let id = non_empty(&fields.id).ok_or(Error::MissingId)?.to_string();

        if !fields.has_changes() {
            return Err(Error::NoUpdateFields { id });
        }

        let now = self.clock.now();
        let Some(issue) = self.find_mut(project, &id) else {
            return Err(Error::CouldNotUpdate { id });
        };

        fields.apply_to(issue);
        // A clock stepping backwards must not break created_on <= updated_on.
        issue.updated_on = now.max(issue.created_on);

        Ok(Receipt::updated(id))
    }

    /// Removes one issue, keeping the remaining issues in order.
    pub fn delete(&mut self, project: &str, fields: IssueRef) -> Result<Receipt> {
        let id = non_empty(&fields.id).ok_or(Error::MissingId)?.to_string();

        let position = self
            .projects
            .get(project)
            .and_then(|issues| issues.iter().position(|i| i.has_id(&id)));

        match (position, self.projects.get_mut(project)) {
            (Some(index), Some(issues)) => {
                issues.remove(index);
                Ok(Receipt::deleted(id))
            }
            _ => Err(Error::CouldNotDelete { id }),
        }
    }

    /// Looks up a single issue.
    pub fn get(&self, project: &str, id: &str) -> Option<&Issue> {
        self.projects
            .get(project)
            .and_then(|issues| issues.iter().find(|i| i.has_id(id)))
    }

    /// Number of issues currently stored for `project`.
    pub fn len(&self, project: &str) -> usize {
        self.projects.get(project).map_or(0, Vec::len)
    }

    /// Returns true if no project holds any issue.
    pub fn is_empty(&self) -> bool {
        self.projects.values().all(Vec::is_empty)
    }

    /// Names of every project that has ever had an issue created.
    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    fn find_mut(&mut self, project: &str, id: &str) -> Option<&mut Issue> {
        self.projects
            .get_mut(project)
            .and_then(|issues| issues.iter_mut().find(|i| i.has_id(id)))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
