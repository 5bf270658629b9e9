// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core issue types.
//!
//! This module contains the stored record ([`Issue`]), the field sets callers
//! submit to the store ([`NewIssue`], [`IssueUpdate`], [`IssueRef`]), and the
//! acknowledgement returned by mutating operations ([`Receipt`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The primary entity representing a tracked work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier within the project. Never changes.
    #[serde(rename = "_id")]
    pub id: String,
    /// Short description of the work.
    pub issue_title: String,
    /// Longer description providing context.
    pub issue_text: String,
    /// Who reported the issue.
    pub created_by: String,
    /// Person or queue this issue is assigned to. Empty when unassigned.
    pub assigned_to: String,
    /// Free-form status note. Empty when unset.
    pub status_text: String,
    /// When the issue was created.
    #[serde(with = "timestamp")]
    pub created_on: DateTime<Utc>,
    /// When the issue was last modified.
    #[serde(with = "timestamp")]
    pub updated_on: DateTime<Utc>,
    /// Whether the issue is still open.
    pub open: bool,
}

impl Issue {
    /// Returns true if `id` names this issue.
    pub fn has_id(&self, id: &str) -> bool {
        self.id == id
    }
}

/// Fields submitted when creating an issue.
///
/// The three required fields are optional here so that an incomplete request
/// can still be represented and rejected by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewIssue {
    #[serde(default)]
    pub issue_title: Option<String>,
    #[serde(default)]
    pub issue_text: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status_text: Option<String>,
}

impl NewIssue {
    /// Creates a field set carrying only the required fields.
    pub fn new(
        issue_title: impl Into<String>,
        issue_text: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        NewIssue {
            issue_title: Some(issue_title.into()),
            issue_text: Some(issue_text.into()),
            created_by: Some(created_by.into()),
            assigned_to: None,
            status_text: None,
        }
    }

    /// Sets the assignee (builder pattern).
    pub fn with_assigned_to(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = Some(assigned_to.into());
        self
    }

    /// Sets the status text (builder pattern).
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = Some(status_text.into());
        self
    }
}

/// Fields submitted when updating an issue.
///
/// String fields follow sparse-patch rules: an absent or empty value leaves
/// the stored field untouched. `open` is applied whenever it is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IssueUpdate {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub issue_title: Option<String>,
    #[serde(default)]
    pub issue_text: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_open")]
    pub open: Option<bool>,
}

impl IssueUpdate {
    /// Creates an update targeting `id` with no fields set.
    pub fn new(id: impl Into<String>) -> Self {
        IssueUpdate {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_issue_title(mut self, v: impl Into<String>) -> Self {
        self.issue_title = Some(v.into());
        self
    }

    pub fn with_issue_text(mut self, v: impl Into<String>) -> Self {
        self.issue_text = Some(v.into());
        self
    }

    pub fn with_created_by(mut self, v: impl Into<String>) -> Self {
        self.created_by = Some(v.into());
        self
    }

    pub fn with_assigned_to(mut self, v: impl Into<String>) -> Self {
        self.assigned_to = Some(v.into());
        self
    }

    pub fn with_status_text(mut self, v: impl Into<String>) -> Self {
        self.status_text = Some(v.into());
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Returns true if at least one field would be written by this update.
    pub fn has_changes(&self) -> bool {
        [
            &self.issue_title,
            &self.issue_text,
            &self.created_by,
            &self.assigned_to,
            &self.status_text,
        ]
        .into_iter()
        .any(|v| non_empty(v).is_some())
            || self.open.is_some()
    }

    /// Applies this update to `issue` following sparse-patch rules.
    ///
    /// Does not touch `updated_on`; the store owns timestamps.
    pub(crate) fn apply_to(&self, issue: &mut Issue) {
        if let Some(v) = non_empty(&self.issue_title) {
            issue.issue_title = v.to_string();
        }
        if let Some(v) = non_empty(&self.issue_text) {
            issue.issue_text = v.to_string();
        }
        if let Some(v) = non_empty(&self.created_by) {
            issue.created_by = v.to_string();
        }
        if let Some(v) = non_empty(&self.assigned_to) {
            issue.assigned_to = v.to_string();
        }
        if let Some(v) = non_empty(&self.status_text) {
            issue.status_text = v.to_string();
        }
        if let Some(open) = self.open {
            issue.open = open;
        }
    }
}

/// Identifies a single issue for deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IssueRef {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
}

impl IssueRef {
    pub fn new(id: impl Into<String>) -> Self {
        IssueRef {
            id: Some(id.into()),
        }
    }
}

/// What a successful mutating operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "successfully updated")]
    Updated,
    #[serde(rename = "successfully deleted")]
    Deleted,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Updated => "successfully updated",
            Outcome::Deleted => "successfully deleted",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Acknowledgement of a successful update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub result: Outcome,
    #[serde(rename = "_id")]
    pub id: String,
}

impl Receipt {
    pub fn updated(id: impl Into<String>) -> Self {
        Receipt {
            result: Outcome::Updated,
            id: id.into(),
        }
    }

    pub fn deleted(id: impl Into<String>) -> Self {
        Receipt {
            result: Outcome::Deleted,
            id: id.into(),
        }
    }
}

/// Returns the contained string if present and non-empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Accepts `open` as a JSON boolean or as the strings `"true"` / `"false"`
/// sent by form posts. An empty string counts as absent.
fn deserialize_open<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.as_str() {
            "" => Ok(None),
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid value for open: '{other}' (expected true or false)"
            ))),
        },
    }
}

/// Serde adapter rendering timestamps as RFC 3339 UTC with milliseconds,
/// e.g. `2026-10-17T09:30:00.000Z`.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(t: &DateTime<Utc>) -> String {
        t.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(t: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(t))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
