// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Equality filters for listing issues.
//!
//! A filter is a `key=value` pair taken from a query string. The key is
//! resolved against a fixed set of issue fields and the field's string form
//! is compared exactly with the value:
//!
//! ```text
//! open=true                 # open issues
//! created_by=alice          # reported by alice
//! open=false&assigned_to=bob
//! ```
//!
//! Keys that do not name a filterable field never match, so a query using
//! one yields no issues.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::issue::{timestamp, Issue};

/// Issue fields that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Id,
    IssueTitle,
    IssueText,
    CreatedBy,
    AssignedTo,
    StatusText,
    CreatedOn,
    UpdatedOn,
    Open,
}

impl FilterField {
    /// Returns the key used for this field in query strings and JSON bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Id => "_id",
            FilterField::IssueTitle => "issue_title",
            FilterField::IssueText => "issue_text",
            FilterField::CreatedBy => "created_by",
            FilterField::AssignedTo => "assigned_to",
            FilterField::StatusText => "status_text",
            FilterField::CreatedOn => "created_on",
            FilterField::UpdatedOn => "updated_on",
            FilterField::Open => "open",
        }
    }

    /// Returns the string form of this field on `issue`.
    pub fn value_of<'a>(&self, issue: &'a Issue) -> Cow<'a, str> {
        match self {
            FilterField::Id => Cow::Borrowed(&issue.id),
            FilterField::IssueTitle => Cow::Borrowed(&issue.issue_title),
            FilterField::IssueText => Cow::Borrowed(&issue.issue_text),
            FilterField::CreatedBy => Cow::Borrowed(&issue.created_by),
            FilterField::AssignedTo => Cow::Borrowed(&issue.assigned_to),
            FilterField::StatusText => Cow::Borrowed(&issue.status_text),
            FilterField::CreatedOn => Cow::Owned(timestamp::format(&issue.created_on)),
            FilterField::UpdatedOn => Cow::Owned(timestamp::format(&issue.updated_on)),
            FilterField::Open => Cow::Borrowed(if issue.open { "true" } else { "false" }),
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a key does not name a filterable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl FromStr for FilterField {
    type Err = UnknownField;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "_id" => Ok(FilterField::Id),
            "issue_title" => Ok(FilterField::IssueTitle),
            "issue_text" => Ok(FilterField::IssueText),
            "created_by" => Ok(FilterField::CreatedBy),
            "assigned_to" => Ok(FilterField::AssignedTo),
            "status_text" => Ok(FilterField::StatusText),
            "created_on" => Ok(FilterField::CreatedOn),
            "updated_on" => Ok(FilterField::UpdatedOn),
            "open" => Ok(FilterField::Open),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// A single equality constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// `None` when the key named no filterable field.
    field: Option<FilterField>,
    key: String,
    value: String,
}

impl Filter {
    /// Builds a filter from a raw query-string pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        Filter {
            field: key.parse().ok(),
            key,
            value: value.into(),
        }
    }

    pub fn field(&self) -> Option<FilterField> {
        self.field
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        match self.field {
            Some(field) => field.value_of(issue) == self.value,
            None => false,
        }
    }
}

/// A conjunction of filters. Empty means "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(Vec<Filter>);

impl Filters {
    pub fn new() -> Self {
        Filters(Vec::new())
    }

    /// Adds a constraint (builder pattern).
    pub fn and(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push(Filter::new(key, value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.0.iter()
    }

    /// Returns true if `issue` satisfies every filter.
    pub fn matches(&self, issue: &Issue) -> bool {
        self.0.iter().all(|f| f.matches(issue))
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Filters(iter.into_iter().map(|(k, v)| Filter::new(k, v)).collect())
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
