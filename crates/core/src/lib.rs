// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! it-core: Shared library for the issue tracker service
//!
//! This crate provides the issue record types, the per-project in-memory
//! issue store, list filters, and ID generation used by the HTTP server.

pub mod clock;
pub mod error;
pub mod filter;
pub mod id;
pub mod issue;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use error::{Error, ErrorKind, Result};
pub use filter::{Filter, FilterField, Filters};
pub use issue::{Issue, IssueRef, IssueUpdate, NewIssue, Outcome, Receipt};
pub use store::IssueStore;
