// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use uuid::Uuid;

/// Generate a random issue ID: a 128-bit token rendered as 32 lowercase hex chars.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generate an ID not already taken according to `exists`.
///
/// Collisions between random 128-bit tokens are not expected in practice; a
/// taken ID is simply drawn again.
pub fn generate_unique_id<F>(exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = generate_id();
        if !exists(&id) {
            return id;
        }
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
