// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! Free-text intake sanitization.
//!
//! The boundary the contact and investor-inquiry handlers push submitted
//! text through before it reaches the store: trim, strip control
//! characters, cap length. Intentionally conservative; rendering-side
//! escaping is the frontend's job.

/// Longest accepted free-text field, in characters.
pub const MAX_TEXT_LEN: usize = 5_000;

/// Clean one free-text field.
pub fn clean(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .take(MAX_TEXT_LEN)
        .collect()
}

/// Clean an optional field, mapping an empty result to `None`.
pub fn clean_opt(input: Option<String>) -> Option<String> {
    input.map(|s| clean(&s)).filter(|s| !s.is_empty())
}
