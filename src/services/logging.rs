// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Logging setup and helpers for keeping shopper input out of logs.

use tracing_subscriber::EnvFilter;

/// Longest prefix of a search term written to logs.
const MAX_LOGGED_TERM_CHARS: usize = 32;

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,catalog_search=info".into()),
        )
        .init();
}

/// Summarize a search term for logging.
/// Keeps a bounded prefix and the total length: "red cotton…(41 chars)"
pub fn summarize_term(term: &str) -> String {
    let total = term.chars().count();
    if total <= MAX_LOGGED_TERM_CHARS {
        return term.to_string();
    }
    let prefix: String = term.chars().take(MAX_LOGGED_TERM_CHARS).collect();
    format!("{}…({} chars)", prefix, total)
}
