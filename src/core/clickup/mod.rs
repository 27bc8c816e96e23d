//! ClickUp REST API: the request gateway and one module per resource.
//!
//! Every operation takes a [`Gateway`] by reference, so the same code runs
//! against the real API and against in-memory gateways in tests. Failures
//! propagate unchanged from the gateway.

mod client;
pub mod document;
pub mod folder;
pub mod list;
pub mod space;
pub mod task;
pub mod team;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{ApiVersion, ClickUpClient, DEFAULT_V2_URL, DEFAULT_V3_URL, Gateway, normalize_body};

use std::borrow::Cow;

/// Percent-encode an identifier for use as a path segment.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ids_are_untouched() {
        assert_eq!(segment("86a1b2c3"), "86a1b2c3");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(segment("a/b?c"), "a%2Fb%3Fc");
    }
}
