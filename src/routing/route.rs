//! Inbound route → upstream URL mapping.
//!
//! # Responsibilities
//! - Validate the `state` path parameter
//! - Build the upstream URL for each route
//!
//! # Design Decisions
//! - The parameter must be a whole integer; no prefix parsing
//! - Integers of any magnitude are accepted; the upstream owns the id space
//! - The forwarded id is the canonical decimal form, never the raw text
//! - The base URL's own path, if any, is kept as a prefix

use thiserror::Error;
use url::Url;

/// The two upstream resources the gateway exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamRoute {
    /// `GET /api/v1/states`
    States,
    /// `GET /api/v1/cities?state_id={state_id}`
    Cities { state_id: StateId },
}

/// A validated `state` id in canonical decimal form.
///
/// No sign for non-negative values, `-` otherwise, no leading zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateId(String);

impl StateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for StateId {
    fn from(id: i64) -> Self {
        StateId(id.to_string())
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `state` path parameter was not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("state id `{0}` is not an integer")]
pub struct InvalidStateId(pub String);

/// Parse the `state` path parameter.
///
/// Accepts an optional sign followed by one or more ASCII digits.
pub fn parse_state_id(raw: &str) -> Result<StateId, InvalidStateId> {
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidStateId(raw.to_string()));
    }

    let magnitude = digits.trim_start_matches('0');
    let canonical = match (negative, magnitude) {
        (_, "") => "0".to_string(),
        (true, m) => format!("-{m}"),
        (false, m) => m.to_string(),
    };
    Ok(StateId(canonical))
}

impl UpstreamRoute {
    /// Route label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            UpstreamRoute::States => "states",
            UpstreamRoute::Cities { .. } => "cities",
        }
    }

    /// Resolve this route against the upstream base URL.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);

        // http(s) URLs always carry a path, so this never fails for a validated base.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "v1", self.name()]);
        }

        if let UpstreamRoute::Cities { state_id } = self {
            url.query_pairs_mut()
                .append_pair("state_id", state_id.as_str());
        }

        url
    }
}
