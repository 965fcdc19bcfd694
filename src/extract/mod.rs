//! HTML export dump → ticket records.
//!
//! The pipeline runs in two passes. [`normalize`] throws away everything that
//! cannot hold ticket data and rebuilds a small document with one container
//! per ticket component. [`extract_tickets`] then walks those containers and
//! reads the ticket id and field values out of them. Both passes are pure
//! functions over their input, so calls can run on any thread concurrently.

mod extractor;
mod markers;
mod normalize;

use thiserror::Error;
use tracing::debug;

use crate::domain::ticket::Ticket;

pub use extractor::extract_tickets;
pub use markers::{ALLOWED_ATTRIBUTES, COMPONENT_ID_PREFIX, IGNORED_PANEL_ID};
pub use normalize::normalize;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to parse HTML: {0}")]
    Parse(String),
}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Normalize `html` and extract its tickets, deduplicated by ticket id.
pub fn extract(html: &str) -> ExtractResult<Vec<Ticket>> {
    let normalized = normalize(html)?;
    debug!(
        input_bytes = html.len(),
        normalized_bytes = normalized.len(),
        "normalized document"
    );
    extract_tickets(&normalized)
}

/// Same as [`extract`] for raw bytes, which must be valid UTF-8.
pub fn extract_bytes(bytes: &[u8]) -> ExtractResult<Vec<Ticket>> {
    let html = std::str::from_utf8(bytes)
        .map_err(|err| ExtractError::Parse(format!("input is not valid UTF-8: {err}")))?;
    extract(html)
}
