//! Unified error type for the Leafline client layer.

use leafline_wire::WireError;

/// Top-level error that wraps the crate-specific errors.
///
/// Unknown opcodes and stale character selections are not errors; they
/// show up as [`Dispatched::Ignored`](crate::Dispatched::Ignored) and
/// [`FieldEntry::StaleSelection`](crate::FieldEntry::StaleSelection).
#[derive(Debug, thiserror::Error)]
pub enum LeaflineError {
    /// A message did not decode. Fatal for that message; the connection
    /// owner decides whether to disconnect.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// Client configuration could not be parsed.
    #[error("invalid client config: {0}")]
    Config(#[from] serde_json::Error),
}
