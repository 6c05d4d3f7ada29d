//! Crate-specific error types.
//!
//! [`EngineError`] covers every failure mode that is a property of the
//! engine's own inputs (a malformed model spec, an out-of-range `k`, an
//! invalid sketch shape) rather than the surrounding environment.
//! It is deliberately a small, inspectable enum in the same spirit as the
//! teacher crate's `Lz4Error` — callers that only care about "did it work"
//! use `anyhow::Result` at the API boundary ([`crate::engine::Engine`]); the
//! distinction matters for configuration errors the caller may want to
//! report back to a user without string-matching.

use std::fmt;

/// Errors raised while parsing a model spec or constructing a model's
/// counter store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The model spec DSL (spec.md §4.9 / §6) could not be parsed.
    MalformedSpec {
        /// The offending `Mi` field (one model/submodel group), verbatim.
        field: String,
        /// Short, human-readable reason.
        reason: String,
    },
    /// A context order `k` fell outside `1..=K_MAX`.
    InvalidContextOrder(u8),
    /// `alpha` fell outside `(0, 1]`.
    InvalidAlpha(f64),
    /// `gamma` fell outside `[0, 1]`.
    InvalidGamma(f64),
    /// Sketch width wasn't a positive power of two, or depth was zero.
    InvalidSketchShape {
        /// Requested width.
        width: u64,
        /// Requested depth.
        depth: u8,
    },
    /// A counter store could not be allocated at the requested size.
    Allocation {
        /// Number of cells that allocation was attempted for.
        cells: u64,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MalformedSpec { field, reason } => {
                write!(f, "malformed model spec field \"{field}\": {reason}")
            }
            EngineError::InvalidContextOrder(k) => {
                write!(f, "context order k={k} is out of range (1..={})", crate::config::K_MAX)
            }
            EngineError::InvalidAlpha(a) => write!(f, "alpha={a} is out of range (0, 1]"),
            EngineError::InvalidGamma(g) => write!(f, "gamma={g} is out of range [0, 1]"),
            EngineError::InvalidSketchShape { width, depth } => write!(
                f,
                "sketch shape width={width} depth={depth} is invalid (width must be a power of two, depth must be > 0)"
            ),
            EngineError::Allocation { cells } => {
                write!(f, "failed to allocate a counter store of {cells} cells")
            }
        }
    }
}

impl std::error::Error for EngineError {}
