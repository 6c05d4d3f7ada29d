//! Compile-time configuration constants.
//!
//! These mirror the role of a C `*conf.h` header: thresholds that pick a
//! counter-store variant for a given context order, and tuning constants for
//! the probabilistic (Morris / sketch) stores. They are not meant to be
//! runtime-tunable — changing the store-variant thresholds changes memory
//! behaviour for every model built afterwards, so they are `pub const`s
//! rather than fields on [`crate::modelspec::ModelSpec`].

/// Largest context order still served by an exact 64-bit table
/// ([`crate::store::table64::Table64`]). A table at this order already
/// holds `4^(k+1)` `u64` counters, so this is chosen so that worst case
/// (`K_MAX_TABLE64` itself) stays within a few hundred MB.
pub const K_MAX_TABLE64: u8 = 11;

/// Largest context order served by the renormalizing 32-bit table
/// ([`crate::store::table32::Table32`]) before falling back to the
/// logarithmic 8-bit table.
pub const K_MAX_TABLE32: u8 = 13;

/// Largest context order served by the logarithmic 8-bit (Morris) table
/// ([`crate::store::log_table8::LogTable8`]) before falling back to the
/// count-min-log sketch, which no longer allocates `O(4^(k+1))` memory.
pub const K_MAX_LOG_TABLE8: u8 = 14;

/// Hard ceiling on context order accepted by [`crate::modelspec`] parsing.
/// `u64` context integers need `2*(k+1)` bits, so `k <= 28` keeps every
/// context comfortably inside 58 bits.
pub const K_MAX: u8 = 28;

/// Default logarithmic base used by [`crate::store::log_table8::LogTable8`]
/// and [`crate::store::sketch8::Sketch8`] Morris counters. Chosen so that a
/// saturated 8-bit cell (255) maps to an estimated count in the low
/// billions, covering the dynamic range expected from whole-genome
/// references while keeping single-digit counts resolvable.
pub const MORRIS_BASE: f64 = 1.08;

/// Default sketch depth (number of hash rows) for
/// [`crate::store::sketch8::Sketch8`] when a model spec doesn't override it.
pub const SKETCH_DEPTH_DEFAULT: u8 = 4;

/// Default number of reference-training worker threads when the caller
/// doesn't request a specific count. See [`crate::util::count_cores`].
pub const NTHR_DEFAULT: usize = 4;

/// Number of symbols in the DNA alphabet. Fixed throughout the engine;
/// context/frequency arrays are always indexed `0..CARDINALITY`.
pub const CARDINALITY: usize = 4;

/// Default sketch width used when a model spec resolves to
/// [`crate::modelspec::Container::Sketch8`] via the plain (non-sketch-sizing)
/// tuple form, i.e. no explicit `w_log2`/`d` were given. Must stay a power
/// of two (spec.md §4.2).
pub const SKETCH_WIDTH_DEFAULT: u64 = 1 << 20;
