//! Polymorphic counter-store layer (C2).
//!
//! Four storage variants share one contract — [`CounterStore::update`] /
//! [`CounterStore::query`] — so the context engine, probability kernel and
//! trainer never need to know which variant backs a given model. Dispatch
//! across variants is a short, declared-order match in
//! [`crate::modelspec::ModelSpec::cont`]: with at most four variants and a
//! handful of models per run, a `Box<dyn CounterStore>` (dynamic dispatch) is
//! the right trade — see `DESIGN.md`. The hot per-symbol loop stays
//! monomorphic *inside* each variant's `update`/`query`, which is where the
//! cost actually lives.

pub mod log_table8;
pub mod rng;
pub mod sketch8;
pub mod table32;
pub mod table64;

use std::io::{self, Read, Write};

/// Uniform contract implemented by all four counter-store variants.
///
/// `ctx` is always in `[0, 4^(k+1))` for the table variants; the sketch
/// variant accepts the same domain but hashes it down to `w` columns.
pub trait CounterStore: Send {
    /// Record one observation of `ctx`.
    fn update(&mut self, ctx: u64);

    /// Return the (possibly approximate) count associated with `ctx`.
    /// Never decreases except across a renormalization event.
    fn query(&self, ctx: u64) -> u64;

    /// Serialize the full counter array to `sink`, little-endian per cell.
    fn dump(&self, sink: &mut dyn Write) -> io::Result<()>;

    /// Overwrite this store's counters from `source`, previously produced by
    /// [`CounterStore::dump`] from a store of identical shape.
    fn load(&mut self, source: &mut dyn Read) -> io::Result<()>;
}

impl CounterStore for Box<dyn CounterStore> {
    fn update(&mut self, ctx: u64) {
        (**self).update(ctx)
    }

    fn query(&self, ctx: u64) -> u64 {
        (**self).query(ctx)
    }

    fn dump(&self, sink: &mut dyn Write) -> io::Result<()> {
        (**self).dump(sink)
    }

    fn load(&mut self, source: &mut dyn Read) -> io::Result<()> {
        (**self).load(source)
    }
}

pub use log_table8::LogTable8;
pub use sketch8::Sketch8;
pub use table32::Table32;
pub use table64::Table64;

use crate::error::EngineError;
use crate::modelspec::Container;

/// Build a boxed store of the variant `cont` dispatches to, for context
/// order `k` (tables) or shape `(w, d)` (sketch). `seed` feeds the store's
/// own [`rng::Xorshift64Star`] where one is used (the two probabilistic
/// variants); it is ignored by the exact variants.
pub fn build(cont: Container, k: u8, w: u64, d: u8, seed: u64) -> Result<Box<dyn CounterStore>, EngineError> {
    Ok(match cont {
        Container::Table64 => Box::new(Table64::new(k)?),
        Container::Table32 => Box::new(Table32::new(k)?),
        Container::LogTable8 => Box::new(LogTable8::new(k, seed)?),
        Container::Sketch8 => Box::new(Sketch8::new(w, d, seed)?),
    })
}
