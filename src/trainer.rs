//! Parallel per-model training (C7): stream the reference once per model
//! (and once per attached tolerant sub-model), independently, bounding
//! concurrency to `nthr` worker threads.
//!
//! Grounded on the teacher's `threadpool.rs`, which wraps a
//! `rayon::ThreadPool` to bound concurrency the way the LZ4 reference's
//! `TPool` does. Training has no queueing or backpressure to model — every
//! unit is one independent, equally-sized pass over the reference — so a
//! scoped `ThreadPoolBuilder::build()` + `par_iter_mut()` captures the same
//! "bounded worker count" idea without `threadpool.rs`'s bounded-channel
//! semaphore, which exists there to mirror the C queue-size parameter this
//! crate has no equivalent of.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::context::{advance, ContextState, Geometry, Probe};
use crate::store::CounterStore;
use crate::symbol::map_byte;

/// One store to train against the reference, independent of every other
/// unit. A model contributes one unit for its own store and, if it has a
/// tolerant sub-model, one more for the sub-model's store — training never
/// distinguishes the two, and never branches on `ir` (SPEC_FULL.md
/// Supplemented Feature #1): every context, forward or inverted-repeat
/// mirrored, is reachable from the same forward-trained table at query
/// time, so forward-only training serves both.
pub struct TrainUnit<'a> {
    pub store: &'a mut dyn CounterStore,
    pub geom: Geometry,
}

impl<'a> TrainUnit<'a> {
    pub fn new(store: &'a mut dyn CounterStore, geom: Geometry) -> Self {
        TrainUnit { store, geom }
    }
}

/// Stream `path` once per unit, advancing that unit's own rolling forward
/// context and incrementing its own store. `nthr` concurrent streams are
/// allowed at once.
pub fn train_all(units: &mut [TrainUnit<'_>], path: &Path, nthr: usize) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(nthr.max(1))
        .build()
        .context("failed to build training thread pool")?;

    pool.install(|| units.par_iter_mut().try_for_each(|unit| train_one(unit, path)))
}

fn train_one(unit: &mut TrainUnit<'_>, path: &Path) -> Result<()> {
    let file =
        File::open(path).with_context(|| format!("opening reference {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut state = ContextState::new(&unit.geom);

    for byte in reader.bytes() {
        let b = byte.with_context(|| format!("reading reference {}", path.display()))?;
        if b == b'\n' {
            continue;
        }
        let sym = map_byte(b);
        let probe = Probe::forward(&unit.geom, &state);
        unit.store.update(probe.forward_addr(sym));
        advance(&unit.geom, &mut state, &probe, sym);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Table64;
    use tempfile::NamedTempFile;
    use std::io::Write as _;

    fn write_reference(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn trains_a_single_model_forward_only() {
        let f = write_reference("ACGT\nACGT\n");
        let geom = Geometry::new(1);
        let mut store = Table64::new(1).unwrap();
        {
            let mut units = [TrainUnit::new(&mut store, geom)];
            train_all(&mut units, f.path(), 1).unwrap();
        }
        // ctx after "A" is always followed by "C": two training passes see
        // that transition twice.
        let mut state = ContextState::new(&geom);
        let probe = Probe::forward(&geom, &state);
        advance(&geom, &mut state, &probe, 0); // consume 'A'
        let probe_after_a = Probe::forward(&geom, &state);
        assert_eq!(store.query(probe_after_a.forward_addr(1)), 2);
    }

    #[test]
    fn trains_multiple_units_concurrently() {
        let f = write_reference("ACGTACGTACGT");
        let geom1 = Geometry::new(1);
        let geom2 = Geometry::new(2);
        let mut s1 = Table64::new(1).unwrap();
        let mut s2 = Table64::new(2).unwrap();
        {
            let mut units = [TrainUnit::new(&mut s1, geom1), TrainUnit::new(&mut s2, geom2)];
            train_all(&mut units, f.path(), 2).unwrap();
        }
        let total1: u64 = (0..s1.len() as u64).map(|c| s1.query(c)).sum();
        let total2: u64 = (0..s2.len() as u64).map(|c| s2.query(c)).sum();
        assert!(total1 > 0);
        assert!(total2 > 0);
    }

    #[test]
    fn newlines_are_filtered_out_of_the_symbol_stream() {
        let f = write_reference("AC\nGT");
        let geom = Geometry::new(3);
        let mut store = Table64::new(3).unwrap();
        let mut units = [TrainUnit::new(&mut store, geom)];
        train_all(&mut units, f.path(), 1).unwrap();
        // A context advance per '\n' would have shifted every downstream
        // context by one slot relative to the ungapped sequence "ACGT".
        let total: u64 = (0..store.len() as u64).map(|c| store.query(c)).sum();
        assert_eq!(total, 4);
    }
}
