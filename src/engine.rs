//! Top-level engine: wires a parsed model spec to trained stores, trains
//! them against a reference, and drives the compressor over a target.
//!
//! This is the crate's single external entry point — the CLI
//! ([`crate::main`](../../src/main.rs)) and any embedding caller should only
//! ever need [`Engine::build`] and [`Engine::average_entropy`].

use std::path::Path;

use anyhow::Result;

use crate::compressor::{CompressionModel, Compressor};
use crate::context::Geometry;
use crate::modelspec::{self, ModelSpec};
use crate::store::{self, rng::Xorshift64Star};
use crate::trainer::{self, TrainUnit};

pub struct Engine {
    compressor: Compressor,
}

impl Engine {
    /// Parse `spec`, allocate and train every model (and sub-model) against
    /// the reference at `ref_path`, bounding training concurrency to `nthr`
    /// threads. `seed` seeds every probabilistic store deterministically —
    /// the same `(spec, ref_path, seed)` always trains bit-identical
    /// sketches and log-tables.
    pub fn build(spec: &str, ref_path: &Path, nthr: usize, seed: u64) -> Result<Self> {
        let specs = modelspec::parse(spec)?;

        let mut seeder = Xorshift64Star::new(seed);
        let mut stores = Vec::with_capacity(specs.len());
        let mut sub_stores = Vec::with_capacity(specs.len());
        for m in &specs {
            stores.push(store::build(m.cont, m.k, m.w, m.d, seeder.next_u64())?);
            sub_stores.push(match &m.child {
                Some(child) => {
                    let cont = modelspec::dispatch(child.k);
                    Some(store::build(
                        cont,
                        child.k,
                        crate::config::SKETCH_WIDTH_DEFAULT,
                        crate::config::SKETCH_DEPTH_DEFAULT,
                        seeder.next_u64(),
                    )?)
                }
                None => None,
            });
        }

        train(&specs, &mut stores, &mut sub_stores, ref_path, nthr)?;

        let models = assemble(specs, stores, sub_stores);
        Ok(Engine {
            compressor: Compressor::new(models),
        })
    }

    /// Average entropy (bits/symbol) of the target at `path` under the
    /// trained models, mixed per spec.md §4.8.
    pub fn average_entropy(&mut self, path: &Path) -> Result<f64> {
        self.compressor.average_entropy(path)
    }
}

fn train(
    specs: &[ModelSpec],
    stores: &mut [Box<dyn store::CounterStore>],
    sub_stores: &mut [Option<Box<dyn store::CounterStore>>],
    ref_path: &Path,
    nthr: usize,
) -> Result<()> {
    let mut units = Vec::with_capacity(specs.len() * 2);
    for (m, s) in specs.iter().zip(stores.iter_mut()) {
        units.push(TrainUnit::new(s.as_mut(), Geometry::new(m.k)));
    }
    for (m, sub) in specs.iter().zip(sub_stores.iter_mut()) {
        if let (Some(child), Some(cs)) = (&m.child, sub) {
            units.push(TrainUnit::new(cs.as_mut(), Geometry::new(child.k)));
        }
    }
    trainer::train_all(&mut units, ref_path, nthr)
}

fn assemble(
    specs: Vec<ModelSpec>,
    stores: Vec<Box<dyn store::CounterStore>>,
    sub_stores: Vec<Option<Box<dyn store::CounterStore>>>,
) -> Vec<CompressionModel> {
    specs
        .iter()
        .zip(stores)
        .zip(sub_stores)
        .map(|((m, store), sub_store)| {
            let sub = match (&m.child, sub_store) {
                (Some(child), Some(cs)) => {
                    let geom = Geometry::new(child.k);
                    let stmm = crate::stmm::Stmm::new(cs, geom, m.ir, child.alpha, child.thresh);
                    Some((stmm, child.gamma))
                }
                _ => None,
            };
            CompressionModel::new(store, m.k, m.ir, m.alpha, m.gamma, sub)
        })
        .collect()
}
