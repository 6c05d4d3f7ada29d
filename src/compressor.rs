//! Streaming target compression (C8): drive every model (and its tolerant
//! sub-model, if any) over the target sequence one symbol at a time, mixing
//! their per-model probabilities into a running entropy total.
//!
//! Two paths share the same per-symbol math (spec.md §4.8): a single-model,
//! no-sub-model fast path that skips the mixer entirely, and the general
//! multi-model path that always goes through [`crate::mixer::Mixer`] even
//! for a single model with a sub-model attached, since the sub-model's
//! enabled/disabled toggling already needs per-symbol weighting.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

use crate::context::{advance, advance_ir, ContextState, Geometry, Probe};
use crate::mixer::Mixer;
use crate::prob::{entropy, prob};
use crate::stmm::Stmm;
use crate::store::CounterStore;
use crate::symbol::map_byte;

/// A trained model ready to be queried during compression: its store, its
/// context geometry/state, whether it probes the IR mirror, and Laplace
/// parameters. Owns an optional tolerant sub-model.
pub struct CompressionModel {
    store: Box<dyn CounterStore>,
    geom: Geometry,
    state: ContextState,
    ir: bool,
    alpha: f64,
    s_alpha: f64,
    gamma: f64,
    /// A tolerant sub-model and the decay exponent the mixer should apply to
    /// its weight, paired together since a sub-model's own [`Stmm`] has no
    /// notion of mixing — that's the mixer's job, not the sub-model's.
    sub: Option<(Stmm<Box<dyn CounterStore>>, f64)>,
}

impl CompressionModel {
    pub fn new(
        store: Box<dyn CounterStore>,
        k: u8,
        ir: bool,
        alpha: f64,
        gamma: f64,
        sub: Option<(Stmm<Box<dyn CounterStore>>, f64)>,
    ) -> Self {
        let geom = Geometry::new(k);
        CompressionModel {
            store,
            state: ContextState::new(&geom),
            geom,
            ir,
            alpha,
            s_alpha: 4.0 * alpha,
            gamma,
            sub,
        }
    }

    fn freqs(&self, probe: &Probe) -> [u64; 4] {
        let mut f = [0u64; 4];
        for s in 0..4u8 {
            let mut v = self.store.query(probe.forward_addr(s));
            if self.ir {
                v += self.store.query(probe.ir_addr(&self.geom, s));
            }
            f[s as usize] = v;
        }
        f
    }

    /// Query this model's probability for `actual`, advance its context,
    /// and (if it has a sub-model) the sub-model's probability too. The
    /// third element is `true` exactly on the step where the sub-model
    /// transitions Disabled -> Enabled, signalling that the mixer must
    /// reset every weight to uniform (spec.md §4.5).
    fn step(&mut self, actual: u8) -> (f64, Option<f64>, bool) {
        let probe = if self.ir {
            Probe::with_ir(&self.geom, &self.state)
        } else {
            Probe::forward(&self.geom, &self.state)
        };
        let freqs = self.freqs(&probe);
        let p = prob(&freqs, actual, self.alpha, self.s_alpha);

        if self.ir {
            advance_ir(&self.geom, &mut self.state, &probe, actual);
        } else {
            advance(&self.geom, &mut self.state, &probe, actual);
        }

        match self.sub.as_mut() {
            Some((s, _)) => {
                let out = s.step(actual);
                (p, out.prob, out.just_reenabled)
            }
            None => (p, None, false),
        }
    }
}

/// The full set of trained models driving one compression run.
pub struct Compressor {
    models: Vec<CompressionModel>,
}

impl Compressor {
    pub fn new(models: Vec<CompressionModel>) -> Self {
        Compressor { models }
    }

    /// Stream `path`, computing the mixed-model average entropy (bits per
    /// symbol) across the target. Returns `0.0` for an empty target.
    pub fn average_entropy(&mut self, path: &Path) -> Result<f64> {
        let file =
            File::open(path).with_context(|| format!("opening target {}", path.display()))?;
        let reader = BufReader::new(file);

        // Fast path: exactly one model and no sub-model skips the mixer,
        // since there is nothing to mix.
        let fast_path = self.models.len() == 1 && self.models[0].sub.is_none();

        let mut gammas = Vec::new();
        if !fast_path {
            for m in &self.models {
                gammas.push(m.gamma);
                if let Some((_, sub_gamma)) = &m.sub {
                    gammas.push(*sub_gamma);
                }
            }
        }
        let mut mixer = (!fast_path).then(|| Mixer::new(gammas));

        let mut total_bits = 0.0f64;
        let mut n_symbols: u64 = 0;

        for byte in reader.bytes() {
            let b = byte.with_context(|| format!("reading target {}", path.display()))?;
            if b == b'\n' {
                continue;
            }
            let sym = map_byte(b);
            n_symbols += 1;

            if fast_path {
                let (p, _, _) = self.models[0].step(sym);
                total_bits += entropy(p);
                continue;
            }

            let mut probs = Vec::with_capacity(self.models.len() * 2);
            let mut any_reenabled = false;
            for m in self.models.iter_mut() {
                let (p, sub_p, reenabled) = m.step(sym);
                probs.push(Some(p));
                if m.sub.is_some() {
                    probs.push(sub_p);
                }
                any_reenabled |= reenabled;
            }
            let mixer = mixer.as_mut().unwrap();
            if any_reenabled {
                mixer.reset_uniform();
            }
            let mixed = mixer.update_and_mix(&probs);
            total_bits += entropy(mixed);
        }

        if n_symbols == 0 {
            return Ok(0.0);
        }
        Ok(total_bits / n_symbols as f64)
    }
}
