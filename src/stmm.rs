//! Tolerant sub-models (C5): a second, usually lower-order, counter store
//! attached to a parent model that can be switched off when its recent
//! predictions stop matching the target.
//!
//! A sub-model's own store is trained exactly like a top-level model's (see
//! [`crate::trainer`]) — tolerance only changes how the sub-model is *read*
//! during compression. The state machine is the one spec.md §4.5 spells out
//! literally, not a continuously-recomputed popcount over a fixed window:
//! `history` only accumulates while the sub-model is enabled (one bit per
//! step, 1 = miss), is compared against `thresh` on every miss, and is reset
//! to zero exactly when a disable transition fires. While disabled, history
//! stays frozen at zero and no bits are pushed at all — only the "is the
//! current symbol the unique argmax" re-enable test runs.
//!
//! | entering step | leaving step | probability fed to mixer | context advances with |
//! |---|---|---|---|
//! | enabled  | enabled  | `Some(p)` | predicted symbol |
//! | enabled  | disabled | `0.0` (disable-transition step) | actual symbol |
//! | disabled | disabled | `None`    | actual symbol |
//! | disabled | enabled  | `Some(p)` (re-enable-transition step, signals a mixer weight reset) | predicted symbol |

use crate::context::{advance, advance_ir, ContextState, Geometry, Probe};
use crate::prob::prob;
use crate::store::CounterStore;
use crate::symbol::Symbol;

/// Plain `argmax` over four frequencies: the first index attaining the
/// maximum, no tie handling. This is the prediction used by the `Enabled`
/// branch (spec.md §4.5 step 3) — on an untrained, all-zero context every
/// frequency ties at zero, and that must still yield a usable prediction
/// rather than an automatic miss.
pub fn best_sym(freqs: &[u64; 4]) -> u8 {
    let mut best = 0u8;
    let mut max = freqs[0];
    for i in 1..4u8 {
        if freqs[i as usize] > max {
            max = freqs[i as usize];
            best = i;
        }
    }
    best
}

/// `argmax` over four frequencies, with a sentinel on ties. Spec.md calls
/// the sentinel `best_sym_abs` to distinguish it from a real base index:
/// `255` can never collide with a [`Symbol`], which is always `0..4`. Used
/// only by the `Disabled` branch's re-enable test (spec.md §4.5), which
/// requires a *unique* matching argmax.
pub fn best_sym_abs(freqs: &[u64; 4]) -> u8 {
    let max = *freqs.iter().max().unwrap();
    let mut count = 0u32;
    let mut best = 0u8;
    for (i, &f) in freqs.iter().enumerate() {
        if f == max {
            count += 1;
            best = i as u8;
        }
    }
    if count > 1 {
        255
    } else {
        best
    }
}

/// Outcome of one [`Stmm::step`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StmmStep {
    /// The probability to feed the mixer for this symbol: `Some(p)` in
    /// every state except "still disabled" (spec.md §4.5's `Disabled` case
    /// with a non-matching symbol, which contributes a flat `0.0` that is
    /// represented the same as a normal `Some(0.0)` would be — see
    /// `just_reenabled` for the one case that needs special handling by the
    /// mixer). `None` only when the sub-model entered this step disabled and
    /// stayed disabled.
    pub prob: Option<f64>,
    /// Set on exactly the step where the sub-model transitions
    /// Disabled -> Enabled. Per spec.md §4.5 this resets every mixture
    /// weight to uniform, which is the mixer's responsibility, not this
    /// sub-model's — callers must forward this flag to
    /// [`crate::mixer::Mixer::reset_uniform`].
    pub just_reenabled: bool,
}

/// A tolerant sub-model: its own counter store, context pair and weighted
/// enabled/disabled state machine.
pub struct Stmm<S> {
    store: S,
    geom: Geometry,
    state: ContextState,
    ir: bool,
    alpha: f64,
    s_alpha: f64,
    thresh: u8,
    /// Sliding bit register, 1 = miss, newest bit at position 0. Only
    /// pushed to while enabled; frozen at zero across the whole disabled
    /// interval (spec.md §4.5).
    history: u64,
    enabled: bool,
}

impl<S: CounterStore> Stmm<S> {
    /// Wrap an already-trained store as a tolerant sub-model. `thresh` is
    /// the miss-popcount threshold: a disable transition fires the first
    /// time `popcount(history) > thresh` after a miss is pushed.
    pub fn new(store: S, geom: Geometry, ir: bool, alpha: f64, thresh: u8) -> Self {
        Stmm {
            store,
            geom,
            state: ContextState::new(&geom),
            ir,
            alpha,
            s_alpha: 4.0 * alpha,
            thresh,
            history: 0,
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
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

    fn advance_with(&mut self, probe: &Probe, sym: Symbol) {
        if self.ir {
            advance_ir(&self.geom, &mut self.state, probe, sym);
        } else {
            advance(&self.geom, &mut self.state, probe, sym);
        }
    }

    /// Advance the sub-model by one observed symbol, implementing the four
    /// cases of spec.md §4.5 directly.
    pub fn step(&mut self, actual: Symbol) -> StmmStep {
        let probe = if self.ir {
            Probe::with_ir(&self.geom, &self.state)
        } else {
            Probe::forward(&self.geom, &self.state)
        };
        let freqs = self.freqs(&probe);

        if self.enabled {
            let predicted = best_sym(&freqs);
            let hit = actual == predicted;

            if hit {
                // hit: push 0, no bits added to the miss popcount. actual ==
                // predicted here, so P(actual) and P(predicted) coincide.
                let p = prob(&freqs, actual, self.alpha, self.s_alpha);
                self.history <<= 1;
                self.advance_with(&probe, predicted);
                return StmmStep {
                    prob: Some(p),
                    just_reenabled: false,
                };
            }

            // miss: push 1 and test the disable threshold.
            self.history = (self.history << 1) | 1;
            if self.history.count_ones() > self.thresh as u32 {
                self.enabled = false;
                self.history = 0;
                self.advance_with(&probe, actual);
                // disable-transition step contributes flat zero, not the
                // just-computed P (spec.md §4.5).
                return StmmStep {
                    prob: Some(0.0),
                    just_reenabled: false,
                };
            }
            // tolerated miss: the reference re-configures the predictor on
            // `bestSym` and never resets it back to the real symbol along
            // this path, so the probability reported (and the context
            // advance) both use `predicted`, not `actual`.
            let p = prob(&freqs, predicted, self.alpha, self.s_alpha);
            self.advance_with(&probe, predicted);
            return StmmStep {
                prob: Some(p),
                just_reenabled: false,
            };
        }

        // Disabled: re-enable only on a unique, matching argmax.
        let unique_best = best_sym_abs(&freqs);
        if unique_best != 255 && unique_best == actual {
            self.enabled = true;
            self.history = 0;
            let p = prob(&freqs, actual, self.alpha, self.s_alpha);
            self.advance_with(&probe, actual);
            StmmStep {
                prob: Some(p),
                just_reenabled: true,
            }
        } else {
            self.advance_with(&probe, actual);
            StmmStep {
                prob: None,
                just_reenabled: false,
            }
        }
    }
}
