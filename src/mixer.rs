//! Mixture weighting (C6): combine several per-model probabilities for the
//! same observed symbol into one entropy estimate, via exponentially-decayed
//! performance weights.
//!
//! Grounded on the ordering traced out of `fcm.cpp`'s `entropy()` function
//! (Supplemented Feature #2 in SPEC_FULL.md): weights are updated *before*
//! the mixed probability is read back out, not after. A model that predicted
//! well on the previous symbol gets a boost before this symbol's mixed
//! probability is computed, not after.

/// Exponential-decay weight vector for `n` models (main models plus any
/// enabled sub-models are folded into the same vector by the caller).
pub struct Mixer {
    w: Vec<f64>,
    gamma: Vec<f64>,
}

impl Mixer {
    /// `gamma[i]` is the decay exponent for model `i`; all weights start
    /// uniform at `1/n`.
    pub fn new(gamma: Vec<f64>) -> Self {
        let n = gamma.len();
        let w = vec![1.0 / n as f64; n];
        Mixer { w, gamma }
    }

    /// Reset every weight to uniform `1/N`. Called when a tolerant
    /// sub-model transitions Disabled -> Enabled (spec.md §3's STMM
    /// invariant: "when re-enabled, all weights reset to uniform 1/N").
    pub fn reset_uniform(&mut self) {
        let n = self.w.len();
        self.w.fill(1.0 / n as f64);
    }

    /// Update every weight from the last step's per-model probabilities,
    /// then return the resulting mixed probability for `probs` — the same
    /// slice, since the caller queries all per-model probabilities for the
    /// symbol actually observed before mixing.
    ///
    /// `probs[i]` must be `None` for a disabled sub-model; its weight slot
    /// is set to exactly `0.0` (spec.md §3: "a disabled STMM slot has w_next
    /// set so the slot contributes zero") and normalized along with every
    /// other slot, so `Σw == 1` holds over the *full* vector, not just the
    /// active subset (spec.md §8 invariant 3).
    pub fn update_and_mix(&mut self, probs: &[Option<f64>]) -> f64 {
        debug_assert_eq!(probs.len(), self.w.len());
        for (i, p) in probs.iter().enumerate() {
            self.w[i] = match p {
                Some(p) => self.w[i].powf(self.gamma[i]) * p,
                None => 0.0,
            };
        }
        let sum: f64 = self.w.iter().sum();

        if sum <= 0.0 {
            // Degenerate mix: every active model reported, effectively, zero
            // weight. Reset to uniform over the active set rather than
            // dividing by zero; disabled slots stay zero.
            let active = probs.iter().filter(|p| p.is_some()).count();
            let uniform = 1.0 / active.max(1) as f64;
            for (i, p) in probs.iter().enumerate() {
                self.w[i] = if p.is_some() { uniform } else { 0.0 };
            }
            return probs
                .iter()
                .filter_map(|p| *p)
                .zip(std::iter::repeat(uniform))
                .map(|(p, w)| w * p)
                .sum();
        }

        for w in self.w.iter_mut() {
            *w /= sum;
        }
        probs
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| self.w[i] * p))
            .sum()
    }
}
