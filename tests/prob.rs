use rfcm::prob::{entropy, prob};

#[test]
fn uniform_k1_scenario_gives_two_bits() {
    // spec.md §8 scenario 1, exercised through the public API only.
    let freqs = [1u64, 1, 1, 1];
    let p = prob(&freqs, 0, 1.0, 4.0);
    assert!((p - 0.25).abs() < 1e-12);
    assert!((entropy(p) - 2.0).abs() < 1e-9);
}

#[test]
fn a_confident_model_yields_low_entropy() {
    let freqs = [1000u64, 0, 0, 0];
    let p = prob(&freqs, 0, 1.0, 4.0);
    assert!(p > 0.99);
    assert!(entropy(p) < 0.02);
}

#[test]
fn an_unseen_symbol_still_gets_nonzero_probability() {
    let freqs = [100u64, 0, 0, 0];
    let p = prob(&freqs, 3, 1.0, 4.0);
    assert!(p > 0.0);
    assert!(entropy(p).is_finite());
}
