use rfcm::config::{SKETCH_DEPTH_DEFAULT, SKETCH_WIDTH_DEFAULT};
use rfcm::modelspec::{parse, Container};
use rfcm::{EngineError, StmmSpec};

#[test]
fn four_tuple_model_parses_with_no_submodel() {
    let specs = parse("0,5,1.0,0.99").unwrap();
    assert_eq!(specs.len(), 1);
    let m = specs[0];
    assert!(!m.ir);
    assert_eq!(m.k, 5);
    assert_eq!(m.alpha, 1.0);
    assert_eq!(m.gamma, 0.99);
    assert_eq!(m.cont, Container::Table64);
    assert_eq!(m.w, SKETCH_WIDTH_DEFAULT);
    assert_eq!(m.d, SKETCH_DEPTH_DEFAULT);
    assert!(m.child.is_none());
}

#[test]
fn colon_separated_models_each_parse_independently() {
    let specs = parse("0,2,1.0,0.99:1,16,0.5,0.8").unwrap();
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].cont, Container::Table64);
    assert!(specs[1].ir);
    assert_eq!(specs[1].cont, Container::LogTable8);
}

#[test]
fn submodel_suffix_parses_into_a_child_stmm_spec() {
    let specs = parse("0,20,1.0,0.95/10,5,0.5,0.9").unwrap();
    assert_eq!(
        specs[0].child,
        Some(StmmSpec {
            k: 10,
            thresh: 5,
            alpha: 0.5,
            gamma: 0.9,
        })
    );
}

#[test]
fn six_tuple_form_sets_explicit_sketch_shape() {
    let specs = parse("1,18,4,18,1.0,0.99").unwrap();
    assert_eq!(specs[0].cont, Container::Sketch8);
    assert_eq!(specs[0].w, 1 << 18);
    assert_eq!(specs[0].d, 4);
    assert!(specs[0].ir);
}

#[test]
fn malformed_field_counts_are_rejected() {
    assert!(matches!(
        parse("0,2,1.0").unwrap_err(),
        EngineError::MalformedSpec { .. }
    ));
    assert!(matches!(
        parse("0,2,1.0,0.5,extra").unwrap_err(),
        EngineError::MalformedSpec { .. }
    ));
}

#[test]
fn out_of_range_k_is_a_typed_error() {
    match parse("0,0,1.0,0.99") {
        Err(EngineError::InvalidContextOrder(0)) => {}
        other => panic!("expected InvalidContextOrder(0), got {other:?}"),
    }
}

#[test]
fn out_of_range_alpha_and_gamma_are_typed_errors() {
    assert!(matches!(
        parse("0,4,0.0,0.5").unwrap_err(),
        EngineError::InvalidAlpha(_)
    ));
    assert!(matches!(
        parse("0,4,1.0,1.01").unwrap_err(),
        EngineError::InvalidGamma(_)
    ));
}

#[test]
fn container_dispatch_is_a_pure_function_of_k() {
    // spec.md §3: TABLE_64 if k<=K64; else TABLE_32 if k<=K32; else
    // LOG_TABLE_8 if k<=K8; else SKETCH_8.
    let small = parse("0,1,1.0,0.99").unwrap();
    let mid32 = parse("0,13,1.0,0.99").unwrap();
    let mid8 = parse("0,14,1.0,0.99").unwrap();
    let big = parse("0,20,1.0,0.99").unwrap();
    assert_eq!(small[0].cont, Container::Table64);
    assert_eq!(mid32[0].cont, Container::Table32);
    assert_eq!(mid8[0].cont, Container::LogTable8);
    assert_eq!(big[0].cont, Container::Sketch8);
}
