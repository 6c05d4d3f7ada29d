//! Model spec DSL (C9): parse the `M1:M2:...` command-line model string into
//! validated [`ModelSpec`] values, and dispatch each one to a counter-store
//! variant per spec.md §4.2.
//!
//! Grammar (spec.md §4.9 / §6), resolved against `fcm.cpp`'s literal field
//! order rather than the simplified grammar in spec.md §6, which omits the
//! leading `ir` field (see DESIGN.md for the discrepancy and why the source
//! wins):
//!
//! ```text
//! spec      := model (":" model)*
//! model     := mm ("/" tm)?
//! mm        := ir "," k "," alpha "," gamma                          (4-tuple)
//!            | ir "," w_log2 "," d "," k "," alpha "," gamma         (6-tuple)
//! tm        := k_tol "," thresh "," alpha_tol "," gamma_tol          (4-tuple)
//! ```
//!
//! `ir` is `0` or `1`. The 6-tuple form only takes effect if `k` resolves to
//! [`Container::Sketch8`] via [`config`](crate::config)'s thresholds — a
//! 6-tuple given for a small `k` silently keeps its `w`/`d` unused, matching
//! the reference's `cont` dispatch being a pure function of `k` (documented
//! as an intentional bug-for-bug preservation in DESIGN.md).

use crate::config::{
    K_MAX, K_MAX_LOG_TABLE8, K_MAX_TABLE32, K_MAX_TABLE64, SKETCH_DEPTH_DEFAULT,
    SKETCH_WIDTH_DEFAULT,
};
use crate::error::EngineError;

/// Which counter-store variant a model's context order resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Table64,
    Table32,
    LogTable8,
    Sketch8,
}

/// Pick a store variant purely from `k`, per spec.md §4.2's threshold table.
pub fn dispatch(k: u8) -> Container {
    if k <= K_MAX_TABLE64 {
        Container::Table64
    } else if k <= K_MAX_TABLE32 {
        Container::Table32
    } else if k <= K_MAX_LOG_TABLE8 {
        Container::LogTable8
    } else {
        Container::Sketch8
    }
}

/// A tolerant sub-model attached to a parent [`ModelSpec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StmmSpec {
    pub k: u8,
    pub thresh: u8,
    pub alpha: f64,
    pub gamma: f64,
}

/// One fully-validated model, ready for [`crate::trainer`] and
/// [`crate::compressor`] to build a store and, optionally, a sub-model from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSpec {
    pub ir: bool,
    pub k: u8,
    pub alpha: f64,
    pub gamma: f64,
    pub cont: Container,
    /// Sketch width, only meaningful when `cont == Container::Sketch8`.
    pub w: u64,
    /// Sketch depth, only meaningful when `cont == Container::Sketch8`.
    pub d: u8,
    pub child: Option<StmmSpec>,
}

/// Parse a full `M1:M2:...` model spec string.
pub fn parse(spec: &str) -> Result<Vec<ModelSpec>, EngineError> {
    spec.split(':').map(parse_model).collect()
}

fn parse_model(group: &str) -> Result<ModelSpec, EngineError> {
    let mut halves = group.splitn(2, '/');
    let mm = halves.next().unwrap_or("");
    let tm = halves.next();

    let fields: Vec<&str> = mm.split(',').collect();
    let (ir, k, alpha, gamma, w, d) = match fields.len() {
        4 => {
            let ir = parse_bool(&fields[0], mm)?;
            let k = parse_k(&fields[1], mm)?;
            let alpha = parse_alpha(&fields[2], mm)?;
            let gamma = parse_gamma(&fields[3], mm)?;
            (ir, k, alpha, gamma, SKETCH_WIDTH_DEFAULT, SKETCH_DEPTH_DEFAULT)
        }
        6 => {
            let ir = parse_bool(&fields[0], mm)?;
            let w_log2: u32 = fields[1].parse().map_err(|_| malformed(mm, "w_log2 must be an integer"))?;
            let w = 1u64
                .checked_shl(w_log2)
                .ok_or_else(|| malformed(mm, "w_log2 too large"))?;
            let d: u8 = fields[2].parse().map_err(|_| malformed(mm, "d must fit in u8"))?;
            let k = parse_k(&fields[3], mm)?;
            let alpha = parse_alpha(&fields[4], mm)?;
            let gamma = parse_gamma(&fields[5], mm)?;
            (ir, k, alpha, gamma, w, d)
        }
        n => {
            return Err(malformed(
                mm,
                &format!("expected 4 or 6 comma-separated fields, found {n}"),
            ))
        }
    };

    let cont = dispatch(k);
    if cont == Container::Sketch8 && (w == 0 || (w & (w - 1)) != 0 || d == 0) {
        return Err(EngineError::InvalidSketchShape { width: w, depth: d });
    }

    let child = match tm {
        Some(tm) => Some(parse_stmm(tm)?),
        None => None,
    };

    Ok(ModelSpec {
        ir,
        k,
        alpha,
        gamma,
        cont,
        w,
        d,
        child,
    })
}

fn parse_stmm(group: &str) -> Result<StmmSpec, EngineError> {
    let fields: Vec<&str> = group.split(',').collect();
    if fields.len() != 4 {
        return Err(malformed(
            group,
            &format!("sub-model expects 4 comma-separated fields, found {}", fields.len()),
        ));
    }
    let k = parse_k(&fields[0], group)?;
    let thresh: u8 = fields[1].parse().map_err(|_| malformed(group, "thresh must fit in u8"))?;
    let alpha = parse_alpha(&fields[2], group)?;
    let gamma = parse_gamma(&fields[3], group)?;
    Ok(StmmSpec { k, thresh, alpha, gamma })
}

fn parse_bool(field: &str, whole: &str) -> Result<bool, EngineError> {
    match field.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(malformed(whole, "ir flag must be 0 or 1")),
    }
}

fn parse_k(field: &str, whole: &str) -> Result<u8, EngineError> {
    let k: u8 = field.trim().parse().map_err(|_| malformed(whole, "k must fit in u8"))?;
    if k == 0 || k > K_MAX {
        return Err(EngineError::InvalidContextOrder(k));
    }
    Ok(k)
}

fn parse_alpha(field: &str, whole: &str) -> Result<f64, EngineError> {
    let alpha: f64 = field.trim().parse().map_err(|_| malformed(whole, "alpha must be a float"))?;
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(EngineError::InvalidAlpha(alpha));
    }
    Ok(alpha)
}

fn parse_gamma(field: &str, whole: &str) -> Result<f64, EngineError> {
    let gamma: f64 = field.trim().parse().map_err(|_| malformed(whole, "gamma must be a float"))?;
    if !(0.0..=1.0).contains(&gamma) {
        return Err(EngineError::InvalidGamma(gamma));
    }
    Ok(gamma)
}

fn malformed(field: &str, reason: &str) -> EngineError {
    EngineError::MalformedSpec {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
