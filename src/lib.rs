//! Reference-based DNA sequence entropy engine built on mixed finite-context
//! models (FCMs).
//!
//! A model trains one counter store per context order against a reference
//! sequence, then [`Engine::average_entropy`] streams a target sequence
//! through every trained model (and any attached tolerant sub-models),
//! mixing their Laplacian-smoothed predictions by exponentially-decayed
//! weight into a bits-per-symbol estimate. See [`engine::Engine`] for the
//! top-level entry point and `DESIGN.md` for how each module here is
//! grounded.

pub mod compressor;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod log;
pub mod mixer;
pub mod modelspec;
pub mod prob;
pub mod stmm;
pub mod store;
pub mod symbol;
pub mod trainer;
pub mod util;

pub use engine::Engine;
pub use error::EngineError;
pub use modelspec::{Container, ModelSpec, StmmSpec};
pub use symbol::Symbol;
