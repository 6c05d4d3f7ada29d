//! Small cross-cutting utilities shared by the trainer, compressor and CLI.
//!
//! Submodules:
//! - [`cores`] — physical CPU core counting via `num_cpus::get_physical()`,
//!   used to pick a default worker count for [`crate::trainer::train_all`].

pub mod cores;

pub use cores::count_cores;
