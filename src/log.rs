//! Verbosity-gated diagnostic output.
//!
//! Mirrors the teacher's `DISPLAYLEVEL` infrastructure (`cli/constants.rs`):
//! a crate-level atomic display level plus a macro that only prints once the
//! caller's requested level is at or below it. 0 = silent, 1 = errors only,
//! 2 = normal (the default), 3 = verbose (training/compression progress).

use std::sync::atomic::{AtomicU32, Ordering};

/// 0 = silent; 1 = errors only; 2 = normal; 3 = verbose.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Conditionally print a diagnostic to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::log::display_level() >= $level {
            eprintln!($($arg)*);
        }
    };
}
