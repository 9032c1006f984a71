//! Display-level infrastructure: a crate-wide atomic gating `eprintln!`
//! notices by verbosity tier, in place of a logging framework this CLI has
//! no other need for.

use std::sync::atomic::{AtomicU32, Ordering};

/// 0 = silent; 1 = errors only; 2 = normal; 3 = verbose; 4 = debug.
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

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
