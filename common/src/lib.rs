//! # Tunnelgate Common
//!
//! Pure domain types shared by the probing engine and the command line:
//!
//! * **[`gate`]**: the closed set of logic gates and their truth table.
//! * **[`digest`]**: response fingerprints.
//! * **[`probe`]**: probe descriptions, outcomes and the probe error taxonomy.
//! * **[`network`]**: interface lookup and target parsing.
//! * **[`config`]**: the immutable per-run configuration.
//!
//! Nothing in this crate performs socket I/O.

pub mod config;
pub mod digest;
pub mod gate;
pub mod network;
pub mod probe;
pub mod request;
pub mod utils;

#[doc(hidden)]
pub use tracing;

/// Target used for events that should be rendered as a success line.
pub const SUCCESS_TARGET: &str = "tunnelgate::success";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "tunnelgate::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}
