//! Command implementations.

pub mod check;
pub mod helpers;
pub mod stats;
pub mod view;

#[cfg(test)]
pub(crate) mod fixtures;

pub use check::run_check;
pub use stats::run_stats;
pub use view::{run_show, run_view};
