//! remark - inspect comment snapshots and replay command journals

pub mod cli;
pub mod logging;
pub mod output;
