//! CLI library components for the tourism metrics pipeline.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
