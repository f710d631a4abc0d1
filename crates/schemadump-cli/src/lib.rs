//! CLI library components for the schema dumper.

pub mod commands;
pub mod logging;
pub mod types;
