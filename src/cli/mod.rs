//! CLI command handlers

pub mod commands;

pub use commands::{convert, format_table, inspect, preview, serve};
