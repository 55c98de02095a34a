//! Command-line interface for the CLAMS processor.

pub mod args;
pub mod commands;
