//! Subcommand implementations.
//!
//! Each returns the text to print; `main` does the printing.

pub mod catalog;
pub mod order;
