//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod check;
mod completions;
mod convert;
mod get;
pub mod utils;

pub use check::handle_check;
pub use completions::handle_completions;
pub use convert::handle_convert;
pub use get::handle_get;
