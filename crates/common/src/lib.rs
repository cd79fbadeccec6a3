//! Ambient helpers shared by the workspace: logging setup and data directory checks.

pub mod utils;
pub mod env;
