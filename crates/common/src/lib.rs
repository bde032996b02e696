//! Shared plumbing for the workspace: wire types and logging setup.

pub mod types;
pub mod utils;
