//! Integration test utilities for the vidshare API
//!
//! Servers run with in-memory persistence and a throwaway upload directory,
//! so no external services are needed.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
