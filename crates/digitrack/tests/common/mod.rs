//! Shared test utilities for digitrack integration tests.
//!
//! This module provides:
//! - `TestHarness` for isolated test execution with temp directories
//! - Builders for import files and configurations

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
