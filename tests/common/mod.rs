//! Consolidated test utilities for policy-analyzer
//!
//! This module provides unified testing utilities for integration tests,
//! built around real directory trees in temporary locations.

pub mod assertions;
pub mod fixtures;
pub mod tree;
