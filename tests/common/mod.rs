//! Common test utilities for compdoc CLI tests.
//!
//! - `TestEnv`: isolated project directory plus helpers to run the binary
//! - Fixtures: reusable component and example sources

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
