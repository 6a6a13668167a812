//! # Langswap Common
//!
//! Shared types, logging bootstrap and test helpers for langswap.
//!
//! This crate provides the foundational error type and the tracing setup
//! used across all other crates in the langswap workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use logging::*;
pub use types::*;
