//! # Langswap
//!
//! Console host for the langswap translation registry.
//!
//! Reads commands and lookup keys from a line-oriented input, resolves
//! them against the registry and reports language changes as they happen.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod console;
pub mod error;

pub use console::*;
pub use error::*;
