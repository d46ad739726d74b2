//! Harmock - generate mock handlers and JSON fixtures from HAR captures
//!
//! Identical captures and configuration always yield the same routes,
//! directories and identifiers.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::cargo)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::multiple_crate_versions
)]

pub mod capture;
pub mod config;
pub mod error;
pub mod generate;
pub mod route;

pub use error::{HarmockError, Result};
pub use generate::generate;
