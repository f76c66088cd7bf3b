//! # lscope-common
//!
//! Shared error definitions, kernel configuration, and constants
//! used across the entire lscope workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the primitives that the container model,
//! the reporter, and the CLI build upon.

pub mod config;
pub mod constants;
pub mod error;
