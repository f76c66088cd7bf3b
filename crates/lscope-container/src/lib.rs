//! # lscope-container
//!
//! Read-only model of a compiled dependency-injection container.
//!
//! Handles:
//! - **Definition**: service definitions, aliases, and raw instances.
//! - **Graph**: lookups by id, by tag, and entry resolution.
//! - **Parameters**: `%name%` placeholder resolution.
//! - **Loader**: reading a container dump from the cache directory.

pub mod definition;
pub mod graph;
pub mod loader;
pub mod parameters;

pub use definition::{Alias, Definition, RawInstance, ServiceEntry, TagAttributes, Tags};
pub use graph::ServiceGraph;
pub use loader::{load_dump, load_kernel_container};
pub use parameters::ParameterBag;
