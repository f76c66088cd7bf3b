//! # lscope-report
//!
//! Finds the services of a [`ServiceGraph`](lscope_container::ServiceGraph)
//! registered as event listeners and renders them as text.
//!
//! - **Discovery**: builds the listener index from `*.event_listener` tags.
//! - **Summary**: one table row per listener.
//! - **Detail**: everything known about a single service id.
//!
//! Renderers return lines; writing them out is left to the caller.

pub mod detail;
pub mod discovery;
pub mod format;
pub mod summary;

pub use detail::render_detail;
pub use discovery::{ListenerIndex, discover_listeners, is_listener_tag};
pub use summary::render_summary;
