//! Unified error types for the lscope workspace.
//!
//! Every fallible operation in the library crates returns [`Result`]. The
//! binary wraps these in `anyhow` at its boundary and prints them verbatim.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum LscopeError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The kernel is not running in an introspection-capable mode.
    #[error("Debug information about the container is only available in debug mode.")]
    NotInDebugMode,

    /// No serialized container was found at any candidate location.
    #[error(
        "Debug information about the container could not be found. Please clear the cache and try again."
    )]
    CacheArtifactMissing {
        /// Locations that were probed, in order.
        searched: Vec<PathBuf>,
    },

    /// An id is neither a definition, an alias, nor a raw instance.
    #[error("You have requested a non-existent service \"{id}\".")]
    UnknownServiceId {
        /// The requested service id.
        id: String,
    },

    /// A `%name%` placeholder refers to a parameter the dump does not define.
    #[error("You have requested a non-existent parameter \"{name}\".")]
    ParameterNotFound {
        /// Name of the missing parameter.
        name: String,
    },

    /// Parameters reference each other in a loop.
    #[error("Circular reference detected for parameter \"{name}\".")]
    CircularParameter {
        /// Parameter at which the loop was detected.
        name: String,
    },

    /// The container dump is structurally invalid.
    #[error("invalid container dump {path}: {message}")]
    InvalidDump {
        /// File the dump was read from.
        path: PathBuf,
        /// Description of the problem.
        message: String,
    },

    /// The dump file extension maps to no known format.
    #[error("unsupported container dump format: {path} (only YAML and JSON dumps are read)")]
    UnsupportedFormat {
        /// Offending file.
        path: PathBuf,
    },

    /// YAML deserialization failed.
    #[error("YAML error: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },

    /// JSON deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, LscopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_mode_message_is_user_facing() {
        let msg = LscopeError::NotInDebugMode.to_string();
        assert!(msg.contains("only available in debug mode"), "got: {msg}");
    }

    #[test]
    fn missing_artifact_asks_to_clear_cache() {
        let err = LscopeError::CacheArtifactMissing {
            searched: vec![PathBuf::from("/tmp/x.yaml")],
        };
        assert!(err.to_string().contains("Please clear the cache"));
    }

    #[test]
    fn unknown_service_names_the_id() {
        let err = LscopeError::UnknownServiceId { id: "foo.bar".into() };
        assert_eq!(
            err.to_string(),
            "You have requested a non-existent service \"foo.bar\"."
        );
    }

    #[test]
    fn unsupported_format_names_readable_formats() {
        let err = LscopeError::UnsupportedFormat {
            path: PathBuf::from("var/cache/dev/appDevDebugProjectContainer.xml"),
        };
        assert!(err.to_string().contains("only YAML and JSON dumps are read"));
    }
}
