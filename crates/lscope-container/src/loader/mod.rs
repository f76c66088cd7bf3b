//! Container dump loading.
//!
//! Reads the serialized container the kernel writes next to its compiled
//! container in debug mode. The document layout is shared by the YAML and
//! JSON encodings; the file extension picks the decoder.

mod document;

use std::path::Path;

use lscope_common::config::KernelConfig;
use lscope_common::error::{LscopeError, Result};

use self::document::DumpDocument;
use crate::graph::ServiceGraph;

/// Encoding of a container dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    /// `.yaml` or `.yml`.
    Yaml,
    /// `.json`.
    Json,
}

impl DumpFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Reads and decodes the dump at `path`.
///
/// # Errors
///
/// Returns an error if the extension is unknown, the file cannot be read,
/// or its content is not a valid dump.
pub fn load_dump(path: &Path) -> Result<ServiceGraph> {
    let format =
        DumpFormat::from_path(path).ok_or_else(|| LscopeError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
    tracing::debug!(path = %path.display(), ?format, "loading container dump");

    let content = std::fs::read_to_string(path).map_err(|source| LscopeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_dump(&content, format, path)?;

    tracing::info!(
        definitions = graph.definitions().count(),
        aliases = graph.aliases().count(),
        "container dump loaded"
    );
    Ok(graph)
}

/// Loads the container of `kernel` from its debug dump.
///
/// # Errors
///
/// Returns [`LscopeError::NotInDebugMode`] when the kernel is not in debug
/// mode, [`LscopeError::CacheArtifactMissing`] when no dump exists, or any
/// error of [`load_dump`].
pub fn load_kernel_container(kernel: &KernelConfig) -> Result<ServiceGraph> {
    kernel.ensure_debug()?;
    let path = kernel.locate_container_dump()?;
    load_dump(&path)
}

/// Decodes dump `content` in the given `format`. `origin` names the source
/// in error messages.
///
/// # Errors
///
/// Returns an error if the content is not a valid dump.
pub fn parse_dump(content: &str, format: DumpFormat, origin: &Path) -> Result<ServiceGraph> {
    let document: DumpDocument = match format {
        DumpFormat::Yaml => serde_yaml::from_str(content)?,
        DumpFormat::Json => serde_json::from_str(content)?,
    };
    document.into_graph(origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(DumpFormat::from_path(Path::new("a.yaml")), Some(DumpFormat::Yaml));
        assert_eq!(DumpFormat::from_path(Path::new("a.YML")), Some(DumpFormat::Yaml));
        assert_eq!(DumpFormat::from_path(Path::new("a.json")), Some(DumpFormat::Json));
        assert_eq!(DumpFormat::from_path(Path::new("a.xml")), None);
        assert_eq!(DumpFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn json_uses_the_same_layout() {
        let json = r#"{
            "services": {
                "event_dispatcher": { "class": "Framework\\EventDispatcher" },
                "a.listener": {
                    "class": "App\\Listener",
                    "tags": [{ "name": "kernel.event_listener", "event": "request", "priority": 10 }]
                },
                "alias": "@a.listener"
            }
        }"#;
        let graph = parse_dump(json, DumpFormat::Json, Path::new("dump.json")).expect("parse");
        assert!(graph.has_definition("event_dispatcher"));
        assert_eq!(
            graph.definition("a.listener").expect("def").tag("kernel.event_listener")[0]["priority"],
            "10"
        );
        assert!(graph.has_alias("alias"));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = parse_dump("services: [", DumpFormat::Yaml, Path::new("x.yaml")).unwrap_err();
        assert!(matches!(err, LscopeError::Yaml { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let err = load_dump(Path::new("/nonexistent/container.xml")).unwrap_err();
        assert!(matches!(err, LscopeError::UnsupportedFormat { .. }));
    }

    #[test]
    fn kernel_outside_debug_mode_is_refused() {
        let kernel = KernelConfig::for_environment("prod");
        let err = load_kernel_container(&kernel).unwrap_err();
        assert!(matches!(err, LscopeError::NotInDebugMode));
    }

    #[test]
    fn kernel_without_dump_reports_missing_artifact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut kernel = KernelConfig::default();
        kernel.cache_dir = dir.path().to_path_buf();
        let err = load_kernel_container(&kernel).unwrap_err();
        assert!(matches!(err, LscopeError::CacheArtifactMissing { .. }));
    }

    #[test]
    fn kernel_dump_is_loaded_from_cache_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut kernel = KernelConfig::default();
        kernel.cache_dir = dir.path().to_path_buf();
        std::fs::write(
            dir.path().join("appDevDebugProjectContainer.json"),
            r#"{"services": {"mailer": {"class": "Mailer"}}}"#,
        )
        .expect("write");

        let graph = load_kernel_container(&kernel).expect("load");
        assert!(graph.has_definition("mailer"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_dump(Path::new("/nonexistent/container.yaml")).unwrap_err();
        assert!(matches!(err, LscopeError::Io { .. }));
    }
}
