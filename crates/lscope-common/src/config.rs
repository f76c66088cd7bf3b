//! Kernel configuration: debug mode detection and cache artifact discovery.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONTAINER_CLASS_SUFFIX, DEFAULT_CACHE_ROOT, DEFAULT_ENVIRONMENT, DEFAULT_KERNEL_NAME,
    DUMP_EXTENSIONS, PRODUCTION_ENVIRONMENT,
};
use crate::error::{LscopeError, Result};

/// Settings of the application kernel whose container is inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Kernel name, prefix of the compiled container class.
    pub name: String,
    /// Environment the container was compiled for (`dev`, `test`, `prod`, ...).
    pub environment: String,
    /// Whether the kernel runs in debug mode.
    pub debug: bool,
    /// Directory holding the compiled container and its debug dump.
    pub cache_dir: PathBuf,
    /// Explicit dump location, bypassing discovery under `cache_dir`.
    pub container_dump: Option<PathBuf>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::for_environment(DEFAULT_ENVIRONMENT)
    }
}

impl KernelConfig {
    /// Builds the configuration of a kernel running in `environment`.
    ///
    /// Debug mode is on everywhere except the production environment, and
    /// the cache directory is `var/cache/<environment>`.
    #[must_use]
    pub fn for_environment(environment: impl Into<String>) -> Self {
        let environment = environment.into();
        Self {
            name: DEFAULT_KERNEL_NAME.to_string(),
            debug: environment != PRODUCTION_ENVIRONMENT,
            cache_dir: Path::new(DEFAULT_CACHE_ROOT).join(&environment),
            environment,
            container_dump: None,
        }
    }

    /// Name of the compiled container class, e.g. `appDevDebugProjectContainer`.
    #[must_use]
    pub fn container_class(&self) -> String {
        let debug = if self.debug { "Debug" } else { "" };
        format!(
            "{}{}{debug}{CONTAINER_CLASS_SUFFIX}",
            self.name,
            upper_first(&self.environment)
        )
    }

    /// Locations probed for the container dump, in priority order.
    #[must_use]
    pub fn dump_candidates(&self) -> Vec<PathBuf> {
        if let Some(ref explicit) = self.container_dump {
            return vec![explicit.clone()];
        }
        let class = self.container_class();
        DUMP_EXTENSIONS
            .iter()
            .map(|ext| self.cache_dir.join(format!("{class}.{ext}")))
            .collect()
    }

    /// Fails unless the kernel runs in debug mode.
    ///
    /// # Errors
    ///
    /// Returns [`LscopeError::NotInDebugMode`] when `debug` is off.
    pub fn ensure_debug(&self) -> Result<()> {
        if self.debug {
            Ok(())
        } else {
            Err(LscopeError::NotInDebugMode)
        }
    }

    /// Returns the first existing dump file among [`Self::dump_candidates`].
    ///
    /// # Errors
    ///
    /// Returns [`LscopeError::CacheArtifactMissing`] when none exists.
    pub fn locate_container_dump(&self) -> Result<PathBuf> {
        let searched = self.dump_candidates();
        if let Some(found) = searched.iter().find(|p| p.is_file()) {
            tracing::debug!(path = %found.display(), "located container dump");
            return Ok(found.clone());
        }
        tracing::debug!(candidates = searched.len(), "no container dump on disk");
        Err(LscopeError::CacheArtifactMissing { searched })
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
