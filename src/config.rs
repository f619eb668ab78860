//! Corpus root resolution.
//!
//! The root is chosen once per datasource instance, in order of precedence:
//! a process-level override, the `DATASOURCE_PATH` environment variable, then
//! [`DEFAULT_DATASOURCE_PATH`]. A missing directory is not a configuration
//! error; it surfaces on first use as a directory-not-found fault.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::constants::{DATASOURCE_PATH_KEY, DEFAULT_DATASOURCE_PATH};
use crate::error::{DatasourceError, Result};

static PATH_OVERRIDE: RwLock<Option<OsString>> = RwLock::new(None);

/// Set the process-wide corpus root override. Affects instances created afterwards.
pub fn set_path_override(path: impl Into<OsString>) {
    *PATH_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(path.into());
}

pub fn clear_path_override() {
    *PATH_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = None;
}

#[must_use]
pub fn path_override() -> Option<OsString> {
    PATH_OVERRIDE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Where the corpus root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Override,
    Environment,
    Default,
    /// Supplied directly through [`DatasourceConfig::new`].
    Explicit,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Override => "override",
            Self::Environment => "environment",
            Self::Default => "default",
            Self::Explicit => "explicit",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasourceConfig {
    root: PathBuf,
    source: ConfigSource,
}

impl DatasourceConfig {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source: ConfigSource::Explicit,
        }
    }

    /// Resolve from the process override and the environment.
    pub fn resolve() -> Result<Self> {
        Self::resolve_from(path_override(), std::env::var_os(DATASOURCE_PATH_KEY))
    }

    /// Resolve from explicit override and environment values.
    pub fn resolve_from(
        override_value: Option<OsString>,
        env_value: Option<OsString>,
    ) -> Result<Self> {
        let (value, source) = match (override_value, env_value) {
            (Some(value), _) => (value, ConfigSource::Override),
            (None, Some(value)) => (value, ConfigSource::Environment),
            (None, None) => (DEFAULT_DATASOURCE_PATH.into(), ConfigSource::Default),
        };
        if value.is_empty() {
            return Err(DatasourceError::Configuration {
                reason: format!("{DATASOURCE_PATH_KEY} is set but empty ({source})"),
            });
        }
        Ok(Self {
            root: PathBuf::from(value),
            source,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }
}
