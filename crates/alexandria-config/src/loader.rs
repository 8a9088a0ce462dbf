//! Layered environment loading.
//!
//! This module provides the [`EnvLoader`] for merging override files with the
//! process environment into a single [`RawEnvironment`]. Sources are applied
//! in order, later sources overriding earlier ones:
//!
//! 1. Override files, in the order given (missing files are skipped)
//! 2. Process environment variables
//!
//! Loading reads files and nothing else; the process environment is never
//! mutated.
//!
//! # File format
//!
//! UTF-8 text, one `KEY=VALUE` pair per line. The value is the literal text
//! after the first `=` with no quoting or expansion. Blank lines and lines
//! starting with `#` are ignored. Malformed lines (no `=`) are skipped with a
//! warning rather than aborting the load.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::ConfigError;

/// Merged raw key/value environment.
///
/// Keys map to unparsed string values; insertion order is irrelevant. Built
/// once per process start by [`EnvLoader::load`], or from iterators of pairs
/// for synthetic test environments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEnvironment {
    vars: HashMap<String, String>,
}

impl RawEnvironment {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a raw value by key name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the environment holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Insert a pair, replacing any existing value for the key.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawEnvironment {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut raw = Self::new();
        for (key, value) in iter {
            raw.set(key, value);
        }
        raw
    }
}

/// Layered environment loader.
///
/// # Example
///
/// ```no_run
/// use alexandria_config::EnvLoader;
///
/// # fn main() -> Result<(), alexandria_config::ConfigError> {
/// let raw = EnvLoader::new()
///     .with_file(".env")
///     .with_file(".env.local")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EnvLoader {
    paths: Vec<PathBuf>,
    process_env: bool,
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvLoader {
    /// Create a loader with no files and the process environment enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            process_env: true,
        }
    }

    /// Add an override file.
    ///
    /// Files are read in the order added, later files overriding earlier
    /// ones. A file that does not exist at load time is silently skipped.
    #[must_use]
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Disable the process environment overlay.
    ///
    /// Intended for tests that need a fully synthetic environment.
    #[must_use]
    pub fn without_process_env(mut self) -> Self {
        self.process_env = false;
        self
    }

    /// Read all sources and merge them into a [`RawEnvironment`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if a configured file exists but
    /// cannot be read (permissions, not UTF-8). Missing files are not an
    /// error.
    pub fn load(&self) -> Result<RawEnvironment, ConfigError> {
        let mut raw = RawEnvironment::new();

        for path in &self.paths {
            if !path.exists() {
                continue;
            }
            let content =
                fs::read_to_string(path).map_err(|source| ConfigError::file_read(path, source))?;
            parse_env_file(&content, path, &mut raw);
        }

        if self.process_env {
            overlay(&mut raw, env::vars());
        }

        Ok(raw)
    }
}

/// Overlay `vars` onto `raw`, the overlay winning on conflict.
fn overlay(raw: &mut RawEnvironment, vars: impl IntoIterator<Item = (String, String)>) {
    for (key, value) in vars {
        raw.set(key, value);
    }
}

/// Parse `KEY=VALUE` lines into `raw`, later entries overriding earlier ones.
///
/// Diagnostics name the file and line number only; line content is never
/// logged, since a malformed line may hold secret material.
fn parse_env_file(content: &str, path: &Path, raw: &mut RawEnvironment) {
    for (index, line) in content.lines().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match trimmed.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                if key.is_empty() {
                    warn!(
                        path = %path.display(),
                        line = index + 1,
                        "skipping line with empty key"
                    );
                    continue;
                }
                raw.set(key, value);
            }
            None => {
                warn!(
                    path = %path.display(),
                    line = index + 1,
                    "skipping malformed line (expected KEY=VALUE)"
                );
            }
        }
    }
}
