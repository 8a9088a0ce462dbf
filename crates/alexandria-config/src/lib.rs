//! Typed configuration core for the Alexandria ingestion platform.
//!
//! This crate collects environment-sourced settings, validates them against a
//! declared schema, and produces a single immutable [`ResolvedConfig`] that
//! the rest of the platform consumes. It supports:
//! - Layered loading (override files → process environment, later layers win)
//! - A closed, typed key set with per-profile default overrides
//! - Fail-fast validation with an aggregated error list
//! - Redacted rendering so secrets never reach logs
//!
//! # Overview
//!
//! Resolution runs once at process start: [`EnvLoader`] merges the sources
//! into a [`RawEnvironment`], and [`resolve`] validates it against the
//! [`Schema`]. Construction either fully succeeds or fails with every
//! collected [`ValidationError`]; no partially-valid configuration ever
//! reaches a consumer. Components receive the resolved object by reference
//! instead of reading environment state directly.
//!
//! # Example
//!
//! ```no_run
//! use alexandria_config::{resolve, EnvLoader, Schema};
//!
//! # fn main() -> Result<(), alexandria_config::ConfigError> {
//! let raw = EnvLoader::new().with_file(".env").load()?;
//!
//! let config = match resolve(&Schema::alexandria(), &raw) {
//!     Ok(config) => config,
//!     Err(errors) => {
//!         for error in &errors {
//!             eprintln!("{error}");
//!         }
//!         std::process::exit(1);
//!     }
//! };
//!
//! println!(
//!     "redis at {}:{}",
//!     config.get_str("REDIS_HOST"),
//!     config.get_int("REDIS_PORT"),
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Override file format
//!
//! UTF-8 text, one `KEY=VALUE` pair per line; the value is the literal text
//! after the first `=`. `#`-prefixed lines and blank lines are ignored, and
//! malformed lines are skipped with a warning. The process environment
//! always takes precedence over file contents:
//!
//! ```text
//! # Alexandria overrides
//! ENVIRONMENT=development
//! REDIS_PORT=6380
//! PINECONE_INDEX_NAME=alexandria-embeddings
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod resolver;
mod schema;

pub use config::{Redacted, ResolvedConfig, Value, SECRET_MASK};
pub use error::{ConfigError, ValidationError};
pub use loader::{EnvLoader, RawEnvironment};
pub use resolver::resolve;
pub use schema::{
    ConfigKey, Profile, RequireAnyGroup, Requirement, Schema, ValueKind, ValueRule,
    ENVIRONMENT_KEY, LOG_LEVELS, PROFILES,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_file_to_typed_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "OPENAI_API_KEY=sk-test-key\n\
             PINECONE_API_KEY=pc-test-key\n\
             PINECONE_ENVIRONMENT=us-west1-gcp\n\
             PINECONE_INDEX_NAME=alexandria-embeddings\n\
             REDIS_PORT=6380\n",
        )
        .unwrap();

        let raw = EnvLoader::new()
            .without_process_env()
            .with_file(&path)
            .load()
            .unwrap();
        let config = resolve(&Schema::alexandria(), &raw).unwrap();

        assert_eq!(config.get_int("REDIS_PORT"), 6380);
        assert_eq!(config.profile(), Profile::Development);
    }

    #[test]
    fn test_failed_resolution_exposes_all_errors() {
        let raw: RawEnvironment = [("REDIS_PORT", "junk")].into_iter().collect();

        let errors = resolve(&Schema::alexandria(), &raw).unwrap_err();

        // One format error, three missing required keys, one group error.
        assert_eq!(errors.len(), 5);
    }
}
