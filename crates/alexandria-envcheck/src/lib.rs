//! Alexandria environment checker.
//!
//! Standalone binary that resolves the Alexandria platform configuration from
//! override files and the process environment, reporting every validation
//! problem in a single pass. Operators run it before starting workers to
//! catch a broken deployment at the door rather than hours into an ingestion
//! job.
//!
//! # Example Usage
//!
//! ```bash
//! # Check the default .env plus the process environment
//! $ alexandria-envcheck
//!
//! # Check specific override files and print the redacted summary
//! $ alexandria-envcheck --env-file deploy/.env.production --summary
//!
//! # Machine-readable summary
//! $ alexandria-envcheck --json
//! ```
//!
//! On success the process exits 0 and stdout carries nothing but the optional
//! redacted summary. On validation failure every collected error is printed
//! to stderr, one per line, and the process exits 1.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod report;

pub use report::{error_lines, summary_json, summary_lines};

/// Envcheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
