//! Rendering of resolution outcomes for the command line.
//!
//! Kept separate from `main` so the output contract can be unit-tested
//! without touching the process environment.

use alexandria_config::{ResolvedConfig, ValidationError};

/// One line per validation error, in the order collected.
///
/// Each line names the offending key and the violated rule; values are never
/// echoed, so the output is safe to paste into tickets and chat.
#[must_use]
pub fn error_lines(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

/// Redacted `KEY=value` summary lines in schema declaration order.
#[must_use]
pub fn summary_lines(config: &ResolvedConfig) -> Vec<String> {
    config
        .redacted_values()
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect()
}

/// Redacted summary as a pretty-printed JSON object.
#[must_use]
pub fn summary_json(config: &ResolvedConfig) -> String {
    serde_json::to_string_pretty(&config.redacted_values()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use alexandria_config::{resolve, RawEnvironment, Schema};

    use super::*;

    fn resolved() -> ResolvedConfig {
        let raw: RawEnvironment = [
            ("OPENAI_API_KEY", "sk-test-key"),
            ("PINECONE_API_KEY", "pc-test-key"),
            ("PINECONE_ENVIRONMENT", "us-west1-gcp"),
            ("PINECONE_INDEX_NAME", "alexandria-embeddings"),
        ]
        .into_iter()
        .collect();
        resolve(&Schema::alexandria(), &raw).unwrap()
    }

    #[test]
    fn test_error_lines_name_key_and_rule() {
        let raw = RawEnvironment::new();
        let errors = resolve(&Schema::alexandria(), &raw).unwrap_err();
        let lines = error_lines(&errors);

        assert_eq!(lines.len(), errors.len());
        assert!(lines
            .iter()
            .any(|line| line == "PINECONE_API_KEY: required key is not set"));
    }

    #[test]
    fn test_summary_lines_mask_secrets() {
        let lines = summary_lines(&resolved());

        assert!(lines.contains(&"OPENAI_API_KEY=***".to_string()));
        assert!(lines.contains(&"REDIS_HOST=localhost".to_string()));
        assert!(!lines.iter().any(|line| line.contains("sk-test-key")));
    }

    #[test]
    fn test_summary_json_masks_secrets() {
        let json = summary_json(&resolved());

        assert!(json.contains(r#""OPENAI_API_KEY": "***""#));
        assert!(json.contains(r#""REDIS_PORT": "6379""#));
        assert!(!json.contains("sk-test-key"));
    }
}
