//! Declared configuration schema.
//!
//! Every setting the platform reads is declared here as a [`ConfigKey`] with
//! an expected type, a presence requirement, defaults, and an optional
//! validation rule. The closed key set catches typos and type errors at
//! start-up instead of at first use deep inside an ingestion job.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the key that selects the [`Profile`].
pub const ENVIRONMENT_KEY: &str = "ENVIRONMENT";

/// Allowed `ENVIRONMENT` spellings, matching [`Profile`] variants.
pub const PROFILES: &[&str] = &["development", "production", "testing"];

/// Allowed `LOG_LEVEL` spellings.
pub const LOG_LEVELS: &[&str] = &["DEBUG", "INFO", "WARNING", "ERROR"];

/// Deployment profile selected by the `ENVIRONMENT` key.
///
/// A profile is a named bundle of default overrides applied before explicit
/// values; it never overrides a value the operator actually set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Local development (the default).
    #[default]
    Development,
    /// Production deployment.
    Production,
    /// Test runs.
    Testing,
}

impl Profile {
    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        }
    }

    /// Parse a profile name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "development" => Some(Self::Development),
            "production" => Some(Self::Production),
            "testing" => Some(Self::Testing),
            _ => None,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected type of a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free-form string.
    String,
    /// Signed integer.
    Int,
    /// Boolean parsed from `true`/`false`/`1`/`0`, case-insensitive.
    Bool,
    /// One of a closed set of allowed spellings.
    Enum(&'static [&'static str]),
    /// Sensitive string, masked in every rendered output.
    Secret,
}

/// Additional per-key validation applied after type coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRule {
    /// Value must match the regular expression.
    Pattern(&'static str),
    /// Value must be at least this many characters long.
    MinLen(usize),
    /// Integer value must fall within the inclusive range.
    Range {
        /// Lower bound, inclusive.
        min: i64,
        /// Upper bound, inclusive.
        max: i64,
    },
}

impl ValueRule {
    /// Human-readable description used in error messages.
    ///
    /// Describes the rule only; the offending value is never included.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Pattern(pattern) => format!("must match pattern {pattern}"),
            Self::MinLen(n) => format!("must be at least {n} characters"),
            Self::Range { min, max } => format!("must be between {min} and {max}"),
        }
    }
}

/// When a key must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requirement {
    /// Always required.
    Required,
    /// Never required.
    #[default]
    Optional,
    /// Required only under the given profile.
    RequiredIn(Profile),
}

impl Requirement {
    /// Whether the key is required under `profile`.
    #[must_use]
    pub fn applies_to(self, profile: Profile) -> bool {
        match self {
            Self::Required => true,
            Self::Optional => false,
            Self::RequiredIn(required_in) => required_in == profile,
        }
    }
}

/// A single declared configuration setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigKey {
    /// Unique key name as it appears in the environment.
    pub name: &'static str,
    /// Expected value type.
    pub kind: ValueKind,
    /// Presence requirement.
    pub requirement: Requirement,
    /// Global default, applied when no profile default matches.
    pub default: Option<&'static str>,
    /// Profile-specific defaults, consulted before the global default.
    pub profile_defaults: Vec<(Profile, &'static str)>,
    /// Additional validation rule.
    pub rule: Option<ValueRule>,
}

impl ConfigKey {
    /// Declare a new optional key with no defaults.
    #[must_use]
    pub fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Optional,
            default: None,
            profile_defaults: Vec::new(),
            rule: None,
        }
    }

    /// Mark the key as always required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.requirement = Requirement::Required;
        self
    }

    /// Mark the key as required only under `profile`.
    #[must_use]
    pub fn required_in(mut self, profile: Profile) -> Self {
        self.requirement = Requirement::RequiredIn(profile);
        self
    }

    /// Set the global default value.
    #[must_use]
    pub fn with_default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// Add a profile-specific default override.
    #[must_use]
    pub fn with_profile_default(mut self, profile: Profile, value: &'static str) -> Self {
        self.profile_defaults.push((profile, value));
        self
    }

    /// Attach a validation rule.
    #[must_use]
    pub fn with_rule(mut self, rule: ValueRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Effective default under `profile`: profile-specific first, then global.
    #[must_use]
    pub fn default_for(&self, profile: Profile) -> Option<&'static str> {
        self.profile_defaults
            .iter()
            .find(|(candidate, _)| *candidate == profile)
            .map(|(_, value)| *value)
            .or(self.default)
    }

    /// Whether this key holds a secret.
    #[must_use]
    pub fn is_secret(&self) -> bool {
        matches!(self.kind, ValueKind::Secret)
    }
}

/// A group of keys of which at least one must be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireAnyGroup {
    /// Member key names.
    pub keys: &'static [&'static str],
}

/// Ordered set of declared keys plus cross-key requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    keys: Vec<ConfigKey>,
    groups: Vec<RequireAnyGroup>,
}

impl Schema {
    /// Build a schema from declared keys and groups.
    #[must_use]
    pub fn new(keys: Vec<ConfigKey>, groups: Vec<RequireAnyGroup>) -> Self {
        Self { keys, groups }
    }

    /// The Alexandria platform's declared key set.
    #[must_use]
    pub fn alexandria() -> Self {
        let keys = vec![
            ConfigKey::new(ENVIRONMENT_KEY, ValueKind::Enum(PROFILES)).with_default("development"),
            // AI providers: at least one key must be configured (see groups)
            ConfigKey::new("OPENAI_API_KEY", ValueKind::Secret)
                .with_rule(ValueRule::Pattern("^sk-")),
            ConfigKey::new("ANTHROPIC_API_KEY", ValueKind::Secret)
                .with_rule(ValueRule::Pattern("^sk-ant-")),
            ConfigKey::new("OPENAI_MODEL", ValueKind::String).with_default("gpt-4"),
            // Vector store
            ConfigKey::new("PINECONE_API_KEY", ValueKind::Secret).required(),
            ConfigKey::new("PINECONE_ENVIRONMENT", ValueKind::String).required(),
            ConfigKey::new("PINECONE_INDEX_NAME", ValueKind::String).required(),
            ConfigKey::new("PINECONE_DIMENSION", ValueKind::Int)
                .with_default("1536")
                .with_rule(ValueRule::Range { min: 1, max: 65536 }),
            // Embedding models
            ConfigKey::new("HF_MODEL_NAME", ValueKind::String)
                .with_default("sentence-transformers/all-mpnet-base-v2"),
            ConfigKey::new("HF_CACHE_DIR", ValueKind::String).with_default("./data/models"),
            // Redis task queue
            ConfigKey::new("REDIS_HOST", ValueKind::String).with_default("localhost"),
            ConfigKey::new("REDIS_PORT", ValueKind::Int)
                .with_default("6379")
                .with_rule(ValueRule::Range { min: 1, max: 65535 }),
            ConfigKey::new("REDIS_DB", ValueKind::Int)
                .with_default("0")
                .with_profile_default(Profile::Testing, "1"),
            ConfigKey::new("REDIS_PASSWORD", ValueKind::Secret),
            ConfigKey::new("REDIS_MAX_CONNECTIONS", ValueKind::Int)
                .with_default("20")
                .with_profile_default(Profile::Production, "50")
                .with_rule(ValueRule::Range { min: 1, max: 10000 }),
            // Ingestion pipeline
            ConfigKey::new("MAX_WORKERS", ValueKind::Int)
                .with_default("4")
                .with_profile_default(Profile::Production, "8")
                .with_rule(ValueRule::Range { min: 1, max: 512 }),
            ConfigKey::new("TIMEOUT_SECONDS", ValueKind::Int)
                .with_default("300")
                .with_rule(ValueRule::Range { min: 1, max: 86400 }),
            ConfigKey::new("CHUNK_SIZE", ValueKind::Int)
                .with_default("1000")
                .with_rule(ValueRule::Range {
                    min: 1,
                    max: 100_000,
                }),
            ConfigKey::new("CHUNK_OVERLAP", ValueKind::Int)
                .with_default("200")
                .with_rule(ValueRule::Range {
                    min: 0,
                    max: 100_000,
                }),
            ConfigKey::new("MAX_FILE_SIZE", ValueKind::Int)
                .with_default("52428800")
                .with_rule(ValueRule::Range {
                    min: 1,
                    max: 1_073_741_824,
                }),
            // Logging
            ConfigKey::new("LOG_LEVEL", ValueKind::Enum(LOG_LEVELS))
                .with_default("INFO")
                .with_profile_default(Profile::Production, "WARNING")
                .with_profile_default(Profile::Testing, "DEBUG"),
            ConfigKey::new("LOG_FILE_PATH", ValueKind::String)
                .with_default("./logs/rag_system.log"),
            // Security
            ConfigKey::new("SECRET_KEY", ValueKind::Secret)
                .required_in(Profile::Production)
                .with_rule(ValueRule::MinLen(16)),
            // Storage
            ConfigKey::new("DATABASE_URL", ValueKind::String)
                .with_default("sqlite:///./data/rag_system.db"),
            // Interfaces
            ConfigKey::new("DEBUG", ValueKind::Bool).with_default("false"),
            ConfigKey::new("FASTAPI_PORT", ValueKind::Int)
                .with_default("8000")
                .with_rule(ValueRule::Range { min: 1, max: 65535 }),
            ConfigKey::new("STREAMLIT_PORT", ValueKind::Int)
                .with_default("8501")
                .with_rule(ValueRule::Range { min: 1, max: 65535 }),
        ];

        let groups = vec![RequireAnyGroup {
            keys: &["OPENAI_API_KEY", "ANTHROPIC_API_KEY"],
        }];

        Self::new(keys, groups)
    }

    /// Look up a declared key by name.
    #[must_use]
    pub fn key(&self, name: &str) -> Option<&ConfigKey> {
        self.keys.iter().find(|key| key.name == name)
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.keys.iter()
    }

    /// At-least-one-of groups.
    pub fn groups(&self) -> impl Iterator<Item = &RequireAnyGroup> {
        self.groups.iter()
    }

    /// Number of declared keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the schema declares no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parse() {
        assert_eq!(Profile::parse("development"), Some(Profile::Development));
        assert_eq!(Profile::parse("Production"), Some(Profile::Production));
        assert_eq!(Profile::parse("TESTING"), Some(Profile::Testing));
        assert_eq!(Profile::parse("staging"), None);
        assert_eq!(Profile::parse(""), None);
    }

    #[test]
    fn test_profile_display() {
        assert_eq!(Profile::Development.to_string(), "development");
        assert_eq!(Profile::Production.to_string(), "production");
    }

    #[test]
    fn test_profile_serde() {
        let profile: Profile = serde_json::from_str(r#""production""#).unwrap();
        assert_eq!(profile, Profile::Production);
        assert_eq!(
            serde_json::to_string(&Profile::Testing).unwrap(),
            r#""testing""#
        );
    }

    #[test]
    fn test_requirement_applies_to() {
        assert!(Requirement::Required.applies_to(Profile::Development));
        assert!(!Requirement::Optional.applies_to(Profile::Production));
        assert!(Requirement::RequiredIn(Profile::Production).applies_to(Profile::Production));
        assert!(!Requirement::RequiredIn(Profile::Production).applies_to(Profile::Testing));
    }

    #[test]
    fn test_default_for_prefers_profile_override() {
        let key = ConfigKey::new("REDIS_DB", ValueKind::Int)
            .with_default("0")
            .with_profile_default(Profile::Testing, "1");

        assert_eq!(key.default_for(Profile::Testing), Some("1"));
        assert_eq!(key.default_for(Profile::Development), Some("0"));
        assert_eq!(key.default_for(Profile::Production), Some("0"));
    }

    #[test]
    fn test_default_for_without_any_default() {
        let key = ConfigKey::new("PINECONE_API_KEY", ValueKind::Secret).required();
        assert_eq!(key.default_for(Profile::Development), None);
    }

    #[test]
    fn test_rule_descriptions() {
        assert_eq!(
            ValueRule::Pattern("^sk-").describe(),
            "must match pattern ^sk-"
        );
        assert_eq!(
            ValueRule::MinLen(16).describe(),
            "must be at least 16 characters"
        );
        assert_eq!(
            ValueRule::Range { min: 1, max: 65535 }.describe(),
            "must be between 1 and 65535"
        );
    }

    #[test]
    fn test_alexandria_schema_declares_core_keys() {
        let schema = Schema::alexandria();

        for name in [
            "ENVIRONMENT",
            "OPENAI_API_KEY",
            "ANTHROPIC_API_KEY",
            "PINECONE_API_KEY",
            "PINECONE_ENVIRONMENT",
            "PINECONE_INDEX_NAME",
            "REDIS_HOST",
            "REDIS_PORT",
            "REDIS_DB",
            "REDIS_PASSWORD",
            "REDIS_MAX_CONNECTIONS",
            "MAX_WORKERS",
            "TIMEOUT_SECONDS",
            "LOG_LEVEL",
            "SECRET_KEY",
            "DATABASE_URL",
        ] {
            assert!(schema.key(name).is_some(), "missing key {name}");
        }

        assert!(schema.key("NOT_A_KEY").is_none());
        assert_eq!(schema.groups().count(), 1);
    }

    #[test]
    fn test_alexandria_schema_key_names_are_unique() {
        let schema = Schema::alexandria();
        let mut names: Vec<_> = schema.keys().map(|key| key.name).collect();
        names.sort_unstable();
        let total = names.len();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_secret_keys_are_marked() {
        let schema = Schema::alexandria();
        assert!(schema.key("OPENAI_API_KEY").unwrap().is_secret());
        assert!(schema.key("SECRET_KEY").unwrap().is_secret());
        assert!(!schema.key("REDIS_HOST").unwrap().is_secret());
    }

    #[test]
    fn test_secret_key_required_only_in_production() {
        let schema = Schema::alexandria();
        let key = schema.key("SECRET_KEY").unwrap();
        assert!(key.requirement.applies_to(Profile::Production));
        assert!(!key.requirement.applies_to(Profile::Development));
        assert!(!key.requirement.applies_to(Profile::Testing));
    }
}
