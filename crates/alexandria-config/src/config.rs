//! The immutable resolved configuration object.
//!
//! A [`ResolvedConfig`] is constructed exactly once, by
//! [`resolve`](crate::resolve), after every declared key has been validated.
//! It exposes read-only typed accessors and a redacted rendering for logs;
//! there is no setter and no partially-valid instance. Consumers receive the
//! object (or a narrow view of it) by reference instead of reading the
//! process environment themselves.

use std::fmt;

use indexmap::IndexMap;

use crate::schema::Profile;
use crate::ConfigError;

/// Mask substituted for secret values in any rendered output.
pub const SECRET_MASK: &str = "***";

/// A typed, validated configuration value.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    /// String value (also used for validated enum spellings).
    Str(String),
    /// Integer value.
    Int(i64),
    /// Boolean value.
    Bool(bool),
    /// Secret value; masked by `Debug` and every redacted rendering.
    Secret(String),
}

impl Value {
    /// Render for summaries, masking secrets.
    #[must_use]
    pub fn redacted(&self) -> String {
        match self {
            Self::Str(value) => value.clone(),
            Self::Int(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Secret(_) => SECRET_MASK.to_string(),
        }
    }
}

// Hand-written so that debug-logging a config cannot leak secret material.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Self::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::Secret(_) => f.debug_tuple("Secret").field(&SECRET_MASK).finish(),
        }
    }
}

/// Immutable snapshot of validated configuration.
///
/// Holds one typed value per resolved key, in schema declaration order.
/// Optional keys without a value are simply absent. The object is `Send`
/// and `Sync` and safe to share across arbitrary concurrent readers, since
/// nothing mutates it after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    profile: Profile,
    values: IndexMap<&'static str, Value>,
}

impl ResolvedConfig {
    pub(crate) fn new(profile: Profile, values: IndexMap<&'static str, Value>) -> Self {
        Self { profile, values }
    }

    /// The profile this configuration was resolved under.
    #[must_use]
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Whether `name` resolved to a value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Typed value for `name`, if it resolved.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of resolved keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String value for `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` never resolved or is not a string-kinded key. Such a
    /// call is a defect in the caller, not a runtime condition.
    #[must_use]
    pub fn get_str(&self, name: &str) -> &str {
        match self.expect_value(name) {
            Value::Str(value) => value,
            other => panic!("configuration key {name} is not a string: {other:?}"),
        }
    }

    /// Integer value for `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` never resolved or is not an integer-kinded key.
    #[must_use]
    pub fn get_int(&self, name: &str) -> i64 {
        match self.expect_value(name) {
            Value::Int(value) => *value,
            other => panic!("configuration key {name} is not an integer: {other:?}"),
        }
    }

    /// Boolean value for `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` never resolved or is not a boolean-kinded key.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        match self.expect_value(name) {
            Value::Bool(value) => *value,
            other => panic!("configuration key {name} is not a boolean: {other:?}"),
        }
    }

    /// Secret value for `name`.
    ///
    /// The returned string is the caller's responsibility; it must never be
    /// logged or rendered.
    ///
    /// # Panics
    ///
    /// Panics if `name` never resolved or is not a secret-kinded key.
    #[must_use]
    pub fn get_secret(&self, name: &str) -> &str {
        match self.expect_value(name) {
            Value::Secret(value) => value,
            other => panic!("configuration key {name} is not a secret: {other:?}"),
        }
    }

    /// String value for a declared key that may legitimately be unset.
    ///
    /// # Panics
    ///
    /// Panics if the key resolved to a non-string value.
    #[must_use]
    pub fn maybe_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            Value::Str(value) => Some(value),
            other => panic!("configuration key {name} is not a string: {other:?}"),
        }
    }

    /// Secret value for a declared key that may legitimately be unset.
    ///
    /// # Panics
    ///
    /// Panics if the key resolved to a non-secret value.
    #[must_use]
    pub fn maybe_secret(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            Value::Secret(value) => Some(value),
            other => panic!("configuration key {name} is not a secret: {other:?}"),
        }
    }

    /// Redacted key/value pairs in declaration order, for summaries.
    #[must_use]
    pub fn redacted_values(&self) -> IndexMap<&'static str, String> {
        self.values
            .iter()
            .map(|(name, value)| (*name, value.redacted()))
            .collect()
    }

    /// Display adapter rendering `KEY=value` lines with secrets masked.
    #[must_use]
    pub fn redacted(&self) -> Redacted<'_> {
        Redacted { config: self }
    }

    fn expect_value(&self, name: &str) -> &Value {
        match self.values.get(name) {
            Some(value) => value,
            None => panic!("{}", ConfigError::unknown_key(name)),
        }
    }
}

/// Redacted display view of a [`ResolvedConfig`].
///
/// Renders one `KEY=value` line per resolved key in declaration order;
/// every secret renders as [`SECRET_MASK`].
#[derive(Debug, Clone, Copy)]
pub struct Redacted<'a> {
    config: &'a ResolvedConfig,
}

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.config.values.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{name}={}", value.redacted())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> ResolvedConfig {
        let mut values = IndexMap::new();
        values.insert("REDIS_HOST", Value::Str("localhost".to_string()));
        values.insert("REDIS_PORT", Value::Int(6379));
        values.insert("DEBUG", Value::Bool(false));
        values.insert("OPENAI_API_KEY", Value::Secret("sk-abc123".to_string()));
        ResolvedConfig::new(Profile::Development, values)
    }

    #[test]
    fn test_typed_accessors() {
        let config = sample_config();
        assert_eq!(config.get_str("REDIS_HOST"), "localhost");
        assert_eq!(config.get_int("REDIS_PORT"), 6379);
        assert!(!config.get_bool("DEBUG"));
        assert_eq!(config.get_secret("OPENAI_API_KEY"), "sk-abc123");
        assert_eq!(config.profile(), Profile::Development);
    }

    #[test]
    fn test_maybe_accessors() {
        let config = sample_config();
        assert_eq!(config.maybe_str("REDIS_HOST"), Some("localhost"));
        assert_eq!(config.maybe_secret("REDIS_PASSWORD"), None);
    }

    #[test]
    #[should_panic(expected = "unknown configuration key: REDIS_HOTS")]
    fn test_undeclared_key_panics() {
        let config = sample_config();
        let _ = config.get_str("REDIS_HOTS");
    }

    #[test]
    #[should_panic(expected = "not an integer")]
    fn test_kind_mismatch_panics() {
        let config = sample_config();
        let _ = config.get_int("REDIS_HOST");
    }

    #[test]
    fn test_redacted_display_masks_secrets() {
        let config = sample_config();
        let rendered = config.redacted().to_string();

        assert!(rendered.contains("REDIS_HOST=localhost"));
        assert!(rendered.contains("REDIS_PORT=6379"));
        assert!(rendered.contains("OPENAI_API_KEY=***"));
        assert!(!rendered.contains("sk-abc123"));
    }

    #[test]
    fn test_debug_masks_secrets() {
        let config = sample_config();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-abc123"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_redacted_values_preserve_order() {
        let config = sample_config();
        let redacted = config.redacted_values();
        let names: Vec<_> = redacted.keys().copied().collect();
        assert_eq!(
            names,
            vec!["REDIS_HOST", "REDIS_PORT", "DEBUG", "OPENAI_API_KEY"]
        );
        assert_eq!(redacted["OPENAI_API_KEY"], "***");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(sample_config(), sample_config());
    }
}
