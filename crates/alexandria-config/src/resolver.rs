//! Schema-driven resolution of raw environment values.
//!
//! Resolution is a synchronous, one-shot pass performed at process start:
//! every declared key is looked up, defaulted, coerced, and rule-checked, and
//! every problem is collected before anything is reported. Failing fast with
//! the complete diagnostic beats discovering a missing key hours into an
//! ingestion run.

use indexmap::IndexMap;
use regex::Regex;

use crate::config::{ResolvedConfig, Value};
use crate::error::ValidationError;
use crate::loader::RawEnvironment;
use crate::schema::{ConfigKey, Profile, Schema, ValueKind, ValueRule, ENVIRONMENT_KEY};

/// Resolve `raw` against `schema`, producing an immutable [`ResolvedConfig`].
///
/// The profile is selected from the `ENVIRONMENT` key before the schema walk
/// so that profile-specific defaults apply. Empty string values are treated
/// as unset.
///
/// # Errors
///
/// Returns every [`ValidationError`] discovered, in schema declaration order
/// (group errors last). Construction either fully succeeds or fails; no
/// partially-valid configuration is ever produced.
pub fn resolve(
    schema: &Schema,
    raw: &RawEnvironment,
) -> Result<ResolvedConfig, Vec<ValidationError>> {
    let profile = select_profile(raw);

    let mut errors = Vec::new();
    let mut values: IndexMap<&'static str, Value> = IndexMap::new();

    for key in schema.keys() {
        let explicit = raw.get(key.name).filter(|value| !value.is_empty());
        let effective = explicit.or_else(|| key.default_for(profile));

        match effective {
            Some(text) => match coerce(key, text) {
                Ok(value) => {
                    values.insert(key.name, value);
                }
                Err(rule) => errors.push(ValidationError::InvalidKeyFormat {
                    key: key.name,
                    rule,
                }),
            },
            None => {
                if key.requirement.applies_to(profile) {
                    errors.push(ValidationError::MissingRequiredKey { key: key.name });
                }
            }
        }
    }

    for group in schema.groups() {
        let satisfied = group
            .keys
            .iter()
            .any(|name| raw.get(name).is_some_and(|value| !value.is_empty()));
        if !satisfied {
            errors.push(ValidationError::MissingRequiredGroup {
                keys: group.keys.to_vec(),
            });
        }
    }

    if errors.is_empty() {
        Ok(ResolvedConfig::new(profile, values))
    } else {
        Err(errors)
    }
}

impl Schema {
    /// Resolve `raw` against this schema. See [`resolve`].
    ///
    /// # Errors
    ///
    /// Returns every collected [`ValidationError`].
    pub fn resolve(&self, raw: &RawEnvironment) -> Result<ResolvedConfig, Vec<ValidationError>> {
        resolve(self, raw)
    }
}

// The profile must be known before the schema walk so profile defaults
// apply. An unparseable ENVIRONMENT value falls back to Development here;
// the schema walk still records the InvalidKeyFormat error for the key
// itself, so the problem is reported exactly once.
fn select_profile(raw: &RawEnvironment) -> Profile {
    raw.get(ENVIRONMENT_KEY)
        .filter(|value| !value.is_empty())
        .and_then(Profile::parse)
        .unwrap_or_default()
}

// Coerce `text` to the key's kind and apply its rule. On failure the
// violated rule is described without echoing the value, so secret material
// never reaches diagnostics.
fn coerce(key: &ConfigKey, text: &str) -> Result<Value, String> {
    let value = match key.kind {
        ValueKind::String => Value::Str(text.to_string()),
        ValueKind::Int => match text.trim().parse::<i64>() {
            Ok(parsed) => Value::Int(parsed),
            Err(_) => return Err("expected an integer".to_string()),
        },
        ValueKind::Bool => match parse_bool(text) {
            Some(parsed) => Value::Bool(parsed),
            None => return Err("expected one of true, false, 1, 0".to_string()),
        },
        ValueKind::Enum(allowed) => {
            match allowed.iter().find(|option| option.eq_ignore_ascii_case(text)) {
                Some(canonical) => Value::Str((*canonical).to_string()),
                None => return Err(format!("expected one of {}", allowed.join(", "))),
            }
        }
        ValueKind::Secret => Value::Secret(text.to_string()),
    };

    if let Some(rule) = key.rule {
        check_rule(key, rule, &value)?;
    }

    Ok(value)
}

fn check_rule(key: &ConfigKey, rule: ValueRule, value: &Value) -> Result<(), String> {
    let satisfied = match (rule, value) {
        (ValueRule::Pattern(pattern), Value::Str(text) | Value::Secret(text)) => {
            // Patterns are declared statically in the schema; a pattern that
            // fails to compile is a schema defect, not an input problem.
            let re = Regex::new(pattern)
                .unwrap_or_else(|e| panic!("schema pattern for {} is invalid: {e}", key.name));
            re.is_match(text)
        }
        (ValueRule::MinLen(min), Value::Str(text) | Value::Secret(text)) => {
            text.chars().count() >= min
        }
        (ValueRule::Range { min, max }, Value::Int(number)) => (min..=max).contains(number),
        // Rule kinds that do not apply to the value's type are vacuous.
        _ => true,
    };

    if satisfied {
        Ok(())
    } else {
        Err(rule.describe())
    }
}

// Booleans accept exactly true/false/1/0, case-insensitive.
fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
