//! Declarative field validation.
//!
//! Each input record lists its rules as `(field, check, message)` triples in
//! [`InputRecord::rules`]. [`validate`] evaluates them all and reports every
//! offending field at once. Nothing here reads storage.

use crate::{InputRecord, ModelError, ModelResult};
use assay_types::{DatasetRef, Key};
use std::collections::BTreeSet;
use std::fmt;

/// Tunables that parameterize the rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationLimits {
    /// Upper bound on entity names, in characters.
    pub max_name_length: usize,
    /// Upper bound on the number of samples registered in one call.
    pub max_batch_size: usize,
    /// Values accepted in `Permissions` fields.
    pub allowed_permissions: Vec<String>,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_name_length: 100,
            max_batch_size: 500,
            allowed_permissions: vec!["all".to_string()],
        }
    }
}

/// A predicate over one string field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Must be left empty; the field is filled in by a later registration.
    Empty,
    /// Character count within `min..=max`.
    Length { min: usize, max: usize },
    /// A 64-character hex hash.
    Hex64,
    /// Empty, or a 64-character hex hash.
    OptionalHex64,
    /// Comma-separated, non-empty list of at most `max` distinct hex hashes.
    Hex64List { max: usize },
    /// An absolute URL with a host.
    Url,
    /// `"true"` or `"false"`.
    Boolean,
    /// One of a fixed set of values.
    OneOf(Vec<String>),
    /// A `"<dataManagerKey>:<sampleKey>,..."` dataset reference.
    Dataset,
}

impl Check {
    pub fn passes(&self, value: &str) -> bool {
        match self {
            Self::Empty => value.is_empty(),
            Self::Length { min, max } => {
                let len = value.chars().count();
                (*min..=*max).contains(&len)
            }
            Self::Hex64 => Key::is_valid(value),
            Self::OptionalHex64 => value.is_empty() || Key::is_valid(value),
            Self::Hex64List { max } => {
                let items = split_list(value);
                let distinct: BTreeSet<&str> = items.iter().map(String::as_str).collect();
                !items.is_empty()
                    && items.len() <= *max
                    && distinct.len() == items.len()
                    && items.iter().all(|k| Key::is_valid(k))
            }
            Self::Url => url::Url::parse(value).map(|u| u.has_host()).unwrap_or(false),
            Self::Boolean => matches!(value, "true" | "false"),
            Self::OneOf(options) => options.iter().any(|o| o == value),
            Self::Dataset => DatasetRef::parse(value).is_ok(),
        }
    }

    /// Default message reported when the check fails.
    pub fn message(&self) -> String {
        match self {
            Self::Empty => "must be empty".to_string(),
            Self::Length { min, max } => format!("must be between {min} and {max} characters"),
            Self::Hex64 => "must be a 64-character hexadecimal hash".to_string(),
            Self::OptionalHex64 => "must be empty or a 64-character hexadecimal hash".to_string(),
            Self::Hex64List { max } => {
                format!("must list between 1 and {max} distinct comma-separated 64-character hexadecimal hashes")
            }
            Self::Url => "must be a valid URL".to_string(),
            Self::Boolean => "must be 'true' or 'false'".to_string(),
            Self::OneOf(options) => format!("must be one of: {}", options.join(", ")),
            Self::Dataset => {
                "must be '<dataManagerKey>:<dataSampleKey>,...' without repeated sample keys"
                    .to_string()
            }
        }
    }
}

/// Splits a comma-separated list, ignoring spaces.
pub fn split_list(value: &str) -> Vec<String> {
    let stripped = value.replace(' ', "");
    if stripped.is_empty() {
        return Vec::new();
    }
    stripped.split(',').map(str::to_string).collect()
}

/// One `(field, check, message)` triple bound to an accessor on `T`.
pub struct Rule<T> {
    pub field: &'static str,
    pub get: fn(&T) -> &str,
    pub check: Check,
    pub message: String,
}

impl<T> Rule<T> {
    pub fn new(field: &'static str, get: fn(&T) -> &str, check: Check) -> Self {
        let message = check.message();
        Self {
            field,
            get,
            check,
            message,
        }
    }

    /// Replaces the default failure message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn evaluate(&self, input: &T) -> Option<Violation> {
        if self.check.passes((self.get)(input)) {
            None
        } else {
            Some(Violation {
                field: self.field,
                message: self.message.clone(),
            })
        }
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("check", &self.check)
            .field("message", &self.message)
            .finish()
    }
}

/// A failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Runs every rule of `T` against `input`.
///
/// Only the first failing rule of each field is reported.
pub fn validate<T: InputRecord>(input: &T, limits: &ValidationLimits) -> ModelResult<()> {
    let mut violations: Vec<Violation> = Vec::new();
    for rule in T::rules(limits) {
        if violations.iter().any(|v| v.field == rule.field) {
            continue;
        }
        if let Some(violation) = rule.evaluate(input) {
            violations.push(violation);
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ModelError::Validation {
            entity: T::ENTITY,
            violations,
        })
    }
}
