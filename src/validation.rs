//! Declarative request body validation.
//!
//! Each entity has one static [`Schema`]. Create and update both go through
//! [`Schema::parse`], so the two paths always apply the same rules.

use chrono::{Datelike, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// A bound on an integer field
#[derive(Debug, Clone, Copy)]
pub enum Limit {
    Value(i64),
    CurrentYear,
}

impl Limit {
    fn resolve(self, current_year: i32) -> i64 {
        match self {
            Limit::Value(value) => value,
            Limit::CurrentYear => i64::from(current_year),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text { min_length: usize },
    Integer { min: Option<Limit>, max: Option<Limit> },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug)]
pub struct Schema {
    pub entity: &'static str,
    pub fields: &'static [FieldRule],
}

const fn text(name: &'static str, min_length: usize) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Text { min_length },
    }
}

const fn integer(name: &'static str, min: Option<Limit>, max: Option<Limit>) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Integer { min, max },
    }
}

pub const BOOK_SCHEMA: Schema = Schema {
    entity: "book",
    fields: &[
        text("isbn", 1),
        text("amazon_url", 0),
        text("author", 0),
        text("language", 0),
        integer("pages", Some(Limit::Value(0)), None),
        text("publisher", 0),
        text("title", 0),
        integer("year", None, Some(Limit::CurrentYear)),
    ],
};

pub const USER_SCHEMA: Schema = Schema {
    entity: "user",
    fields: &[text("name", 1), text("type", 1)],
};

impl Schema {
    /// Check `value` against the current calendar year
    pub fn validate(&self, value: &Value) -> Result<(), Vec<String>> {
        self.validate_at(value, Utc::now().year())
    }

    /// Collect every violation in `value`, in field declaration order
    pub fn validate_at(&self, value: &Value, current_year: i32) -> Result<(), Vec<String>> {
        let Some(object) = value.as_object() else {
            return Err(vec![format!("{} must be a JSON object", self.entity)]);
        };

        let violations: Vec<String> = self
            .fields
            .iter()
            .filter_map(|rule| match object.get(rule.name) {
                None | Some(Value::Null) => Some(format!("\"{}\" is required", rule.name)),
                Some(field) => check_field(rule, field, current_year),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Validate, then deserialize into the typed record
    pub fn parse<T: DeserializeOwned>(&self, mut value: Value) -> Result<T, ApiError> {
        self.validate(&value).map_err(ApiError::Validation)?;
        self.normalize_integers(&mut value);
        serde_json::from_value(value).map_err(|e| ApiError::Validation(vec![e.to_string()]))
    }

    /// Rewrite whole-number floats as integers so they deserialize into `i32`
    fn normalize_integers(&self, value: &mut Value) {
        let Some(object) = value.as_object_mut() else {
            return;
        };
        for rule in self.fields {
            if let FieldKind::Integer { .. } = rule.kind {
                if let Some(field) = object.get_mut(rule.name) {
                    if let Some(n) = as_integer(field) {
                        *field = Value::from(n);
                    }
                }
            }
        }
    }
}

fn check_field(rule: &FieldRule, value: &Value, current_year: i32) -> Option<String> {
    match rule.kind {
        FieldKind::Text { min_length } => match value.as_str() {
            None => Some(format!("\"{}\" must be a string", rule.name)),
            Some(s) if min_length == 1 && s.is_empty() => {
                Some(format!("\"{}\" must not be empty", rule.name))
            }
            Some(s) if s.chars().count() < min_length => Some(format!(
                "\"{}\" must be at least {} characters long",
                rule.name, min_length
            )),
            Some(_) => None,
        },
        FieldKind::Integer { min, max } => {
            let Some(n) = as_integer(value) else {
                return Some(format!("\"{}\" must be an integer", rule.name));
            };
            let min = min.map_or(i64::from(i32::MIN), |l| l.resolve(current_year));
            let max = max.map_or(i64::from(i32::MAX), |l| l.resolve(current_year));
            if n < min {
                Some(format!("\"{}\" must be greater than or equal to {}", rule.name, min))
            } else if n > max {
                Some(format!("\"{}\" must be less than or equal to {}", rule.name, max))
            } else {
                None
            }
        }
    }
}

/// Integers, including floats with no fractional part such as `34.0`
fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}
