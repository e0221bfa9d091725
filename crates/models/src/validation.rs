//! Declarative field validation.
//!
//! Each entity publishes a table of [`FieldRules`]: a field name plus an ordered
//! list of constraints with the message reported when that constraint fails.
//! [`validate`] evaluates the whole table against any [`FieldSource`] and
//! collects every failure, so a client sees all problems with a payload at once.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// A field value as seen by the rule evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Number(Option<Decimal>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Present; for text also non-blank.
    Required,
    /// At most `n` characters.
    MaxLength(usize),
    /// Strictly greater than the bound.
    GreaterThan(Decimal),
    /// Greater than or equal to the bound.
    AtLeast(Decimal),
    /// No more than `n` significant decimal places.
    MaxScale(u32),
}

impl Constraint {
    /// Absent values only fail `Required`; every other constraint skips them.
    pub fn holds(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Constraint::Required, FieldValue::Text(v)) => v.is_some_and(|s| !s.trim().is_empty()),
            (Constraint::Required, FieldValue::Number(v)) => v.is_some(),
            (Constraint::MaxLength(max), FieldValue::Text(Some(s))) => s.chars().count() <= *max,
            (Constraint::GreaterThan(bound), FieldValue::Number(Some(n))) => n > *bound,
            (Constraint::AtLeast(bound), FieldValue::Number(Some(n))) => n >= *bound,
            (Constraint::MaxScale(scale), FieldValue::Number(Some(n))) => n.normalize().scale() <= *scale,
            _ => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub constraint: Constraint,
    pub message: &'static str,
}

impl Rule {
    pub fn new(constraint: Constraint, message: &'static str) -> Self {
        Self { constraint, message }
    }
}

/// All rules for one field, keyed by its wire name.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    pub fn new(field: &'static str, rules: Vec<Rule>) -> Self {
        Self { field, rules }
    }
}

/// Anything that can hand out field values by name.
pub trait FieldSource {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

/// Failures grouped by field, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Record a failure; a message already listed for the field is not repeated.
    pub fn add(&mut self, field: &str, message: &str) {
        let messages = self.0.entry(field.to_string()).or_default();
        if !messages.iter().any(|m| m == message) {
            messages.push(message.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for messages in self.0.values() {
            for m in messages {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(m)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate<S: FieldSource + ?Sized>(rules: &[FieldRules], source: &S) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for field_rules in rules {
        let value = source.field(field_rules.field);
        for rule in &field_rules.rules {
            if !rule.constraint.holds(value) {
                errors.add(field_rules.field, rule.message);
            }
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
