//! Form validation
//!
//! Field rules are declared as tables of `field -> constraint -> message`
//! and checked in one pass at submit time. Every failing rule is reported,
//! so a form can show all inline messages at once.

mod forms;

pub use forms::*;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Entity names: product, category, supplier, customer
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, return reasons
pub const MAX_NOTE_LEN: usize = 500;

/// SKU, barcode, phone
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Value of one form field as seen by the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(Decimal),
    Missing,
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a Option<String>) -> Self {
        value
            .as_deref()
            .map(FieldValue::Text)
            .unwrap_or(FieldValue::Missing)
    }

    pub fn number(value: impl Into<Decimal>) -> Self {
        FieldValue::Number(value.into())
    }

    pub fn optional_number(value: Option<impl Into<Decimal>>) -> Self {
        value
            .map(|v| FieldValue::Number(v.into()))
            .unwrap_or(FieldValue::Missing)
    }

    fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Missing => true,
        }
    }

    fn as_number(&self) -> Option<Decimal> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Read access to the fields a schema names
pub trait FormValues {
    fn value(&self, field: &str) -> FieldValue<'_>;
}

/// A single constraint. All but `Required` accept blank values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(Decimal),
    Max(Decimal),
    /// Strictly greater than zero
    Positive,
    /// Numeric value must be >= the named field's value
    AtLeastField(&'static str),
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn new(field: &'static str, rule: Rule, message: &'static str) -> Self {
        Self {
            field,
            rule,
            message,
        }
    }

    fn passes(&self, form: &dyn FormValues) -> bool {
        let value = form.value(self.field);

        if let Rule::Required = self.rule {
            return !value.is_blank();
        }
        if value.is_blank() {
            return true;
        }

        match (self.rule, value) {
            (Rule::MinLength(min), FieldValue::Text(text)) => text.trim().chars().count() >= min,
            (Rule::MaxLength(max), FieldValue::Text(text)) => text.chars().count() <= max,
            (Rule::Email, FieldValue::Text(text)) => looks_like_email(text.trim()),
            (Rule::Min(min), FieldValue::Number(n)) => n >= min,
            (Rule::Max(max), FieldValue::Number(n)) => n <= max,
            (Rule::Positive, FieldValue::Number(n)) => n > Decimal::ZERO,
            (Rule::AtLeastField(other), FieldValue::Number(n)) => {
                form.value(other).as_number().is_none_or(|other| n >= other)
            }
            // Length rules on numbers and numeric rules on text do not apply
            _ => true,
        }
    }
}

fn looks_like_email(text: &str) -> bool {
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !text.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("validation failed: {}", join_messages(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// First message for a field, for inline display
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Check every rule of `schema` against `form`
pub fn validate(form: &dyn FormValues, schema: &[FieldRule]) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = schema
        .iter()
        .filter(|rule| !rule.passes(form))
        .map(|rule| FieldError {
            field: rule.field,
            message: rule.message,
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}
