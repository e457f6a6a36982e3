use std::fmt::Display;

use serde::Serialize;

use crate::error::ApiError;

/// One rejected field in a request payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Collects field errors so a request reports every problem at once.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.errors.push(FieldError {
                field: field.to_string(),
                message: message.into(),
            });
        }
        self
    }

    pub fn required(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.trim().is_empty() {
            return self.check(false, field, format!("The {} field is required.", field));
        }
        self.max_len(field, value, max)
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        let ok = value.chars().count() <= max;
        self.check(
            ok,
            field,
            format!("The field {} must be a string with a maximum length of {}.", field, max),
        )
    }

    pub fn optional_max_len(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        match value {
            Some(v) => self.max_len(field, v, max),
            None => self,
        }
    }

    pub fn range<T>(&mut self, field: &str, value: T, min: T, max: T) -> &mut Self
    where
        T: PartialOrd + Display + Copy,
    {
        let ok = value >= min && value <= max;
        self.check(
            ok,
            field,
            format!("The field {} must be between {} and {}.", field, min, max),
        )
    }

    pub fn optional_range<T>(&mut self, field: &str, value: Option<T>, min: T, max: T) -> &mut Self
    where
        T: PartialOrd + Display + Copy,
    {
        match value {
            Some(v) => self.range(field, v, min, max),
            None => self,
        }
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(is_valid_email(value), field, "A valid email address is required.")
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn finish(&mut self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

/// Structural check only: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
