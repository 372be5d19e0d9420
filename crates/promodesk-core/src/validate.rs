//! Field-level validation for editor drafts and generation inputs.
//!
//! Every rule reports against a named field; a draft with any error is
//! rejected as a whole and never reaches a collection.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of field errors produced by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if at least one error is reported for `field`.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// First message reported for `field`, if any.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// End date may equal the start date but never precede it.
#[must_use]
pub fn end_not_before_start(start: NaiveDate, end: NaiveDate) -> bool {
    end >= start
}

/// Two optional associations are mutually exclusive; neither is required.
#[must_use]
pub fn at_most_one_association(a: Option<&str>, b: Option<&str>) -> bool {
    !(is_present(a) && is_present(b))
}

/// Treats blank strings the same as absent values.
#[must_use]
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Normalizes an optional text field: trims, and maps blank to `None`.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

/// Accumulates field errors across a draft.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_len(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if value.trim().chars().count() < min {
            self.errors
                .push(field, format!("must be at least {min} characters"));
        }
        self
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.errors
                .push(field, format!("must be at most {max} characters"));
        }
        self
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(field, "is required");
        }
        self
    }

    pub fn url(&mut self, field: &str, value: &str) -> &mut Self {
        if !is_http_url(value) {
            self.errors.push(field, "must be a valid URL");
        }
        self
    }

    /// Validates the URL only when a non-blank value is given.
    pub fn optional_url(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            self.url(field, v);
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !EMAIL_RE.is_match(value.trim()) {
            self.errors.push(field, "must be a valid email address");
        }
        self
    }

    pub fn range(&mut self, field: &str, value: Decimal, min: Decimal, max: Decimal) -> &mut Self {
        if value < min || value > max {
            self.errors
                .push(field, format!("must be between {min} and {max}"));
        }
        self
    }

    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(field, message);
        }
        self
    }

    pub fn error(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors.push(field, message);
        self
    }

    /// Returns `value` when no rule failed.
    ///
    /// # Errors
    ///
    /// Returns the accumulated [`FieldErrors`] when any rule failed.
    pub fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }

    /// Like [`Validator::finish`] but defers building the value until the
    /// draft is known to be valid.
    ///
    /// # Errors
    ///
    /// Returns the accumulated [`FieldErrors`] when any rule failed.
    pub fn finish_with<T>(self, build: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(build())
        } else {
            Err(self.errors)
        }
    }
}

fn is_http_url(value: &str) -> bool {
    url::Url::parse(value.trim())
        .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
}
