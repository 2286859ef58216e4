use serde::Serialize;
use std::fmt;

/// A single rejected field with a human readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of field errors. The first entry is what clients see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.to_string(),
                message: message.into(),
            }],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn first_message(&self) -> &str {
        self.errors
            .first()
            .map(|error| error.message.as_str())
            .unwrap_or("Invalid input data")
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.first_message())
    }
}

impl std::error::Error for ValidationErrors {}

/// Accumulates field checks, mirroring schema validation on request bodies.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn min_chars(&mut self, field: &str, value: &str, min: usize) {
        if value.trim().chars().count() < min {
            let message = if min == 1 {
                format!("{} is required", label(field))
            } else {
                format!("{} must be at least {min} characters", label(field))
            };
            self.fail(field, message);
        }
    }

    pub fn max_chars(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.fail(
                field,
                format!("{} must be at most {max} characters", label(field)),
            );
        }
    }

    pub fn chars_between(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let before = self.errors.len();
        self.min_chars(field, value, min);
        if self.errors.len() == before {
            self.max_chars(field, value, max);
        }
    }

    pub fn optional_max_chars(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            self.max_chars(field, value, max);
        }
    }

    pub fn optional_chars_between(
        &mut self,
        field: &str,
        value: Option<&str>,
        min: usize,
        max: usize,
    ) {
        if let Some(value) = value {
            self.chars_between(field, value, min, max);
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if !is_email(value) {
            self.fail(field, "Invalid email address");
        }
    }

    pub fn optional_email(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.email(field, value);
        }
    }

    pub fn optional_url(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            if !is_url(value) {
                self.fail(field, format!("{} must be a valid URL", label(field)));
            }
        }
    }

    pub fn non_negative(&mut self, field: &str, value: Option<f64>) {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                self.fail(field, format!("{} must be positive", label(field)));
            }
        }
    }

    pub fn within(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) {
        if let Some(value) = value {
            if !value.is_finite() || value < min || value > max {
                self.fail(
                    field,
                    format!("{} must be between {min} and {max}", label(field)),
                );
            }
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

/// Loose structural e-mail check: one `@`, non-empty local part, dotted domain.
pub fn is_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Absolute `http(s)` URLs or site-relative paths produced by the upload store.
pub fn is_url(value: &str) -> bool {
    let value = value.trim();
    if value.starts_with('/') && !value.starts_with("//") {
        return value.len() > 1;
    }
    ["https://", "http://"].iter().any(|scheme| {
        value
            .strip_prefix(scheme)
            .map(|rest| {
                let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
                !host.is_empty() && !host.chars().any(char::is_whitespace)
            })
            .unwrap_or(false)
    })
}

fn label(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
