use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::ValidationError;

use crate::duplicate::{check_duplicate, DuplicateCheck};
use crate::error::RegistrationError;
use crate::leads::{HistoryEntry, LeadField};

// Same rule browsers apply to `<input type="email">`; no TLD is required.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("static regex")
});

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("invalid_email_format"));
    }
    Ok(())
}

pub fn validate_required(value: Option<&str>) -> Result<(), ValidationError> {
    if value.map_or(true, |v| v.trim().is_empty()) {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn field_error(mut error: ValidationError, field: &LeadField) -> ValidationError {
    error.add_param(Cow::from("field"), &field.id);
    error.message = Some(Cow::from(field.label.clone()));
    error
}

/// Everything standing between the current form values and a spin.
#[derive(Debug, Clone)]
pub struct FormReport {
    pub missing: Vec<ValidationError>,
    pub malformed: Vec<ValidationError>,
    pub duplicate: DuplicateCheck,
}

impl FormReport {
    pub fn evaluate(
        values: &BTreeMap<String, String>,
        fields: &[LeadField],
        history: &[HistoryEntry],
    ) -> Self {
        let mut missing = Vec::new();
        let mut malformed = Vec::new();

        for field in fields {
            let value = values.get(&field.id).map(String::as_str);
            if field.required {
                if let Err(e) = validate_required(value) {
                    missing.push(field_error(e, field));
                    continue;
                }
            }
            if field.field_type == "email" {
                if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
                    if let Err(e) = validate_email(v) {
                        malformed.push(field_error(e, field));
                    }
                }
            }
        }

        Self {
            missing,
            malformed,
            duplicate: check_duplicate(values, fields, history),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.missing.is_empty() && self.malformed.is_empty() && !self.duplicate.is_duplicate()
    }

    /// Labels of the fields carried by a list of errors.
    fn labels(errors: &[ValidationError]) -> Vec<String> {
        errors
            .iter()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect()
    }

    /// Most pressing problem first: duplicates, then missing, then malformed.
    pub fn into_result(self) -> Result<(), RegistrationError> {
        if let DuplicateCheck::Duplicate { field_label, value, .. } = self.duplicate {
            return Err(RegistrationError::DuplicateIdentity { field_label, value });
        }
        if !self.missing.is_empty() {
            return Err(RegistrationError::IncompleteRequiredFields {
                fields: Self::labels(&self.missing),
            });
        }
        if let Some(label) = Self::labels(&self.malformed).into_iter().next() {
            return Err(RegistrationError::MalformedEmail { field_label: label });
        }
        Ok(())
    }
}
