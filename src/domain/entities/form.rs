use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::record::Record;

/// Field key -> raw text as typed into the modal.
pub type FormValues = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    /// Rendered as a password input.
    pub secret: bool,
    /// Only asked for when creating a record.
    pub create_only: bool,
}

impl FormField {
    pub const fn required(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            required: true,
            secret: false,
            create_only: false,
        }
    }

    pub const fn optional(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            required: false,
            secret: false,
            create_only: false,
        }
    }

    pub const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub const fn create_only(mut self) -> Self {
        self.create_only = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{label} must be a number, got \"{value}\"")]
    NotANumber { label: &'static str, value: String },
    #[error("{label} is invalid: {reason}")]
    Invalid {
        label: &'static str,
        reason: &'static str,
    },
}

/// Whether the modal is adding a record or changing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// A record the dashboard can create, edit and delete through its modal.
pub trait Editable: Record {
    /// JSON body sent on create and update.
    type Draft: Serialize + Send + Sync + 'static;

    fn form_fields() -> Vec<FormField>;

    fn to_form(&self) -> FormValues;

    fn draft_from_form(values: &FormValues, mode: FormMode) -> Result<Self::Draft, FormError>;
}

/// Fields shown for `mode`.
pub fn visible_fields(fields: &[FormField], mode: FormMode) -> Vec<FormField> {
    fields
        .iter()
        .filter(|field| mode == FormMode::Create || !field.create_only)
        .copied()
        .collect()
}

pub fn empty_form(fields: &[FormField]) -> FormValues {
    fields
        .iter()
        .map(|field| (field.key.to_string(), String::new()))
        .collect()
}

/// Trimmed value of `field`, rejecting blanks when the field is required.
pub fn text_value(values: &FormValues, field: &FormField) -> Result<String, FormError> {
    let value = values
        .get(field.key)
        .map(|value| value.trim().to_string())
        .unwrap_or_default();
    if field.required && value.is_empty() {
        return Err(FormError::Missing(field.label));
    }
    Ok(value)
}

pub fn optional_value(values: &FormValues, key: &str) -> Option<String> {
    values
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// A reference to another record. Blank on create leaves the key out; blank
/// on edit becomes an explicit `null` so the server drops the link.
pub fn link_value(values: &FormValues, key: &str, mode: FormMode) -> Option<Option<String>> {
    match (optional_value(values, key), mode) {
        (Some(value), _) => Some(Some(value)),
        (None, FormMode::Create) => None,
        (None, FormMode::Edit) => Some(None),
    }
}

pub fn number_value(values: &FormValues, field: &FormField) -> Result<f64, FormError> {
    let raw = text_value(values, field)?;
    let cleaned = raw.replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(FormError::NotANumber {
            label: field.label,
            value: raw,
        })
}

pub fn whole_number_value(values: &FormValues, field: &FormField) -> Result<u32, FormError> {
    let raw = text_value(values, field)?;
    raw.parse::<u32>().map_err(|_| FormError::NotANumber {
        label: field.label,
        value: raw,
    })
}

pub fn email_value(values: &FormValues, field: &FormField) -> Result<String, FormError> {
    let value = text_value(values, field)?;
    if !value.is_empty() && !looks_like_email(&value) {
        return Err(FormError::Invalid {
            label: field.label,
            reason: "expected an address like name@school.org",
        });
    }
    Ok(value)
}

pub fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !value.contains(' '),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: FormField = FormField::required("name", "Name");
    const PRICE: FormField = FormField::required("price", "Price");
    const NOTE: FormField = FormField::optional("note", "Note");

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn required_blank_field_is_rejected() {
        let form = values(&[("name", "   ")]);
        assert_eq!(text_value(&form, &NAME), Err(FormError::Missing("Name")));
    }

    #[test]
    fn optional_blank_field_is_none() {
        let form = values(&[("note", " ")]);
        assert_eq!(text_value(&form, &NOTE), Ok(String::new()));
        assert_eq!(optional_value(&form, "note"), None);
    }

    #[test]
    fn numbers_accept_thousands_separators() {
        let form = values(&[("price", "1,250.50")]);
        assert_eq!(number_value(&form, &PRICE), Ok(1250.5));

        let bad = values(&[("price", "ten")]);
        assert!(matches!(
            number_value(&bad, &PRICE),
            Err(FormError::NotANumber { .. })
        ));
    }

    #[test]
    fn create_only_fields_hidden_when_editing() {
        let fields = [NAME, FormField::required("password", "Password").secret().create_only()];

        assert_eq!(visible_fields(&fields, FormMode::Create).len(), 2);
        assert_eq!(visible_fields(&fields, FormMode::Edit), vec![NAME]);
    }

    #[test]
    fn email_shape_check() {
        assert!(looks_like_email("head@school.org"));
        assert!(!looks_like_email("head school.org"));
        assert!(!looks_like_email("@school.org"));
    }
}
