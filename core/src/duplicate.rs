//! Repeat-entrant detection for the registration form.
//!
//! A field counts as identity-bearing when its type is `email` or `tel`, or
//! when its id contains `email` or `telefono`. Its normalised value is then
//! compared against every value of every historical submission, regardless
//! of the key it was stored under. Schemas change over time, so a phone
//! number captured as `contacto` last month still blocks a `telefono` entry
//! today.

use std::collections::BTreeMap;

use crate::leads::{HistoryEntry, LeadField};

const IDENTITY_TYPES: [&str; 2] = ["email", "tel"];
const IDENTITY_ID_MARKERS: [&str; 2] = ["email", "telefono"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateCheck {
    Clear,
    Duplicate {
        field_id: String,
        field_label: String,
        /// Normalised value that matched history.
        value: String,
    },
}

impl DuplicateCheck {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn is_identity_field(field: &LeadField) -> bool {
    let id = field.id.to_lowercase();
    IDENTITY_TYPES.contains(&field.field_type.as_str())
        || IDENTITY_ID_MARKERS.iter().any(|marker| id.contains(marker))
}

/// First identity field, in schema order, whose value already appears in
/// history.
pub fn check_duplicate(
    values: &BTreeMap<String, String>,
    fields: &[LeadField],
    history: &[HistoryEntry],
) -> DuplicateCheck {
    for field in fields {
        let current = values.get(&field.id).map(|v| normalize(v)).unwrap_or_default();
        if current.is_empty() || !is_identity_field(field) {
            continue;
        }

        let seen = history.iter().any(|entry| {
            entry
                .lead_data
                .as_ref()
                .map_or(false, |data| data.values().any(|v| normalize(v) == current))
        });

        if seen {
            log::debug!("Duplicate {} detected in registration", field.id);
            return DuplicateCheck::Duplicate {
                field_id: field.id.clone(),
                field_label: field.label.clone(),
                value: current,
            };
        }
    }
    DuplicateCheck::Clear
}
