use thiserror::Error;

use crate::constants::{
    duplicate_notice, INVALID_EMAIL_NOTICE, MIN_PRIZES_NOTICE, NO_STOCK_NOTICE,
    REQUIRED_FIELDS_NOTICE,
};

/// Reasons a spin request produces no outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// Fewer than two names on the wheel. Callers treat this as a no-op.
    #[error("At least 2 prizes are required to spin, found {available}")]
    InsufficientInventory { available: usize },

    /// Weighted inventory present but nothing in stock.
    #[error("No prize has stock available")]
    NoStockAvailable,
}

impl SelectionError {
    /// `true` for refusals that must not be surfaced to the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::InsufficientInventory { .. })
    }

    /// User-facing notice, `None` for silent refusals.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::InsufficientInventory { .. } => None,
            Self::NoStockAvailable => Some(NO_STOCK_NOTICE),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    #[error("{field_label} already has a previous registration")]
    DuplicateIdentity { field_label: String, value: String },

    #[error("Required fields missing: {}", .fields.join(", "))]
    IncompleteRequiredFields { fields: Vec<String> },

    #[error("{field_label} is not a valid email address")]
    MalformedEmail { field_label: String },
}

impl RegistrationError {
    pub fn notice(&self) -> String {
        match self {
            Self::DuplicateIdentity { field_label, .. } => duplicate_notice(field_label),
            Self::IncompleteRequiredFields { .. } => REQUIRED_FIELDS_NOTICE.to_string(),
            Self::MalformedEmail { .. } => INVALID_EMAIL_NOTICE.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InventoryError {
    #[error("At least 2 prizes are required")]
    MinimumPrizes,

    #[error("Prize limit reached ({max})")]
    TierLimitReached { max: usize },

    #[error("No prize at position {0}")]
    UnknownPrize(usize),

    #[error("Weight must be a finite, non-negative number")]
    InvalidWeight,
}

impl InventoryError {
    pub fn notice(&self) -> String {
        match self {
            Self::MinimumPrizes => MIN_PRIZES_NOTICE.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config document error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices() {
        assert_eq!(SelectionError::NoStockAvailable.notice(), Some(NO_STOCK_NOTICE));
        assert_eq!(SelectionError::InsufficientInventory { available: 1 }.notice(), None);
        assert_eq!(InventoryError::MinimumPrizes.notice(), MIN_PRIZES_NOTICE);
        assert_eq!(InventoryError::TierLimitReached { max: 8 }.notice(), "Prize limit reached (8)");
        let dup = RegistrationError::DuplicateIdentity {
            field_label: "Email".into(),
            value: "a@x.com".into(),
        };
        assert_eq!(dup.notice(), "ACCESO DENEGADO: El Email ya tiene un registro previo.");
        assert_eq!(dup.to_string(), "Email already has a previous registration");
    }
}
