use serde::{Deserialize, Serialize};
use std::env;

use crate::constants::{
    EXTRA_TURNS, EXTRA_TURNS_ENV, FREE_TIER_MAX_PRIZES, POINTER_ANGLE, SPIN_DURATION_ENV,
    SPIN_DURATION_MS,
};
use crate::error::ConfigError;
use crate::inventory::PrizeItem;
use crate::leads::LeadField;

/// Subscription level of the account owning the wheel.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Pro,
    Ppe,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Permissions {
    pub can_auto_remove: bool,
    pub has_advanced_inventory: bool,
    pub max_prizes: Option<usize>,
}

/// Per-account wheel configuration as stored by the host.
///
/// Keys the core does not consume (colors, fonts, logos) are ignored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WheelConfig {
    pub title: String,
    pub prizes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_prizes: Option<Vec<PrizeItem>>,
    pub require_registration: bool,
    pub lead_fields: Vec<LeadField>,
    pub level: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

impl WheelConfig {
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Names shown on the wheel: the weighted inventory when it has entries,
    /// the simple list otherwise.
    pub fn current_prizes(&self) -> Vec<String> {
        match &self.advanced_prizes {
            Some(items) if !items.is_empty() => items.iter().map(|p| p.name.clone()).collect(),
            _ => self.prizes.clone(),
        }
    }

    /// Prize cap for this account. `None` means unlimited.
    pub fn max_prizes(&self, is_admin: bool) -> Option<usize> {
        if is_admin {
            return None;
        }
        if let Some(max) = self.permissions.as_ref().and_then(|p| p.max_prizes) {
            return Some(max);
        }
        match self.level {
            Tier::Free => Some(FREE_TIER_MAX_PRIZES),
            Tier::Pro | Tier::Ppe => None,
        }
    }

    /// Whether awarded prizes are taken out of stock with
    /// [`PrizeEditor::decrement_stock`](crate::inventory::PrizeEditor::decrement_stock).
    pub fn can_auto_remove(&self) -> bool {
        self.permissions.as_ref().map_or(false, |p| p.can_auto_remove)
    }
}

/// Animation constants for a spin.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SpinSettings {
    pub extra_turns: u32,
    pub duration_ms: f64,
    /// Angle (radians, canvas orientation) the pointer marks.
    pub pointer_angle: f64,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            extra_turns: EXTRA_TURNS,
            duration_ms: SPIN_DURATION_MS,
            pointer_angle: POINTER_ANGLE,
        }
    }
}

impl SpinSettings {
    /// Defaults overridden by `WHEEL_EXTRA_TURNS` / `WHEEL_SPIN_DURATION_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup(EXTRA_TURNS_ENV) {
            settings.extra_turns = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: EXTRA_TURNS_ENV,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(SPIN_DURATION_ENV) {
            let duration: f64 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: SPIN_DURATION_ENV,
                value: raw.clone(),
            })?;
            if !duration.is_finite() || duration <= 0.0 {
                return Err(ConfigError::InvalidEnv {
                    key: SPIN_DURATION_ENV,
                    value: raw,
                });
            }
            settings.duration_ms = duration;
        }

        log::debug!(
            "Spin settings: {} extra turns over {}ms",
            settings.extra_turns,
            settings.duration_ms
        );
        Ok(settings)
    }
}
