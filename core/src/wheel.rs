use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::animation::SpinAnimation;
use crate::config::SpinSettings;
use crate::error::SelectionError;
use crate::inventory::Inventory;
use crate::selector::{select_winner, Outcome};

/// Represents the current state of the wheel
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum WheelState {
    Idle,
    Spinning {
        outcome: Outcome,
        animation: SpinAnimation,
    },
    Resolved(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinStart {
    Started,
    /// A spin is already in flight.
    Ignored,
    /// Fewer than two prizes. Not reported to the user.
    Refused,
}

/// What to draw for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub angle: f64,
    /// Set on the final frame of a spin only.
    pub resolved: Option<Outcome>,
}

#[derive(Debug, Clone)]
pub struct Wheel {
    state: WheelState,
    angle: f64,
    settings: SpinSettings,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(SpinSettings::default())
    }
}

impl Wheel {
    pub fn new(settings: SpinSettings) -> Self {
        Self {
            state: WheelState::Idle,
            angle: 0.0,
            settings,
        }
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, WheelState::Spinning { .. })
    }

    /// Draws the winner from `inventory` as it is now and starts the
    /// animation towards it. Later inventory edits do not affect this spin.
    pub fn request_spin<R: Rng + ?Sized>(
        &mut self,
        inventory: &Inventory,
        rng: &mut R,
    ) -> Result<SpinStart, SelectionError> {
        if self.is_spinning() {
            return Ok(SpinStart::Ignored);
        }

        let outcome = match select_winner(inventory, rng) {
            Ok(outcome) => outcome,
            Err(e) if e.is_silent() => return Ok(SpinStart::Refused),
            Err(e) => return Err(e),
        };

        let animation = SpinAnimation::new(self.angle, outcome.index, inventory.len(), &self.settings);
        log::debug!(
            "Spin started towards {} (index {}), {:.3} -> {:.3}",
            outcome.prize_name,
            outcome.index,
            animation.start_angle,
            animation.end_angle
        );
        self.state = WheelState::Spinning { outcome, animation };
        Ok(SpinStart::Started)
    }

    /// Moves the animation to `elapsed_ms` after the spin started.
    pub fn advance(&mut self, elapsed_ms: f64) -> Frame {
        let (outcome, animation) = match &self.state {
            WheelState::Spinning { outcome, animation } => (outcome.clone(), *animation),
            _ => {
                return Frame {
                    angle: self.angle,
                    resolved: None,
                }
            }
        };

        self.angle = animation.angle_at(elapsed_ms);
        if !animation.is_finished(elapsed_ms) {
            return Frame {
                angle: self.angle,
                resolved: None,
            };
        }

        log::info!("🎡 WHEEL SPIN: landed on {} (index {})", outcome.prize_name, outcome.index);
        self.state = WheelState::Resolved(outcome.clone());
        Frame {
            angle: self.angle,
            resolved: Some(outcome),
        }
    }
}
