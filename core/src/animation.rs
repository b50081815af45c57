use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::config::SpinSettings;

/// Ease-out curve: 1 - (1-t)^4
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

fn slice_width(slices: usize) -> f64 {
    TAU / slices as f64
}

/// Wheel angle in [0, 2π) that centres slice `index` under the pointer.
/// An empty wheel has no slices and maps to the pointer itself.
pub fn target_angle(index: usize, slices: usize, settings: &SpinSettings) -> f64 {
    if slices == 0 {
        return settings.pointer_angle.rem_euclid(TAU);
    }
    let slice = slice_width(slices);
    (settings.pointer_angle - index as f64 * slice - slice / 2.0).rem_euclid(TAU)
}

/// Resting angle for a spin starting at `current`: the configured number of
/// full turns, then forward until the winning slice is under the pointer.
pub fn final_rotation(current: f64, index: usize, slices: usize, settings: &SpinSettings) -> f64 {
    let target = target_angle(index, slices, settings);
    let adjustment = (target - current.rem_euclid(TAU)).rem_euclid(TAU);
    current + settings.extra_turns as f64 * TAU + adjustment
}

/// Index of the slice the pointer marks when the wheel sits at `angle`.
/// Returns 0 for an empty wheel.
pub fn slice_under_pointer(angle: f64, slices: usize, settings: &SpinSettings) -> usize {
    if slices == 0 {
        return 0;
    }
    let slice = slice_width(slices);
    let relative = (settings.pointer_angle - angle).rem_euclid(TAU);
    ((relative / slice).floor() as usize).min(slices - 1)
}

/// Time-based interpolation from a start angle to a resting angle.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SpinAnimation {
    pub start_angle: f64,
    pub end_angle: f64,
    pub duration_ms: f64,
}

impl SpinAnimation {
    pub fn new(start_angle: f64, index: usize, slices: usize, settings: &SpinSettings) -> Self {
        Self {
            start_angle,
            end_angle: final_rotation(start_angle, index, slices, settings),
            duration_ms: settings.duration_ms,
        }
    }

    /// Eased progress in [0, 1] after `elapsed_ms`.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ease_out_quart(elapsed_ms / self.duration_ms)
    }

    pub fn angle_at(&self, elapsed_ms: f64) -> f64 {
        if self.is_finished(elapsed_ms) {
            return self.end_angle;
        }
        self.start_angle + (self.end_angle - self.start_angle) * self.progress(elapsed_ms)
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}
