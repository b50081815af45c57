use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SelectionError;
use crate::inventory::Inventory;

/// Result of a spin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub prize_name: String,
    /// Position in the name list of the snapshot the spin was drawn from.
    pub index: usize,
}

/// Picks the winning slot for one spin.
///
/// With weighted items, in-stock items are chosen with probability
/// proportional to their weight and out-of-stock items never win. Without
/// them every name is equally likely.
pub fn select_winner<R: Rng + ?Sized>(
    inventory: &Inventory,
    rng: &mut R,
) -> Result<Outcome, SelectionError> {
    let names = inventory.names();
    if !inventory.is_spinnable() {
        return Err(SelectionError::InsufficientInventory {
            available: names.len(),
        });
    }

    let index = if inventory.weighted_items().is_empty() {
        rng.gen_range(0..names.len())
    } else {
        weighted_index(inventory, rng)?
    };
    log::debug!("Selected {} (index {})", names[index], index);

    Ok(Outcome {
        prize_name: names[index].clone(),
        index,
    })
}

fn weighted_index<R: Rng + ?Sized>(
    inventory: &Inventory,
    rng: &mut R,
) -> Result<usize, SelectionError> {
    let items = inventory.weighted_items();
    let mut total_weight = inventory.total_weight();
    if !(total_weight > 0.0) {
        log::warn!("Spin refused: no prize in stock");
        return Err(SelectionError::NoStockAvailable);
    }

    // Weights near f64::MAX overflow the sum; divide by the largest.
    let mut divisor = 1.0;
    if !total_weight.is_finite() {
        let largest = items
            .iter()
            .filter(|p| p.in_stock())
            .map(|p| p.weight)
            .fold(0.0, f64::max);
        divisor = largest;
        total_weight = items
            .iter()
            .filter(|p| p.in_stock())
            .map(|p| p.weight / divisor)
            .sum();
    }

    let mut remaining = rng.gen::<f64>() * total_weight;
    log::debug!("Weighted draw {:.4} of {:.4}", remaining, total_weight);

    let mut last_candidate = None;
    for (i, item) in items.iter().enumerate() {
        if !item.in_stock() {
            continue;
        }
        let weight = item.weight / divisor;
        if remaining < weight {
            return Ok(i);
        }
        remaining -= weight;
        if weight > 0.0 {
            last_candidate = Some(i);
        }
    }

    // Rounding left a sliver of the draw unconsumed.
    log::warn!("Weighted draw fell through, using last in-stock prize");
    last_candidate.ok_or(SelectionError::NoStockAvailable)
}
