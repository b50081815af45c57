use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::WheelConfig;
use crate::constants::{DEFAULT_PRIZE_NAMES, DEFAULT_PRIZE_STOCK, DEFAULT_PRIZE_WEIGHT, MIN_PRIZES};
use crate::error::InventoryError;

/// A prize with stock and a relative weight.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PrizeItem {
    pub id: String,
    pub name: String,
    pub stock: i64,
    pub weight: f64,
}

impl PrizeItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, stock: i64, weight: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stock,
            weight,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Snapshot of what the wheel shows at spin time.
///
/// When weighted items are present the names are derived from them, so a
/// winning index addresses both lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Inventory {
    names: Vec<String>,
    weighted: Vec<PrizeItem>,
}

impl Inventory {
    pub fn simple<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            weighted: Vec::new(),
        }
    }

    pub fn weighted(items: Vec<PrizeItem>) -> Self {
        Self {
            names: items.iter().map(|p| p.name.clone()).collect(),
            weighted: items,
        }
    }

    pub fn from_config(config: &WheelConfig) -> Self {
        match &config.advanced_prizes {
            Some(items) if !items.is_empty() => Self::weighted(items.clone()),
            _ => Self::simple(config.prizes.iter().cloned()),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Weighted items, empty when the wheel has no weighting data.
    pub fn weighted_items(&self) -> &[PrizeItem] {
        &self.weighted
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_spinnable(&self) -> bool {
        self.names.len() >= MIN_PRIZES
    }

    /// Sum of weights over in-stock items.
    pub fn total_weight(&self) -> f64 {
        self.weighted
            .iter()
            .filter(|p| p.in_stock())
            .map(|p| p.weight)
            .sum()
    }
}

/// Editing rules for the weighted prize list.
#[derive(Debug, Clone, PartialEq)]
pub struct PrizeEditor {
    items: Vec<PrizeItem>,
    max_prizes: Option<usize>,
}

impl PrizeEditor {
    pub fn new(items: Vec<PrizeItem>, max_prizes: Option<usize>) -> Self {
        Self { items, max_prizes }
    }

    pub fn for_config(config: &WheelConfig, is_admin: bool) -> Self {
        Self::new(
            config.advanced_prizes.clone().unwrap_or_default(),
            config.max_prizes(is_admin),
        )
    }

    pub fn items(&self) -> &[PrizeItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<PrizeItem> {
        self.items
    }

    pub fn add_prize(&mut self, name: &str) -> Result<&PrizeItem, InventoryError> {
        if let Some(max) = self.max_prizes {
            if self.items.len() >= max {
                return Err(InventoryError::TierLimitReached { max });
            }
        }
        self.items.push(PrizeItem::new(
            Uuid::new_v4().to_string(),
            name.to_uppercase(),
            DEFAULT_PRIZE_STOCK,
            DEFAULT_PRIZE_WEIGHT,
        ));
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn rename(&mut self, index: usize, name: &str) -> Result<(), InventoryError> {
        self.get_mut(index)?.name = name.to_uppercase();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<PrizeItem, InventoryError> {
        if index >= self.items.len() {
            return Err(InventoryError::UnknownPrize(index));
        }
        if self.items.len() <= MIN_PRIZES {
            return Err(InventoryError::MinimumPrizes);
        }
        Ok(self.items.remove(index))
    }

    pub fn set_stock(&mut self, index: usize, stock: i64) -> Result<(), InventoryError> {
        self.get_mut(index)?.stock = stock.max(0);
        Ok(())
    }

    pub fn set_weight(&mut self, index: usize, weight: f64) -> Result<(), InventoryError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(InventoryError::InvalidWeight);
        }
        self.get_mut(index)?.weight = weight;
        Ok(())
    }

    pub fn restore_defaults(&mut self) {
        self.items = DEFAULT_PRIZE_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                PrizeItem::new((i + 1).to_string(), *name, DEFAULT_PRIZE_STOCK, DEFAULT_PRIZE_WEIGHT)
            })
            .collect();
    }

    /// Takes one unit of the named prize after it was awarded.
    ///
    /// Returns `false` when no item carries that name. Stock never drops
    /// below zero and the item is kept.
    pub fn decrement_stock(&mut self, name: &str) -> bool {
        match self.items.iter_mut().find(|p| p.name == name) {
            Some(item) => {
                item.stock = (item.stock - 1).max(0);
                if item.stock == 0 {
                    log::info!("Prize {} is now out of stock", item.name);
                }
                true
            }
            None => false,
        }
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut PrizeItem, InventoryError> {
        self.items
            .get_mut(index)
            .ok_or(InventoryError::UnknownPrize(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> PrizeEditor {
        let mut editor = PrizeEditor::new(Vec::new(), Some(5));
        editor.restore_defaults();
        editor
    }

    #[test]
    fn test_weighted_names_follow_items() {
        let inventory = Inventory::weighted(vec![
            PrizeItem::new("a", "A", 0, 50.0),
            PrizeItem::new("b", "B", 5, 50.0),
        ]);
        assert_eq!(inventory.names(), ["A".to_string(), "B".to_string()]);
        assert_eq!(inventory.total_weight(), 50.0);
        assert!(inventory.is_spinnable());
    }

    #[test]
    fn test_single_name_is_not_spinnable() {
        assert!(!Inventory::simple(["ONLY"]).is_spinnable());
        assert!(!Inventory::default().is_spinnable());
    }

    #[test]
    fn test_restore_defaults() {
        let editor = editor();
        assert_eq!(editor.items().len(), 4);
        assert_eq!(editor.items()[0], PrizeItem::new("1", "PREMIO 1", 10, 100.0));
        assert_eq!(editor.items()[3].id, "4");
    }

    #[test]
    fn test_add_prize_respects_cap() {
        let mut editor = editor();
        let added = editor.add_prize("cafe gratis").unwrap();
        assert_eq!(added.name, "CAFE GRATIS");
        assert_eq!(added.stock, DEFAULT_PRIZE_STOCK);
        assert_eq!(
            editor.add_prize("otro"),
            Err(InventoryError::TierLimitReached { max: 5 })
        );
    }

    #[test]
    fn test_remove_keeps_two() {
        let mut editor = editor();
        editor.remove(0).unwrap();
        editor.remove(0).unwrap();
        assert_eq!(editor.remove(0), Err(InventoryError::MinimumPrizes));
        assert_eq!(editor.remove(9), Err(InventoryError::UnknownPrize(9)));
        assert_eq!(editor.items().len(), 2);
    }

    #[test]
    fn test_edit_fields() {
        let mut editor = editor();
        editor.rename(1, "taza").unwrap();
        editor.set_stock(1, -4).unwrap();
        assert_eq!(editor.set_weight(1, f64::NAN), Err(InventoryError::InvalidWeight));
        editor.set_weight(1, 7.5).unwrap();
        assert_eq!(editor.items()[1], PrizeItem::new("2", "TAZA", 0, 7.5));
    }

    #[test]
    fn test_decrement_stock_saturates() {
        let mut editor = editor();
        editor.set_stock(0, 1).unwrap();
        assert!(editor.decrement_stock("PREMIO 1"));
        assert!(editor.decrement_stock("PREMIO 1"));
        assert_eq!(editor.items()[0].stock, 0);
        assert_eq!(editor.items().len(), 4);
        assert!(!editor.decrement_stock("NADA"));
    }
}
