use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{InventoryCategory, InventoryStatus};
use super::RecordId;

/// A stocked item. Status is never stored; see [`InventoryItem::status`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: RecordId,
    pub name: String,
    pub category: InventoryCategory,
    pub quantity: u32,
    pub min_quantity: u32,
    pub price: f64,
    pub supplier: String,
    pub expiry_date: Option<NaiveDate>,
    pub location: String,
}

impl InventoryItem {
    /// Derive the stock status as of `today`.
    ///
    /// Expiry wins over stock level: an expired batch is unusable whatever
    /// its quantity. An expiry date equal to `today` is still usable.
    pub fn status(&self, today: NaiveDate) -> InventoryStatus {
        if self.expiry_date.is_some_and(|expiry| expiry < today) {
            InventoryStatus::Expired
        } else if self.quantity == 0 {
            InventoryStatus::OutOfStock
        } else if self.quantity < self.min_quantity {
            InventoryStatus::LowStock
        } else {
            InventoryStatus::InStock
        }
    }

    /// `quantity * price`.
    pub fn total_value(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }

    /// Low or out of stock, i.e. needs reordering.
    pub fn needs_restock(&self, today: NaiveDate) -> bool {
        matches!(
            self.status(today),
            InventoryStatus::LowStock | InventoryStatus::OutOfStock
        )
    }
}
