//! Inventory list and restocking.

use serde::Serialize;

use super::CommandError;
use crate::authorization::Capability;
use crate::core_state::CoreState;
use crate::dashboard::{self, InventoryCounts};
use crate::filter::RecordFilter;
use crate::models::{InventoryFilter, InventoryItem, InventoryStatus, RecordId};

/// An inventory item with its status derived for the current day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub status: InventoryStatus,
    /// `quantity * price`.
    pub total_value: f64,
}

impl InventoryView {
    fn new(item: &InventoryItem, today: chrono::NaiveDate) -> Self {
        Self {
            status: item.status(today),
            total_value: item.total_value(),
            item: item.clone(),
        }
    }
}

pub fn list_inventory(
    state: &CoreState,
    filter: &InventoryFilter,
) -> Result<Vec<InventoryView>, CommandError> {
    state.authorize(Capability::ViewInventory)?;
    let today = state.today();
    let store = state.read_store()?;
    let views: Vec<InventoryView> = filter
        .apply(store.inventory(), today)
        .into_iter()
        .map(|item| InventoryView::new(item, today))
        .collect();
    tracing::debug!(count = views.len(), "Inventory listed");
    Ok(views)
}

/// Totals for the inventory tab header.
pub fn inventory_summary(state: &CoreState) -> Result<InventoryCounts, CommandError> {
    state.authorize(Capability::ViewInventory)?;
    let today = state.today();
    let store = state.read_store()?;
    Ok(dashboard::inventory_counts(&store, today))
}

/// Add `quantity` units to an item. Admin only.
pub fn restock_item(
    state: &CoreState,
    id: RecordId,
    quantity: u32,
) -> Result<InventoryView, CommandError> {
    let user = state.authorize(Capability::RestockInventory)?;
    let item = state.write_store()?.restock(id, quantity).map_err(|e| {
        tracing::warn!(user_id = %user.id, item_id = %id, error = %e, "Restock rejected");
        CommandError::from(e)
    })?;
    Ok(InventoryView::new(&item, state.today()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ErrorCode;
    use crate::core_state::test_support::state;
    use crate::fixtures::demo_user;
    use crate::models::Role;

    fn signed_in(role: Role) -> CoreState {
        let state = state();
        state.write_session().unwrap().login(demo_user(role));
        state
    }

    #[test]
    fn nurse_lists_with_derived_status() {
        let state = signed_in(Role::Nurse);
        let views = list_inventory(&state, &InventoryFilter::default()).unwrap();
        assert_eq!(views.len(), 6);
        assert_eq!(views[3].status, InventoryStatus::OutOfStock);
        assert_eq!(views[5].status, InventoryStatus::Expired);

        let json = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(json["status"], "low-stock");
        assert_eq!(json["minQuantity"], 50);
    }

    #[test]
    fn doctor_and_receptionist_denied() {
        for role in [Role::Doctor, Role::Receptionist] {
            let state = signed_in(role);
            let err = list_inventory(&state, &InventoryFilter::default()).unwrap_err();
            assert_eq!(err.code, ErrorCode::PermissionDenied);
        }
    }

    #[test]
    fn admin_restocks_out_of_stock_item() {
        let state = signed_in(Role::Admin);
        let view = restock_item(&state, RecordId(4), 40).unwrap();
        assert_eq!(view.item.quantity, 40);
        assert_eq!(view.status, InventoryStatus::InStock);

        let err = restock_item(&state, RecordId(4), 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn summary_tracks_restock() {
        let state = signed_in(Role::Admin);
        let before = inventory_summary(&state).unwrap();
        assert_eq!(before.total, 6);
        assert_eq!(before.out_of_stock, 1);

        restock_item(&state, RecordId(4), 10).unwrap();
        let after = inventory_summary(&state).unwrap();
        assert_eq!(after.out_of_stock, 0);
        assert_eq!(after.low_stock, 2, "10 of 25 amoxicillin is still low");
        assert!((after.total_value - before.total_value - 450.0).abs() < 1e-6);
    }

    #[test]
    fn summary_needs_view_inventory() {
        let state = signed_in(Role::Nurse);
        assert!(inventory_summary(&state).is_ok());
        let state = signed_in(Role::Receptionist);
        assert_eq!(
            inventory_summary(&state).unwrap_err().code,
            ErrorCode::PermissionDenied
        );
    }

    #[test]
    fn nurse_cannot_restock() {
        let state = signed_in(Role::Nurse);
        let err = restock_item(&state, RecordId(1), 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }
}
