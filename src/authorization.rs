//! Role-based authorization policy.
//!
//! A single table maps `(role, capability)` to allow/deny. Every command
//! consults it before mutating the store or returning restricted data, and
//! the presentation layer consults it before rendering an action control.
//!
//! Default-deny: a capability not listed for a role is refused. Denial is
//! an explicit `PermissionDenied` error at the command boundary, never a
//! silently hidden button.

use serde::{Deserialize, Serialize};

use crate::models::{Role, Tab};

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// A named action or view gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tab", rename_all = "camelCase")]
pub enum Capability {
    ViewTab(Tab),
    CreatePatient,
    ScheduleAppointment,
    RaiseEmergencyAlert,
    ViewInventory,
    ManageStaff,
    EditPatient,
    StartAppointment,
    RestockInventory,
}

impl Capability {
    /// Every capability, tabs included. Used by exhaustive policy tests
    /// and by presentation layers that pre-compute affordances.
    pub fn all() -> Vec<Capability> {
        let mut caps: Vec<Capability> = Tab::ALL.iter().map(|t| Capability::ViewTab(*t)).collect();
        caps.extend([
            Capability::CreatePatient,
            Capability::ScheduleAppointment,
            Capability::RaiseEmergencyAlert,
            Capability::ViewInventory,
            Capability::ManageStaff,
            Capability::EditPatient,
            Capability::StartAppointment,
            Capability::RestockInventory,
        ]);
        caps
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ViewTab(tab) => write!(f, "view_tab:{tab}"),
            Self::CreatePatient => f.write_str("create_patient"),
            Self::ScheduleAppointment => f.write_str("schedule_appointment"),
            Self::RaiseEmergencyAlert => f.write_str("raise_emergency_alert"),
            Self::ViewInventory => f.write_str("view_inventory"),
            Self::ManageStaff => f.write_str("manage_staff"),
            Self::EditPatient => f.write_str("edit_patient"),
            Self::StartAppointment => f.write_str("start_appointment"),
            Self::RestockInventory => f.write_str("restock_inventory"),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    #[error("Permission denied: {role} may not {capability}")]
    PermissionDenied { role: Role, capability: Capability },
}

// ═══════════════════════════════════════════════════════════
// Policy
// ═══════════════════════════════════════════════════════════

/// Whether `role` holds `capability`. Total and side-effect free.
pub fn can(role: Role, capability: Capability) -> bool {
    use Capability::*;
    use Role::*;

    match capability {
        ViewTab(Tab::Dashboard) | ViewTab(Tab::Patients) => true,
        ViewTab(Tab::Appointments) | ScheduleAppointment => {
            matches!(role, Admin | Doctor | Receptionist)
        }
        ViewTab(Tab::Staff) | ManageStaff | RestockInventory => role == Admin,
        ViewTab(Tab::Inventory) | ViewInventory => matches!(role, Admin | Nurse),
        CreatePatient => matches!(role, Admin | Receptionist),
        RaiseEmergencyAlert => true,
        EditPatient | StartAppointment => matches!(role, Admin | Doctor),
    }
}

/// Like [`can`], but a denial becomes an error the caller can propagate.
pub fn require(role: Role, capability: Capability) -> Result<(), AuthorizationError> {
    if can(role, capability) {
        Ok(())
    } else {
        tracing::warn!(%role, %capability, "Capability denied");
        Err(AuthorizationError::PermissionDenied { role, capability })
    }
}

/// Navigation tabs visible to `role`, dashboard first, in fixed tab order.
pub fn navigation_items_for(role: Role) -> Vec<Tab> {
    Tab::ALL
        .iter()
        .copied()
        .filter(|tab| can(role, Capability::ViewTab(*tab)))
        .collect()
}

/// All capabilities `role` holds, in [`Capability::all`] order.
pub fn capabilities_for(role: Role) -> Vec<Capability> {
    Capability::all()
        .into_iter()
        .filter(|cap| can(role, *cap))
        .collect()
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
