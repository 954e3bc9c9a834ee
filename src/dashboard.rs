//! Dashboard: per-role metrics, quick actions and summary counts.
//!
//! Everything here is derived from the store on demand for a given day;
//! nothing is cached. Pure functions over `&RecordStore` so the commands
//! layer only has to take the read lock and pass it in.

use chrono::NaiveDate;
use serde::Serialize;

use crate::authorization::{can, Capability};
use crate::config::APP_NAME;
use crate::models::{
    AlertStatus, AppointmentStatus, EmergencyAlert, InventoryStatus, PatientStatus, Role,
    StaffStatus, User,
};
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub label: &'static str,
    pub value: usize,
}

/// Shortcut buttons on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickAction {
    AddPatient,
    ScheduleAppointment,
    EmergencyAlert,
    ViewInventory,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        Self::AddPatient,
        Self::ScheduleAppointment,
        Self::EmergencyAlert,
        Self::ViewInventory,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AddPatient => "Add Patient",
            Self::ScheduleAppointment => "Schedule Appointment",
            Self::EmergencyAlert => "Emergency Alert",
            Self::ViewInventory => "View Inventory",
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            Self::AddPatient => Capability::CreatePatient,
            Self::ScheduleAppointment => Capability::ScheduleAppointment,
            Self::EmergencyAlert => Capability::RaiseEmergencyAlert,
            Self::ViewInventory => Capability::ViewInventory,
        }
    }
}

/// Appointment counts per status for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCounts {
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl AppointmentCounts {
    pub fn total(&self) -> usize {
        self.scheduled + self.in_progress + self.completed + self.cancelled
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCounts {
    pub total: usize,
    pub active: usize,
    pub on_leave: usize,
    pub doctors: usize,
}

/// Stock summary for the inventory tab, by derived status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCounts {
    pub total: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub expired: usize,
    /// Sum of `price * quantity` over every item.
    pub total_value: f64,
}

/// Everything the dashboard tab renders for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub greeting: String,
    pub subtitle: String,
    pub metrics: Vec<Metric>,
    pub quick_actions: Vec<QuickAction>,
    pub active_alerts: Vec<EmergencyAlert>,
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

pub fn dashboard_for(user: &User, store: &RecordStore, today: NaiveDate) -> DashboardData {
    DashboardData {
        greeting: format!("Welcome back, {}", user.name),
        subtitle: format!("Here's what's happening at {APP_NAME} Hospital today."),
        metrics: metrics_for(user, store, today),
        quick_actions: quick_actions_for(user.role),
        active_alerts: store
            .alerts()
            .iter()
            .filter(|a| a.status == AlertStatus::Active)
            .cloned()
            .collect(),
    }
}

/// Metric tiles in display order: the shared three, then role extras.
pub fn metrics_for(user: &User, store: &RecordStore, today: NaiveDate) -> Vec<Metric> {
    let todays = store.appointments().iter().filter(|a| a.date == today);

    let mut metrics = vec![
        Metric {
            label: "Total Patients",
            value: store.patients().len(),
        },
        Metric {
            label: "Today's Appointments",
            value: todays.clone().count(),
        },
        Metric {
            label: "Critical Patients",
            value: store
                .patients()
                .iter()
                .filter(|p| p.status == PatientStatus::Critical)
                .count(),
        },
    ];

    match user.role {
        Role::Admin => {
            metrics.push(Metric {
                label: "Staff on Duty",
                value: staff_counts(store).active,
            });
            metrics.push(Metric {
                label: "Low Stock Items",
                value: store
                    .inventory()
                    .iter()
                    .filter(|i| i.needs_restock(today))
                    .count(),
            });
            metrics.push(Metric {
                label: "Active Alerts",
                value: store
                    .alerts()
                    .iter()
                    .filter(|a| a.status == AlertStatus::Active)
                    .count(),
            });
        }
        Role::Doctor => metrics.push(Metric {
            label: "My Appointments Today",
            value: todays.filter(|a| a.doctor_id == user.id).count(),
        }),
        Role::Nurse | Role::Receptionist => {}
    }

    metrics
}

/// Quick actions `role` may use. Unauthorised ones are left out entirely.
pub fn quick_actions_for(role: Role) -> Vec<QuickAction> {
    QuickAction::ALL
        .into_iter()
        .filter(|action| can(role, action.capability()))
        .collect()
}

pub fn appointment_counts(store: &RecordStore, date: NaiveDate) -> AppointmentCounts {
    store
        .appointments()
        .iter()
        .filter(|a| a.date == date)
        .fold(AppointmentCounts::default(), |mut counts, a| {
            match a.status {
                AppointmentStatus::Scheduled => counts.scheduled += 1,
                AppointmentStatus::InProgress => counts.in_progress += 1,
                AppointmentStatus::Completed => counts.completed += 1,
                AppointmentStatus::Cancelled => counts.cancelled += 1,
            }
            counts
        })
}

pub fn staff_counts(store: &RecordStore) -> StaffCounts {
    let staff = store.staff();
    StaffCounts {
        total: staff.len(),
        active: staff.iter().filter(|s| s.status == StaffStatus::Active).count(),
        on_leave: staff.iter().filter(|s| s.status == StaffStatus::OnLeave).count(),
        doctors: store.doctors().count(),
    }
}

pub fn inventory_counts(store: &RecordStore, today: NaiveDate) -> InventoryCounts {
    store
        .inventory()
        .iter()
        .fold(InventoryCounts::default(), |mut counts, item| {
            counts.total += 1;
            counts.total_value += item.total_value();
            match item.status(today) {
                InventoryStatus::LowStock => counts.low_stock += 1,
                InventoryStatus::OutOfStock => counts.out_of_stock += 1,
                InventoryStatus::Expired => counts.expired += 1,
                InventoryStatus::InStock => {}
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, demo_user};
    use crate::models::RecordId;
    use crate::validation::ValidAlert;
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn store() -> RecordStore {
        RecordStore::seeded(fixtures::seed(today()))
    }

    fn labels(metrics: &[Metric]) -> Vec<&'static str> {
        metrics.iter().map(|m| m.label).collect()
    }

    fn value(metrics: &[Metric], label: &str) -> usize {
        metrics.iter().find(|m| m.label == label).map(|m| m.value).unwrap()
    }

    #[test]
    fn nurse_sees_shared_metrics_only() {
        let metrics = metrics_for(&demo_user(Role::Nurse), &store(), today());
        assert_eq!(
            labels(&metrics),
            vec!["Total Patients", "Today's Appointments", "Critical Patients"]
        );
        assert_eq!(value(&metrics, "Total Patients"), 3);
        assert_eq!(value(&metrics, "Today's Appointments"), 4);
        assert_eq!(value(&metrics, "Critical Patients"), 1);
    }

    #[test]
    fn admin_gets_operational_metrics() {
        let metrics = metrics_for(&demo_user(Role::Admin), &store(), today());
        assert_eq!(metrics.len(), 6);
        // Lisa Park is on leave.
        assert_eq!(value(&metrics, "Staff on Duty"), 5);
        // Insulin (low) and amoxicillin (out). Expired ibuprofen is not a restock case.
        assert_eq!(value(&metrics, "Low Stock Items"), 2);
        assert_eq!(value(&metrics, "Active Alerts"), 0);
    }

    #[test]
    fn doctor_sees_own_appointments() {
        let metrics = metrics_for(&demo_user(Role::Doctor), &store(), today());
        assert_eq!(value(&metrics, "My Appointments Today"), 4);
        let tomorrow = today().succ_opt().unwrap();
        let metrics = metrics_for(&demo_user(Role::Doctor), &store(), tomorrow);
        assert_eq!(value(&metrics, "My Appointments Today"), 0);
    }

    #[test]
    fn quick_actions_follow_policy() {
        assert_eq!(quick_actions_for(Role::Admin), QuickAction::ALL.to_vec());
        assert_eq!(
            quick_actions_for(Role::Doctor),
            vec![QuickAction::ScheduleAppointment, QuickAction::EmergencyAlert]
        );
        assert_eq!(
            quick_actions_for(Role::Nurse),
            vec![QuickAction::EmergencyAlert, QuickAction::ViewInventory]
        );
        assert_eq!(
            quick_actions_for(Role::Receptionist),
            vec![
                QuickAction::AddPatient,
                QuickAction::ScheduleAppointment,
                QuickAction::EmergencyAlert
            ]
        );
    }

    #[test]
    fn dashboard_lists_active_alerts() {
        let mut store = store();
        store
            .create_alert(
                ValidAlert {
                    alert_type: crate::models::AlertType::Fire,
                    severity: crate::models::AlertSeverity::High,
                    location: "Cafeteria".into(),
                    description: "Smoke".into(),
                    patient_id: None,
                    contact_person: String::new(),
                    contact_phone: String::new(),
                },
                RecordId(3),
                Utc::now(),
            )
            .unwrap();
        let data = dashboard_for(&demo_user(Role::Admin), &store, today());
        assert_eq!(data.greeting, "Welcome back, Dr. Sarah Johnson");
        assert_eq!(data.active_alerts.len(), 1);
        assert_eq!(value(&data.metrics, "Active Alerts"), 1);
    }

    #[test]
    fn appointment_counts_for_day() {
        let counts = appointment_counts(&store(), today());
        assert_eq!(
            counts,
            AppointmentCounts {
                scheduled: 2,
                in_progress: 1,
                completed: 1,
                cancelled: 0
            }
        );
        assert_eq!(counts.total(), 4);
        assert_eq!(appointment_counts(&store(), today().pred_opt().unwrap()).total(), 0);
    }

    #[test]
    fn staff_summary() {
        assert_eq!(
            staff_counts(&store()),
            StaffCounts {
                total: 6,
                active: 5,
                on_leave: 1,
                doctors: 2
            }
        );
    }

    #[test]
    fn inventory_summary_by_derived_status() {
        let counts = inventory_counts(&store(), today());
        assert_eq!(counts.total, 6);
        assert_eq!(counts.low_stock, 1);
        assert_eq!(counts.out_of_stock, 1);
        assert_eq!(counts.expired, 1);
        // 45*25.99 + 8*15000 + 120*12.5 + 0*45 + 15*250 + 5*8.99
        let expected = 1169.55 + 120_000.0 + 1_500.0 + 3_750.0 + 44.95;
        assert!((counts.total_value - expected).abs() < 1e-6);
    }

    #[test]
    fn expiry_moves_items_between_buckets() {
        // Ninety days on, insulin and amoxicillin have expired too.
        let later = today().checked_add_days(chrono::Days::new(90)).unwrap();
        let counts = inventory_counts(&store(), later);
        assert_eq!(counts.expired, 3);
        assert_eq!(counts.low_stock, 0);
        assert_eq!(counts.out_of_stock, 0);
    }

    #[test]
    fn quick_action_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(QuickAction::ScheduleAppointment).unwrap(),
            "schedule-appointment"
        );
    }
}
