//! In-memory record store.
//!
//! Holds every collection in insertion order and is the only place records
//! are created or changed. Identifiers come from a per-collection monotonic
//! counter seeded above the largest fixture id, so two creates in the same
//! instant still get distinct ids.
//!
//! Observers are notified synchronously, in registration order, before a
//! mutating call returns.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::fixtures::Fixtures;
use crate::models::{
    AlertStatus, Appointment, AppointmentStatus, EmergencyAlert, InventoryItem, NewPatient,
    Patient, PatientUpdate, RecordId, Role, StaffMember,
};
use crate::validation::{ValidAlert, ValidAppointment};

/// Display name for a foreign key that resolves to nothing.
pub const UNKNOWN_NAME: &str = "Unknown";

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: RecordId },
    #[error("Unknown {field}: {id}")]
    Referential { field: &'static str, id: RecordId },
    #[error("Cannot move appointment from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    #[error("Restock quantity must be positive, got {0}")]
    InvalidQuantity(u32),
}

// ═══════════════════════════════════════════════════════════
// Events and observers
// ═══════════════════════════════════════════════════════════

/// A committed change, as seen by observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum StoreEvent {
    PatientCreated { patient: Patient },
    PatientUpdated { patient: Patient },
    AppointmentCreated { appointment: Appointment },
    AppointmentStatusChanged {
        id: RecordId,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    AlertRaised { alert: EmergencyAlert },
    InventoryRestocked { id: RecordId, quantity: u32 },
}

/// Receives every committed change.
///
/// Called while the store is locked for writing: implementations must not
/// call back into the state that owns the store.
pub trait StoreObserver: Send + Sync {
    fn on_event(&self, event: &StoreEvent);
}

// ═══════════════════════════════════════════════════════════
// Identifier sequence
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Start after the largest existing id (or at 1 for an empty collection).
    fn after<'a>(ids: impl Iterator<Item = &'a RecordId>) -> Self {
        let max = ids.map(|id| id.0).max().unwrap_or(0);
        Self { next: max + 1 }
    }

    fn next_id(&mut self) -> RecordId {
        let id = RecordId(self.next);
        self.next += 1;
        id
    }
}

// ═══════════════════════════════════════════════════════════
// Appointment lifecycle
// ═══════════════════════════════════════════════════════════

/// Allowed appointment status moves:
/// scheduled → in-progress → completed, and scheduled → cancelled.
pub fn is_valid_transition(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    use AppointmentStatus::*;
    matches!(
        (from, to),
        (Scheduled, InProgress) | (InProgress, Completed) | (Scheduled, Cancelled)
    )
}

// ═══════════════════════════════════════════════════════════
// RecordStore
// ═══════════════════════════════════════════════════════════

pub struct RecordStore {
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
    staff: Vec<StaffMember>,
    inventory: Vec<InventoryItem>,
    alerts: Vec<EmergencyAlert>,
    patient_ids: IdSequence,
    appointment_ids: IdSequence,
    alert_ids: IdSequence,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl RecordStore {
    /// An empty store. Mostly useful in tests.
    pub fn new() -> Self {
        Self::seeded(Fixtures::default())
    }

    /// A store pre-filled with seed records.
    pub fn seeded(fixtures: Fixtures) -> Self {
        let Fixtures {
            patients,
            appointments,
            staff,
            inventory,
        } = fixtures;
        Self {
            patient_ids: IdSequence::after(patients.iter().map(|p| &p.id)),
            appointment_ids: IdSequence::after(appointments.iter().map(|a| &a.id)),
            alert_ids: IdSequence::after(std::iter::empty()),
            patients,
            appointments,
            staff,
            inventory,
            alerts: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    fn notify(&self, event: StoreEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    // ── Read access ──────────────────────────────────────

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn alerts(&self) -> &[EmergencyAlert] {
        &self.alerts
    }

    pub fn patient(&self, id: RecordId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn appointment(&self, id: RecordId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn staff_member(&self, id: RecordId) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.id == id)
    }

    /// A staff member whose role is doctor.
    pub fn doctor(&self, id: RecordId) -> Option<&StaffMember> {
        self.staff_member(id).filter(|s| s.role == Role::Doctor)
    }

    pub fn doctors(&self) -> impl Iterator<Item = &StaffMember> {
        self.staff.iter().filter(|s| s.role == Role::Doctor)
    }

    pub fn item(&self, id: RecordId) -> Option<&InventoryItem> {
        self.inventory.iter().find(|i| i.id == id)
    }

    /// Patient name, or [`UNKNOWN_NAME`] for a dangling id.
    pub fn patient_name(&self, id: RecordId) -> &str {
        self.patient(id).map_or(UNKNOWN_NAME, |p| p.name.as_str())
    }

    /// Doctor name, or [`UNKNOWN_NAME`] for a dangling or non-doctor id.
    pub fn doctor_name(&self, id: RecordId) -> &str {
        self.doctor(id).map_or(UNKNOWN_NAME, |s| s.name.as_str())
    }

    // ── Mutations ────────────────────────────────────────

    /// Append a new patient. The form must already be validated.
    pub fn create_patient(&mut self, form: NewPatient) -> Patient {
        let patient = form.into_patient(self.patient_ids.next_id());
        self.patients.push(patient.clone());
        tracing::info!(id = %patient.id, "Patient created");
        self.notify(StoreEvent::PatientCreated {
            patient: patient.clone(),
        });
        patient
    }

    /// Append a new appointment in `Scheduled` status.
    ///
    /// Rejects dangling patient or doctor ids; nothing is appended then.
    pub fn create_appointment(
        &mut self,
        valid: ValidAppointment,
    ) -> Result<Appointment, StoreError> {
        if self.patient(valid.patient_id).is_none() {
            return Err(StoreError::Referential {
                field: "patientId",
                id: valid.patient_id,
            });
        }
        if self.doctor(valid.doctor_id).is_none() {
            return Err(StoreError::Referential {
                field: "doctorId",
                id: valid.doctor_id,
            });
        }

        let appointment = Appointment {
            id: self.appointment_ids.next_id(),
            patient_id: valid.patient_id,
            doctor_id: valid.doctor_id,
            date: valid.date,
            time: valid.time,
            appointment_type: valid.appointment_type,
            status: AppointmentStatus::Scheduled,
            duration: valid.duration,
            notes: valid.notes,
        };
        self.appointments.push(appointment.clone());
        tracing::info!(id = %appointment.id, date = %appointment.date, "Appointment scheduled");
        self.notify(StoreEvent::AppointmentCreated {
            appointment: appointment.clone(),
        });
        Ok(appointment)
    }

    /// Append a new active alert raised by `raised_by` at `timestamp`.
    pub fn create_alert(
        &mut self,
        valid: ValidAlert,
        raised_by: RecordId,
        timestamp: DateTime<Utc>,
    ) -> Result<EmergencyAlert, StoreError> {
        if let Some(patient_id) = valid.patient_id {
            if self.patient(patient_id).is_none() {
                return Err(StoreError::Referential {
                    field: "patientId",
                    id: patient_id,
                });
            }
        }

        let alert = EmergencyAlert {
            id: self.alert_ids.next_id(),
            alert_type: valid.alert_type,
            severity: valid.severity,
            location: valid.location,
            description: valid.description,
            patient_id: valid.patient_id,
            contact_person: valid.contact_person,
            contact_phone: valid.contact_phone,
            timestamp,
            status: AlertStatus::Active,
            raised_by,
        };
        self.alerts.push(alert.clone());
        tracing::info!(id = %alert.id, severity = %alert.severity, "Emergency alert raised");
        self.notify(StoreEvent::AlertRaised {
            alert: alert.clone(),
        });
        Ok(alert)
    }

    pub fn update_patient(
        &mut self,
        id: RecordId,
        update: PatientUpdate,
    ) -> Result<Patient, StoreError> {
        let patient = self
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound { kind: "Patient", id })?;
        update.apply(patient);
        let patient = patient.clone();
        tracing::info!(id = %id, "Patient updated");
        self.notify(StoreEvent::PatientUpdated {
            patient: patient.clone(),
        });
        Ok(patient)
    }

    pub fn transition_appointment(
        &mut self,
        id: RecordId,
        to: AppointmentStatus,
    ) -> Result<Appointment, StoreError> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound {
                kind: "Appointment",
                id,
            })?;
        let from = appointment.status;
        if !is_valid_transition(from, to) {
            return Err(StoreError::InvalidTransition { from, to });
        }
        appointment.status = to;
        let appointment = appointment.clone();
        tracing::info!(id = %id, %from, %to, "Appointment status changed");
        self.notify(StoreEvent::AppointmentStatusChanged { id, from, to });
        Ok(appointment)
    }

    /// Add `quantity` units to an item. Saturates rather than overflowing.
    pub fn restock(&mut self, id: RecordId, quantity: u32) -> Result<InventoryItem, StoreError> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity(quantity));
        }
        let item = self
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::NotFound {
                kind: "InventoryItem",
                id,
            })?;
        item.quantity = item.quantity.saturating_add(quantity);
        let item = item.clone();
        tracing::info!(id = %id, quantity, total = item.quantity, "Inventory restocked");
        self.notify(StoreEvent::InventoryRestocked { id, quantity });
        Ok(item)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::{AlertSeverity, AlertType, AppointmentType, PatientStatus};
    use chrono::{NaiveDate, NaiveTime};
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn store() -> RecordStore {
        RecordStore::seeded(fixtures::seed(today()))
    }

    fn valid_appointment(patient: u64, doctor: u64) -> ValidAppointment {
        ValidAppointment {
            patient_id: RecordId(patient),
            doctor_id: RecordId(doctor),
            date: today(),
            time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            appointment_type: AppointmentType::Consultation,
            duration: 30,
            notes: None,
        }
    }

    fn valid_alert(patient_id: Option<RecordId>) -> ValidAlert {
        ValidAlert {
            alert_type: AlertType::Medical,
            severity: AlertSeverity::Critical,
            location: "ICU - Room 101".into(),
            description: "Patient unresponsive".into(),
            patient_id,
            contact_person: "Emily Rodriguez".into(),
            contact_phone: "+1 (555) 345-6789".into(),
        }
    }

    /// Collects event names in arrival order.
    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl StoreObserver for Recorder {
        fn on_event(&self, event: &StoreEvent) {
            let name = match event {
                StoreEvent::PatientCreated { .. } => "patient_created",
                StoreEvent::PatientUpdated { .. } => "patient_updated",
                StoreEvent::AppointmentCreated { .. } => "appointment_created",
                StoreEvent::AppointmentStatusChanged { .. } => "appointment_status",
                StoreEvent::AlertRaised { .. } => "alert_raised",
                StoreEvent::InventoryRestocked { .. } => "restocked",
            };
            self.log.lock().unwrap().push(format!("{}:{name}", self.label));
        }
    }

    // ── Creation and identifiers ─────────────────────────

    #[test]
    fn create_patient_appends_with_fresh_id() {
        let mut store = store();
        let before: Vec<Patient> = store.patients().to_vec();

        let patient = store.create_patient(fixtures::sample_new_patient("Ann", today()));

        assert!(before.iter().all(|p| p.id != patient.id));
        assert_eq!(&store.patients()[..before.len()], &before[..]);
        assert_eq!(store.patients().last(), Some(&patient));
        assert_eq!(patient.name, "Ann");
    }

    #[test]
    fn ids_unique_under_back_to_back_creation() {
        let mut store = store();
        let ids: HashSet<RecordId> = (0..50)
            .map(|i| {
                store
                    .create_patient(fixtures::sample_new_patient(&format!("P{i}"), today()))
                    .id
            })
            .collect();
        assert_eq!(ids.len(), 50);
        let all: HashSet<RecordId> = store.patients().iter().map(|p| p.id).collect();
        assert_eq!(all.len(), store.patients().len());
    }

    #[test]
    fn empty_store_starts_at_one() {
        let mut store = RecordStore::new();
        let patient = store.create_patient(fixtures::sample_new_patient("First", today()));
        assert_eq!(patient.id, RecordId(1));
    }

    #[test]
    fn appointment_starts_scheduled() {
        let mut store = store();
        let appt = store.create_appointment(valid_appointment(1, 2)).unwrap();
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert_eq!(store.appointments().last(), Some(&appt));
    }

    #[test]
    fn dangling_patient_rejected_and_nothing_appended() {
        let mut store = store();
        let count = store.appointments().len();
        let err = store.create_appointment(valid_appointment(999, 2)).unwrap_err();
        assert_eq!(
            err,
            StoreError::Referential {
                field: "patientId",
                id: RecordId(999)
            }
        );
        assert_eq!(store.appointments().len(), count);
    }

    #[test]
    fn non_doctor_rejected_as_doctor() {
        let mut store = store();
        // Staff id 3 is a nurse.
        let err = store.create_appointment(valid_appointment(1, 3)).unwrap_err();
        assert!(matches!(err, StoreError::Referential { field: "doctorId", .. }));
    }

    #[test]
    fn alert_is_active_and_records_author() {
        let mut store = store();
        let alert = store
            .create_alert(valid_alert(Some(RecordId(3))), RecordId(3), Utc::now())
            .unwrap();
        assert_eq!(alert.status, AlertStatus::Active);
        assert_eq!(alert.raised_by, RecordId(3));
        assert_eq!(alert.id, RecordId(1));
        assert!(store
            .create_alert(valid_alert(Some(RecordId(404))), RecordId(3), Utc::now())
            .is_err());
        assert_eq!(store.alerts().len(), 1);
    }

    // ── Name resolution ──────────────────────────────────

    #[test]
    fn names_resolve_or_fall_back_to_unknown() {
        let store = store();
        assert_eq!(store.patient_name(RecordId(1)), "John Doe");
        assert_eq!(store.doctor_name(RecordId(2)), "Dr. Michael Chen");
        assert_eq!(store.patient_name(RecordId(77)), UNKNOWN_NAME);
        assert_eq!(store.doctor_name(RecordId(3)), UNKNOWN_NAME, "nurse is not a doctor");
    }

    // ── Updates ──────────────────────────────────────────

    #[test]
    fn update_patient_changes_only_given_fields() {
        let mut store = store();
        let before = store.patient(RecordId(1)).unwrap().clone();
        let updated = store
            .update_patient(
                RecordId(1),
                PatientUpdate {
                    status: Some(PatientStatus::Discharged),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, PatientStatus::Discharged);
        assert_eq!(updated.medical_history, before.medical_history);
        assert!(store.update_patient(RecordId(404), PatientUpdate::default()).is_err());
    }

    #[test]
    fn appointment_lifecycle() {
        let mut store = store();
        let appt = store.create_appointment(valid_appointment(1, 2)).unwrap();

        let err = store
            .transition_appointment(appt.id, AppointmentStatus::Completed)
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidTransition {
                from: AppointmentStatus::Scheduled,
                to: AppointmentStatus::Completed,
            }
        );

        store
            .transition_appointment(appt.id, AppointmentStatus::InProgress)
            .unwrap();
        let done = store
            .transition_appointment(appt.id, AppointmentStatus::Completed)
            .unwrap();
        assert_eq!(done.status, AppointmentStatus::Completed);
        assert!(store
            .transition_appointment(appt.id, AppointmentStatus::Cancelled)
            .is_err());
    }

    #[test]
    fn transition_table() {
        use AppointmentStatus::*;
        let all = [Scheduled, InProgress, Completed, Cancelled];
        let allowed: Vec<_> = all
            .iter()
            .flat_map(|f| all.iter().map(move |t| (*f, *t)))
            .filter(|(f, t)| is_valid_transition(*f, *t))
            .collect();
        assert_eq!(
            allowed,
            vec![(Scheduled, InProgress), (Scheduled, Cancelled), (InProgress, Completed)]
        );
    }

    #[test]
    fn restock_adds_quantity() {
        let mut store = store();
        let item = store.item(RecordId(4)).unwrap().clone();
        let restocked = store.restock(RecordId(4), 30).unwrap();
        assert_eq!(restocked.quantity, item.quantity + 30);
        assert_eq!(store.restock(RecordId(4), 0), Err(StoreError::InvalidQuantity(0)));
        assert!(matches!(
            store.restock(RecordId(999), 1),
            Err(StoreError::NotFound { kind: "InventoryItem", .. })
        ));
    }

    // ── Observers ────────────────────────────────────────

    #[test]
    fn observers_notified_in_order_before_return() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut store = store();
        store.subscribe(Box::new(Recorder {
            label: "a",
            log: Arc::clone(&log),
        }));
        store.subscribe(Box::new(Recorder {
            label: "b",
            log: Arc::clone(&log),
        }));

        store.create_patient(fixtures::sample_new_patient("Ann", today()));
        assert_eq!(
            *log.lock().unwrap(),
            vec!["a:patient_created", "b:patient_created"]
        );

        store.restock(RecordId(1), 5).unwrap();
        assert_eq!(log.lock().unwrap().len(), 4);
    }

    #[test]
    fn failed_mutation_notifies_nobody() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut store = store();
        store.subscribe(Box::new(Recorder {
            label: "a",
            log: Arc::clone(&log),
        }));
        let _ = store.create_appointment(valid_appointment(999, 2));
        let _ = store.restock(RecordId(1), 0);
        assert!(log.lock().unwrap().is_empty());
    }
}
