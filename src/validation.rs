//! Form validation for the three create flows and patient edits.
//!
//! Every check runs; the caller gets one message per failing field, keyed
//! by the form's field name, so a shell can render them inline. A form
//! with any error is never committed.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::config::AppConfig;
use crate::models::appointment::hhmm;
use crate::models::{
    AlertSeverity, AlertType, AppointmentType, NewAppointment, NewEmergencyAlert, NewPatient,
    PatientUpdate, RecordId,
};

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

/// Per-field validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Validation failed: {}", summary(.fields))]
pub struct ValidationError {
    pub fields: BTreeMap<String, String>,
}

fn summary(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.insert(field.to_string(), message.into());
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationError> {
        if self.fields.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Validated payloads
// ═══════════════════════════════════════════════════════════

/// A schedule-appointment form that passed field validation.
/// Referential checks happen in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAppointment {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub appointment_type: AppointmentType,
    pub duration: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAlert {
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub location: String,
    pub description: String,
    pub patient_id: Option<RecordId>,
    pub contact_person: String,
    pub contact_phone: String,
}

// ═══════════════════════════════════════════════════════════
// Validators
// ═══════════════════════════════════════════════════════════

pub fn validate_appointment(
    form: &NewAppointment,
    today: NaiveDate,
    config: &AppConfig,
) -> Result<ValidAppointment, ValidationError> {
    let mut errors = ValidationError::default();

    if form.patient_id.is_none() {
        errors.add("patientId", "Patient selection is required");
    }
    if form.doctor_id.is_none() {
        errors.add("doctorId", "Doctor selection is required");
    }
    match form.date {
        None => errors.add("date", "Date is required"),
        Some(date) if date < today => errors.add("date", "Cannot schedule appointments in the past"),
        Some(_) => {}
    }

    let time = form.time.trim();
    let parsed_time = if time.is_empty() {
        errors.add("time", "Time is required");
        None
    } else {
        match NaiveTime::parse_from_str(time, hhmm::FORMAT) {
            Ok(t) => Some(t),
            Err(_) => {
                errors.add("time", "Time must be in HH:MM format");
                None
            }
        }
    };

    match form.duration {
        Some(minutes) if minutes >= config.min_appointment_minutes => {}
        _ => errors.add(
            "duration",
            format!(
                "Duration must be at least {} minutes",
                config.min_appointment_minutes
            ),
        ),
    }

    let notes = form.notes.trim();
    errors.into_result(|| ValidAppointment {
        // All `Option`s are `Some` once no error was recorded.
        patient_id: form.patient_id.unwrap_or(RecordId(0)),
        doctor_id: form.doctor_id.unwrap_or(RecordId(0)),
        date: form.date.unwrap_or(today),
        time: parsed_time.unwrap_or_default(),
        appointment_type: form.appointment_type.unwrap_or(AppointmentType::Consultation),
        duration: form.duration.unwrap_or(config.min_appointment_minutes),
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    })
}

pub fn validate_patient(
    form: &NewPatient,
    today: NaiveDate,
    config: &AppConfig,
) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();

    if form.name.trim().is_empty() {
        errors.add("name", "Name is required");
    }
    if form.phone.trim().is_empty() {
        errors.add("phone", "Phone number is required");
    }
    if form.age > config.max_patient_age {
        errors.add(
            "age",
            format!("Age must be between 0 and {}", config.max_patient_age),
        );
    }
    if form.last_visit > today {
        errors.add("lastVisit", "Last visit cannot be in the future");
    }

    errors.into_result(|| ())
}

pub fn validate_patient_update(
    update: &PatientUpdate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();

    if update.is_empty() {
        errors.add("update", "Nothing to change");
    }
    if update.last_visit.is_some_and(|d| d > today) {
        errors.add("lastVisit", "Last visit cannot be in the future");
    }

    errors.into_result(|| ())
}

pub fn validate_alert(form: &NewEmergencyAlert) -> Result<ValidAlert, ValidationError> {
    let mut errors = ValidationError::default();

    if form.alert_type.is_none() {
        errors.add("type", "Emergency type is required");
    }
    if form.severity.is_none() {
        errors.add("severity", "Severity is required");
    }
    if form.location.trim().is_empty() {
        errors.add("location", "Location is required");
    }
    if form.description.trim().is_empty() {
        errors.add("description", "Description is required");
    }

    errors.into_result(|| ValidAlert {
        alert_type: form.alert_type.unwrap_or(AlertType::Other),
        severity: form.severity.unwrap_or(AlertSeverity::High),
        location: form.location.trim().to_string(),
        description: form.description.trim().to_string(),
        patient_id: form.patient_id,
        contact_person: form.contact_person.trim().to_string(),
        contact_phone: form.contact_phone.trim().to_string(),
    })
}
