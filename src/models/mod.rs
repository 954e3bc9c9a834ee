//! Domain records for the hospital administration core.
//!
//! Pure data shapes. Behaviour lives in `store`, `filter` and
//! `authorization`; the only logic here is inventory status derivation.

pub mod alert;
pub mod appointment;
pub mod enums;
pub mod filters;
pub mod inventory;
pub mod patient;
pub mod staff;
pub mod user;

pub use alert::{EmergencyAlert, NewEmergencyAlert};
pub use appointment::{Appointment, NewAppointment};
pub use enums::*;
pub use filters::{AppointmentFilter, InventoryFilter, PatientFilter, StaffFilter};
pub use inventory::InventoryItem;
pub use patient::{EmergencyContact, NewPatient, Patient, PatientUpdate};
pub use staff::StaffMember;
pub use user::User;

use serde::{Deserialize, Serialize};

/// Identifier of a record within its own collection.
///
/// Serialised as a plain string to keep the original `"1"`, `"2"` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(RecordId).map_err(|_| ParseEnumError {
            field: "RecordId".into(),
            value: s.into(),
        })
    }
}

impl Serialize for RecordId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
