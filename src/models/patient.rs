use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{Gender, PatientStatus};
use super::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: RecordId,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub blood_type: String,
    pub allergies: Vec<String>,
    pub medical_history: String,
    pub emergency_contact: EmergencyContact,
    pub last_visit: NaiveDate,
    pub status: PatientStatus,
}

/// Add-patient form payload. Everything but the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub blood_type: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_history: String,
    pub emergency_contact: EmergencyContact,
    pub last_visit: NaiveDate,
    pub status: PatientStatus,
}

impl NewPatient {
    pub(crate) fn into_patient(self, id: RecordId) -> Patient {
        Patient {
            id,
            name: self.name.trim().to_string(),
            age: self.age,
            gender: self.gender,
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address,
            blood_type: self.blood_type,
            allergies: self.allergies,
            medical_history: self.medical_history,
            emergency_contact: self.emergency_contact,
            last_visit: self.last_visit,
            status: self.status,
        }
    }
}

/// Clinical fields a doctor or admin may change. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientUpdate {
    pub status: Option<PatientStatus>,
    pub medical_history: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub last_visit: Option<NaiveDate>,
}

impl PatientUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.medical_history.is_none()
            && self.allergies.is_none()
            && self.last_visit.is_none()
    }

    pub(crate) fn apply(self, patient: &mut Patient) {
        if let Some(status) = self.status {
            patient.status = status;
        }
        if let Some(history) = self.medical_history {
            patient.medical_history = history;
        }
        if let Some(allergies) = self.allergies {
            patient.allergies = allergies;
        }
        if let Some(last_visit) = self.last_visit {
            patient.last_visit = last_visit;
        }
    }
}
