use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::enums::{AppointmentStatus, AppointmentType};
use super::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    /// Minutes.
    pub duration: u32,
    pub notes: Option<String>,
}

/// Schedule-appointment form payload, as typed by the user.
///
/// Fields stay loose (strings, options) so validation can report every
/// missing or malformed field at once instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: String,
    #[serde(rename = "type")]
    pub appointment_type: Option<AppointmentType>,
    pub duration: Option<u32>,
    #[serde(default)]
    pub notes: String,
}

pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_serializes_original_field_names() {
        let appt = Appointment {
            id: RecordId(1),
            patient_id: RecordId(3),
            doctor_id: RecordId(2),
            date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            appointment_type: AppointmentType::FollowUp,
            status: AppointmentStatus::InProgress,
            duration: 45,
            notes: None,
        };
        let json = serde_json::to_value(&appt).unwrap();
        assert_eq!(json["patientId"], "3");
        assert_eq!(json["time"], "09:30");
        assert_eq!(json["type"], "follow-up");
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["date"], "2026-10-17");
    }
}
