use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{AlertSeverity, AlertStatus, AlertType};
use super::RecordId;

/// A raised emergency alert. Append-only, never leaves `Active`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub location: String,
    pub description: String,
    pub patient_id: Option<RecordId>,
    pub contact_person: String,
    pub contact_phone: String,
    pub timestamp: DateTime<Utc>,
    pub status: AlertStatus,
    /// Who raised it.
    pub raised_by: RecordId,
}

/// Emergency-alert form payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmergencyAlert {
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub severity: Option<AlertSeverity>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub patient_id: Option<RecordId>,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub contact_phone: String,
}
