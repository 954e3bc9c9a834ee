use serde::{Deserialize, Serialize};

use super::enums::{Role, Shift, StaffStatus};
use super::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: RecordId,
    pub name: String,
    pub role: Role,
    pub department: String,
    pub specialization: Option<String>,
    pub phone: String,
    pub email: String,
    pub shift: Shift,
    pub status: StaffStatus,
}
