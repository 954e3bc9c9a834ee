use serde::{Deserialize, Serialize};

use super::enums::Role;
use super::RecordId;

/// The signed-in staff member. Never mutated while a session is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: Option<String>,
}
