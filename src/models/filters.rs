use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{AppointmentStatus, InventoryCategory, InventoryStatus, PatientStatus, Role};

// `None` on any categorical field is the "all" wildcard. On the wire the
// wildcard arrives as `"all"`, blank, `null` or a missing key.

mod wildcard {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer};

    use crate::filter::parse_filter;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse_filter(&raw).map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "wildcard::deserialize")]
    pub status: Option<PatientStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "wildcard::deserialize")]
    pub status: Option<AppointmentStatus>,
    /// Exact calendar day. The appointments view always sends one.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "wildcard::deserialize")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "wildcard::deserialize")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "wildcard::deserialize")]
    pub category: Option<InventoryCategory>,
    #[serde(default, deserialize_with = "wildcard::deserialize")]
    pub status: Option<InventoryStatus>,
}
