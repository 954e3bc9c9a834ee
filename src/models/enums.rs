use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unknown string for a categorical field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value for {field}: {value}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde goes through the same strings so the wire format matches `as_str`.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(Role {
    Admin => "admin",
    Doctor => "doctor",
    Nurse => "nurse",
    Receptionist => "receptionist",
});

str_enum!(Tab {
    Dashboard => "dashboard",
    Patients => "patients",
    Appointments => "appointments",
    Staff => "staff",
    Inventory => "inventory",
});

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(PatientStatus {
    Active => "active",
    Discharged => "discharged",
    Critical => "critical",
});

str_enum!(AppointmentType {
    Consultation => "consultation",
    FollowUp => "follow-up",
    Surgery => "surgery",
    Emergency => "emergency",
});

str_enum!(AppointmentStatus {
    Scheduled => "scheduled",
    InProgress => "in-progress",
    Completed => "completed",
    Cancelled => "cancelled",
});

str_enum!(Shift {
    Morning => "morning",
    Evening => "evening",
    Night => "night",
});

str_enum!(StaffStatus {
    Active => "active",
    OnLeave => "on-leave",
    OffDuty => "off-duty",
});

str_enum!(InventoryCategory {
    Medicine => "medicine",
    Equipment => "equipment",
    Supplies => "supplies",
});

str_enum!(InventoryStatus {
    InStock => "in-stock",
    LowStock => "low-stock",
    OutOfStock => "out-of-stock",
    Expired => "expired",
});

str_enum!(AlertType {
    Medical => "medical",
    Fire => "fire",
    Security => "security",
    Equipment => "equipment",
    Other => "other",
});

str_enum!(AlertSeverity {
    Critical => "critical",
    High => "high",
    Medium => "medium",
    Low => "low",
});

str_enum!(AlertStatus {
    Active => "active",
});
