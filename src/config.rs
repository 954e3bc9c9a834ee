use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "MedCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the login pause, in milliseconds.
pub const LOGIN_DELAY_ENV: &str = "MEDCARE_LOGIN_DELAY_MS";

const DEFAULT_LOGIN_DELAY_MS: u64 = 1_000;
const DEFAULT_MIN_APPOINTMENT_MINUTES: u32 = 15;
const DEFAULT_MAX_PATIENT_AGE: u32 = 150;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "medcare_lib=info,warn"
}

/// Runtime knobs for the administration core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Presentational pause before a login completes. Not a security control.
    pub login_delay: Duration,
    /// Shortest appointment the scheduler accepts.
    pub min_appointment_minutes: u32,
    /// Upper bound for a patient's age on the add-patient form.
    pub max_patient_age: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            min_appointment_minutes: DEFAULT_MIN_APPOINTMENT_MINUTES,
            max_patient_age: DEFAULT_MAX_PATIENT_AGE,
        }
    }
}

impl AppConfig {
    /// Defaults, overridden by environment variables where present.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(LOGIN_DELAY_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.login_delay = Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %raw, "Ignoring malformed {LOGIN_DELAY_ENV}");
                }
            }
        }
        config
    }

    /// No login pause. Used by tests and headless callers.
    pub fn immediate() -> Self {
        Self {
            login_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
