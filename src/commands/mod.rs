//! Inbound command surface.
//!
//! Every command takes the shared [`CoreState`], re-checks the signed-in
//! user's capability, validates, mutates through the store and returns a
//! serialisable result. Errors leave as [`CommandError`], which a shell can
//! marshal as `{code, message, fields?}`.

pub mod alerts;
pub mod appointments;
pub mod dashboard;
pub mod inventory;
pub mod patients;
pub mod session;
pub mod staff;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config;
use crate::core_state::CoreError;
use crate::models::RecordId;
use crate::session::SessionError;
use crate::store::StoreError;

/// Name and version, for an about box or a liveness probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

pub fn app_info() -> AppInfo {
    tracing::debug!("App info requested");
    AppInfo {
        name: config::APP_NAME,
        version: config::APP_VERSION,
    }
}

/// Returned by successful create commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub id: RecordId,
    pub message: String,
}

// ═══════════════════════════════════════════════════════════
// Transport error
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotAuthenticated,
    PermissionDenied,
    ValidationFailed,
    ReferentialError,
    InvalidTab,
    InvalidTransition,
    NotFound,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    pub code: ErrorCode,
    pub message: String,
    /// Per-field messages for `VALIDATION_FAILED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl CommandError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            fields: None,
        }
    }
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::LockPoisoned => Self::new(ErrorCode::Internal, message),
            CoreError::Session(SessionError::NotAuthenticated) => {
                Self::new(ErrorCode::NotAuthenticated, message)
            }
            CoreError::Session(SessionError::InvalidTab { .. }) => {
                Self::new(ErrorCode::InvalidTab, message)
            }
            CoreError::Authorization(_) => Self::new(ErrorCode::PermissionDenied, message),
            CoreError::Validation(e) => Self {
                code: ErrorCode::ValidationFailed,
                message,
                fields: Some(e.fields),
            },
            CoreError::Store(StoreError::NotFound { .. }) => {
                Self::new(ErrorCode::NotFound, message)
            }
            CoreError::Store(StoreError::Referential { field, .. }) => Self {
                code: ErrorCode::ReferentialError,
                message: message.clone(),
                fields: Some(BTreeMap::from([(field.to_string(), message)])),
            },
            CoreError::Store(StoreError::InvalidTransition { .. }) => {
                Self::new(ErrorCode::InvalidTransition, message)
            }
            CoreError::Store(StoreError::InvalidQuantity(_)) => Self {
                code: ErrorCode::ValidationFailed,
                message: message.clone(),
                fields: Some(BTreeMap::from([("quantity".to_string(), message)])),
            },
        }
    }
}

macro_rules! impl_from_via_core {
    ($($err:ty),+) => {
        $(impl From<$err> for CommandError {
            fn from(err: $err) -> Self {
                CoreError::from(err).into()
            }
        })+
    };
}

impl_from_via_core!(
    SessionError,
    crate::authorization::AuthorizationError,
    crate::validation::ValidationError,
    StoreError
);
