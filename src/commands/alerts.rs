//! Emergency alerts. Any signed-in role may raise one.

use super::{CommandError, Confirmation};
use crate::authorization::Capability;
use crate::core_state::CoreState;
use crate::models::{EmergencyAlert, NewEmergencyAlert, Tab};
use crate::validation::validate_alert;

pub fn raise_emergency_alert(
    state: &CoreState,
    form: NewEmergencyAlert,
) -> Result<Confirmation, CommandError> {
    let user = state.authorize(Capability::RaiseEmergencyAlert)?;
    let valid = match validate_alert(&form) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "Emergency alert rejected");
            return Err(e.into());
        }
    };

    let alert = state
        .write_store()?
        .create_alert(valid, user.id, state.now())?;
    Ok(Confirmation {
        id: alert.id,
        message: format!(
            "Emergency alert has been sent to all relevant staff members. Alert ID: {}",
            alert.id
        ),
    })
}

/// Raised alerts, oldest first.
pub fn list_alerts(state: &CoreState) -> Result<Vec<EmergencyAlert>, CommandError> {
    state.authorize(Capability::ViewTab(Tab::Dashboard))?;
    let store = state.read_store()?;
    Ok(store.alerts().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ErrorCode;
    use crate::core_state::test_support::{fixed_now, state};
    use crate::fixtures::demo_user;
    use crate::models::{AlertSeverity, AlertStatus, AlertType, RecordId, Role};

    fn form() -> NewEmergencyAlert {
        NewEmergencyAlert {
            alert_type: Some(AlertType::Medical),
            severity: Some(AlertSeverity::Critical),
            location: "ICU - Room 101".into(),
            description: "Patient unresponsive".into(),
            patient_id: Some(RecordId(3)),
            contact_person: "Emily Rodriguez".into(),
            contact_phone: "+1 (555) 345-6789".into(),
        }
    }

    #[test]
    fn every_role_can_raise() {
        for role in [Role::Admin, Role::Doctor, Role::Nurse, Role::Receptionist] {
            let state = state();
            state.write_session().unwrap().login(demo_user(role));
            let confirmation = raise_emergency_alert(&state, form()).unwrap();
            assert_eq!(
                confirmation.message,
                "Emergency alert has been sent to all relevant staff members. Alert ID: 1"
            );
        }
    }

    #[test]
    fn alert_is_stamped_and_listed() {
        let state = state();
        state.write_session().unwrap().login(demo_user(Role::Nurse));
        raise_emergency_alert(&state, form()).unwrap();

        let alerts = list_alerts(&state).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].status, AlertStatus::Active);
        assert_eq!(alerts[0].raised_by, RecordId(3));
        assert_eq!(alerts[0].timestamp, fixed_now());
    }

    #[test]
    fn missing_location_rejected() {
        let state = state();
        state.write_session().unwrap().login(demo_user(Role::Doctor));
        let mut form = form();
        form.location.clear();
        let err = raise_emergency_alert(&state, form).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(list_alerts(&state).unwrap().is_empty());
    }

    #[test]
    fn signed_out_cannot_raise() {
        let err = raise_emergency_alert(&state(), form()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }
}
