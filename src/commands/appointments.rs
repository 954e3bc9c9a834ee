//! Appointment list, scheduling and status changes.

use serde::Serialize;

use super::{CommandError, Confirmation};
use crate::authorization::Capability;
use crate::core_state::CoreState;
use crate::dashboard::{self, AppointmentCounts};
use crate::filter::RecordFilter;
use crate::models::appointment::hhmm;
use crate::models::{
    Appointment, AppointmentFilter, AppointmentStatus, NewAppointment, RecordId, StaffMember, Tab,
};
use crate::store::RecordStore;
use crate::validation::validate_appointment;

/// An appointment with its foreign keys resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub patient_name: String,
    pub doctor_name: String,
}

impl AppointmentView {
    fn resolve(appointment: &Appointment, store: &RecordStore) -> Self {
        Self {
            patient_name: store.patient_name(appointment.patient_id).to_string(),
            doctor_name: store.doctor_name(appointment.doctor_id).to_string(),
            appointment: appointment.clone(),
        }
    }
}

pub fn list_appointments(
    state: &CoreState,
    filter: &AppointmentFilter,
) -> Result<Vec<AppointmentView>, CommandError> {
    state.authorize(Capability::ViewTab(Tab::Appointments))?;
    let store = state.read_store()?;
    let views: Vec<AppointmentView> = filter
        .apply(store.appointments(), &*store)
        .into_iter()
        .map(|a| AppointmentView::resolve(a, &store))
        .collect();
    tracing::debug!(count = views.len(), "Appointments listed");
    Ok(views)
}

/// Status counts for one day, for the appointments tab summary.
pub fn appointment_summary(
    state: &CoreState,
    date: chrono::NaiveDate,
) -> Result<AppointmentCounts, CommandError> {
    state.authorize(Capability::ViewTab(Tab::Appointments))?;
    let store = state.read_store()?;
    Ok(dashboard::appointment_counts(&store, date))
}

/// Doctors offered in the schedule form's picker.
pub fn list_doctors(state: &CoreState) -> Result<Vec<StaffMember>, CommandError> {
    state.authorize(Capability::ScheduleAppointment)?;
    let store = state.read_store()?;
    Ok(store.doctors().cloned().collect())
}

pub fn schedule_appointment(
    state: &CoreState,
    form: NewAppointment,
) -> Result<Confirmation, CommandError> {
    let user = state.authorize(Capability::ScheduleAppointment)?;
    let valid = match validate_appointment(&form, state.today(), &state.config) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "Schedule appointment rejected");
            return Err(e.into());
        }
    };

    let appointment = state.write_store()?.create_appointment(valid).map_err(|e| {
        tracing::warn!(user_id = %user.id, error = %e, "Schedule appointment rejected");
        CommandError::from(e)
    })?;
    Ok(Confirmation {
        id: appointment.id,
        message: format!(
            "Appointment has been successfully scheduled for {} at {}.",
            appointment.date,
            appointment.time.format(hhmm::FORMAT)
        ),
    })
}

fn transition(
    state: &CoreState,
    id: RecordId,
    to: AppointmentStatus,
    capability: Capability,
) -> Result<AppointmentView, CommandError> {
    let user = state.authorize(capability)?;
    let mut store = state.write_store()?;
    let appointment = store.transition_appointment(id, to).map_err(|e| {
        tracing::warn!(user_id = %user.id, appointment_id = %id, error = %e, "Appointment transition rejected");
        CommandError::from(e)
    })?;
    Ok(AppointmentView::resolve(&appointment, &store))
}

/// scheduled → in-progress.
pub fn start_appointment(state: &CoreState, id: RecordId) -> Result<AppointmentView, CommandError> {
    transition(state, id, AppointmentStatus::InProgress, Capability::StartAppointment)
}

/// in-progress → completed.
pub fn complete_appointment(
    state: &CoreState,
    id: RecordId,
) -> Result<AppointmentView, CommandError> {
    transition(state, id, AppointmentStatus::Completed, Capability::StartAppointment)
}

/// scheduled → cancelled. Anyone who may schedule may cancel.
pub fn cancel_appointment(
    state: &CoreState,
    id: RecordId,
) -> Result<AppointmentView, CommandError> {
    transition(state, id, AppointmentStatus::Cancelled, Capability::ScheduleAppointment)
}
