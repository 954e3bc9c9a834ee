//! Patient list, add-patient and clinical edits.

use super::{CommandError, Confirmation};
use crate::authorization::Capability;
use crate::core_state::CoreState;
use crate::filter::RecordFilter;
use crate::models::{NewPatient, Patient, PatientFilter, PatientUpdate, RecordId, Tab};
use crate::validation::{validate_patient, validate_patient_update};

/// Patients matching `filter`, in insertion order.
pub fn list_patients(
    state: &CoreState,
    filter: &PatientFilter,
) -> Result<Vec<Patient>, CommandError> {
    state.authorize(Capability::ViewTab(Tab::Patients))?;
    let store = state.read_store()?;
    let hits: Vec<Patient> = filter.apply(store.patients(), ()).into_iter().cloned().collect();
    tracing::debug!(count = hits.len(), "Patients listed");
    Ok(hits)
}

pub fn get_patient(state: &CoreState, id: RecordId) -> Result<Patient, CommandError> {
    state.authorize(Capability::ViewTab(Tab::Patients))?;
    let store = state.read_store()?;
    store
        .patient(id)
        .cloned()
        .ok_or_else(|| crate::store::StoreError::NotFound { kind: "Patient", id }.into())
}

pub fn add_patient(state: &CoreState, form: NewPatient) -> Result<Confirmation, CommandError> {
    let user = state.authorize(Capability::CreatePatient)?;
    if let Err(e) = validate_patient(&form, state.today(), &state.config) {
        tracing::warn!(user_id = %user.id, error = %e, "Add patient rejected");
        return Err(e.into());
    }

    let patient = state.write_store()?.create_patient(form);
    Ok(Confirmation {
        id: patient.id,
        message: format!(
            "Patient {} has been successfully added to the system.",
            patient.name
        ),
    })
}

/// Change status, history, allergies or last visit of an existing patient.
pub fn update_patient(
    state: &CoreState,
    id: RecordId,
    update: PatientUpdate,
) -> Result<Patient, CommandError> {
    let user = state.authorize(Capability::EditPatient)?;
    if let Err(e) = validate_patient_update(&update, state.today()) {
        tracing::warn!(user_id = %user.id, patient_id = %id, error = %e, "Patient update rejected");
        return Err(e.into());
    }

    let patient = state.write_store()?.update_patient(id, update)?;
    Ok(patient)
}
