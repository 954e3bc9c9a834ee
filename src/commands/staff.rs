//! Staff directory. Read-only, admin only.

use super::CommandError;
use crate::authorization::Capability;
use crate::core_state::CoreState;
use crate::dashboard::{self, StaffCounts};
use crate::filter::RecordFilter;
use crate::models::{StaffFilter, StaffMember, Tab};

pub fn list_staff(
    state: &CoreState,
    filter: &StaffFilter,
) -> Result<Vec<StaffMember>, CommandError> {
    state.authorize(Capability::ViewTab(Tab::Staff))?;
    let store = state.read_store()?;
    let hits: Vec<StaffMember> = filter.apply(store.staff(), ()).into_iter().cloned().collect();
    tracing::debug!(count = hits.len(), "Staff listed");
    Ok(hits)
}

pub fn staff_summary(state: &CoreState) -> Result<StaffCounts, CommandError> {
    state.authorize(Capability::ManageStaff)?;
    let store = state.read_store()?;
    Ok(dashboard::staff_counts(&store))
}

/// Distinct departments in first-seen order, for the department picker.
pub fn list_departments(state: &CoreState) -> Result<Vec<String>, CommandError> {
    state.authorize(Capability::ViewTab(Tab::Staff))?;
    let store = state.read_store()?;
    let mut departments: Vec<String> = Vec::new();
    for member in store.staff() {
        if !departments.contains(&member.department) {
            departments.push(member.department.clone());
        }
    }
    Ok(departments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ErrorCode;
    use crate::core_state::test_support::state;
    use crate::fixtures::demo_user;
    use crate::models::Role;

    #[test]
    fn admin_filters_by_role() {
        let state = state();
        state.write_session().unwrap().login(demo_user(Role::Admin));
        let filter = StaffFilter {
            role: Some(Role::Doctor),
            ..Default::default()
        };
        let names: Vec<String> = list_staff(&state, &filter)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Dr. Michael Chen", "Dr. Lisa Park"]);
        assert_eq!(staff_summary(&state).unwrap().on_leave, 1);
        assert_eq!(list_departments(&state).unwrap().len(), 6);
    }

    #[test]
    fn non_admin_denied() {
        for role in [Role::Doctor, Role::Nurse, Role::Receptionist] {
            let state = state();
            state.write_session().unwrap().login(demo_user(role));
            let err = list_staff(&state, &StaffFilter::default()).unwrap_err();
            assert_eq!(err.code, ErrorCode::PermissionDenied);
            assert_eq!(staff_summary(&state).unwrap_err().code, ErrorCode::PermissionDenied);
        }
    }
}
