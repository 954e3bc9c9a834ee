//! Dashboard data for the signed-in user.

use super::CommandError;
use crate::authorization::Capability;
use crate::core_state::CoreState;
use crate::dashboard::{self, DashboardData};
use crate::models::Tab;

pub fn get_dashboard(state: &CoreState) -> Result<DashboardData, CommandError> {
    let user = state.authorize(Capability::ViewTab(Tab::Dashboard))?;
    let store = state.read_store()?;
    Ok(dashboard::dashboard_for(&user, &store, state.today()))
}
