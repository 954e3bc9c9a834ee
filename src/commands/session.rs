//! Login, logout and tab navigation.

use serde::Serialize;

use super::CommandError;
use crate::authorization::navigation_items_for;
use crate::core_state::CoreState;
use crate::fixtures;
use crate::models::{Role, Tab, User};

/// What the shell needs to render the frame around the active tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub user: Option<User>,
    pub active_tab: Tab,
    /// Empty when signed out.
    pub navigation: Vec<Tab>,
}

/// The demo accounts offered on the login screen.
pub fn demo_accounts() -> Vec<User> {
    fixtures::demo_users()
}

pub fn get_session(state: &CoreState) -> Result<SessionView, CommandError> {
    let session = state.read_session()?;
    let user = session.current_user().cloned();
    Ok(SessionView {
        navigation: user
            .as_ref()
            .map(|u| navigation_items_for(u.role))
            .unwrap_or_default(),
        active_tab: session.active_tab(),
        user,
    })
}

/// Sign in as the demo user for `role`.
///
/// Waits `config.login_delay` first; the pause is cosmetic and no lock is
/// held across it.
pub async fn login(state: &CoreState, role: Role) -> Result<SessionView, CommandError> {
    if !state.config.login_delay.is_zero() {
        tokio::time::sleep(state.config.login_delay).await;
    }
    state.write_session()?.login(fixtures::demo_user(role));
    get_session(state)
}

pub fn logout(state: &CoreState) -> Result<SessionView, CommandError> {
    state.write_session()?.logout();
    get_session(state)
}

pub fn set_active_tab(state: &CoreState, tab: Tab) -> Result<SessionView, CommandError> {
    state.write_session()?.set_active_tab(tab)?;
    tracing::debug!(%tab, "Active tab changed");
    get_session(state)
}

/// Tabs the signed-in user may open.
pub fn navigation(state: &CoreState) -> Result<Vec<Tab>, CommandError> {
    let user = state.current_user()?;
    Ok(navigation_items_for(user.role))
}
