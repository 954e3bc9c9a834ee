//! Login session: who is signed in and which tab they are on.
//!
//! Two states, `Anonymous` and `Authenticated`. Login always succeeds for a
//! demo user (there is no credential check). Tab changes are checked against
//! the navigation policy here, so a restricted tab can never become active
//! even if a caller skips the navigation list.

use serde::Serialize;

use crate::authorization::navigation_items_for;
use crate::models::{Role, Tab, User};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No user is signed in")]
    NotAuthenticated,
    #[error("Tab {tab} is not available to {role}")]
    InvalidTab { tab: Tab, role: Role },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Session {
    #[default]
    Anonymous,
    #[serde(rename_all = "camelCase")]
    Authenticated { user: User, active_tab: Tab },
}

impl Session {
    pub fn new() -> Self {
        Self::Anonymous
    }

    pub fn current_user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user, .. } => Some(user),
        }
    }

    /// The signed-in user, or `NotAuthenticated`.
    pub fn require_user(&self) -> Result<&User, SessionError> {
        self.current_user().ok_or(SessionError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Active tab; dashboard when signed out.
    pub fn active_tab(&self) -> Tab {
        match self {
            Self::Anonymous => Tab::Dashboard,
            Self::Authenticated { active_tab, .. } => *active_tab,
        }
    }

    /// Sign `user` in, replacing any previous user, and land on the dashboard.
    pub fn login(&mut self, user: User) {
        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
        *self = Self::Authenticated {
            user,
            active_tab: Tab::Dashboard,
        };
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user() {
            tracing::info!(user_id = %user.id, "User logged out");
        }
        *self = Self::Anonymous;
    }

    pub fn set_active_tab(&mut self, tab: Tab) -> Result<(), SessionError> {
        match self {
            Self::Anonymous => Err(SessionError::NotAuthenticated),
            Self::Authenticated { user, active_tab } => {
                if !navigation_items_for(user.role).contains(&tab) {
                    tracing::warn!(role = %user.role, %tab, "Rejected tab change");
                    return Err(SessionError::InvalidTab {
                        tab,
                        role: user.role,
                    });
                }
                *active_tab = tab;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::demo_user;

    #[test]
    fn starts_anonymous() {
        let session = Session::new();
        assert!(session.current_user().is_none());
        assert!(!session.is_authenticated());
        assert_eq!(session.active_tab(), Tab::Dashboard);
        assert_eq!(session.require_user(), Err(SessionError::NotAuthenticated));
    }

    #[test]
    fn login_resets_tab_to_dashboard() {
        let mut session = Session::new();
        session.login(demo_user(Role::Admin));
        session.set_active_tab(Tab::Staff).unwrap();
        assert_eq!(session.active_tab(), Tab::Staff);

        session.login(demo_user(Role::Nurse));
        assert_eq!(session.active_tab(), Tab::Dashboard);
        assert_eq!(session.current_user().unwrap().role, Role::Nurse);
    }

    #[test]
    fn logout_clears_user_and_tab() {
        let mut session = Session::new();
        session.login(demo_user(Role::Admin));
        session.set_active_tab(Tab::Inventory).unwrap();
        session.logout();
        assert_eq!(session, Session::Anonymous);
        assert_eq!(session.active_tab(), Tab::Dashboard);
    }

    #[test]
    fn restricted_tab_rejected() {
        let mut session = Session::new();
        session.login(demo_user(Role::Receptionist));
        let err = session.set_active_tab(Tab::Inventory).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTab {
                tab: Tab::Inventory,
                role: Role::Receptionist
            }
        );
        assert_eq!(session.active_tab(), Tab::Dashboard, "tab unchanged on rejection");
        assert!(session.set_active_tab(Tab::Appointments).is_ok());
    }

    #[test]
    fn tab_change_requires_login() {
        let mut session = Session::new();
        assert_eq!(
            session.set_active_tab(Tab::Patients),
            Err(SessionError::NotAuthenticated)
        );
    }

    #[test]
    fn serializes_tagged_state() {
        let mut session = Session::new();
        assert_eq!(
            serde_json::to_value(&session).unwrap(),
            serde_json::json!({"state": "anonymous"})
        );
        session.login(demo_user(Role::Doctor));
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["state"], "authenticated");
        assert_eq!(json["activeTab"], "dashboard");
        assert_eq!(json["user"]["role"], "doctor");
    }
}
