use crate::models::UserProfile;

/// The acting identity for one request: resolved once by the handler layer
/// and passed read-only into the workflow, never held in global state.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
}

impl Session {
    pub fn new(user: UserProfile) -> Self {
        Self { user }
    }

    pub fn is_staff(&self) -> bool {
        self.user.role.can_manage()
    }
}
