// Per-call session context, threaded explicitly through the engine instead of a
// process-wide client singleton holding the current user.

use crate::domain::UserRole;

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: String,
    pub role: UserRole,
    /// Tags log lines so a booking attempt can be traced end to end.
    pub correlation_id: String,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            correlation_id: format!("req-{:08x}", rand::random::<u32>()),
        }
    }

    pub fn guest(user_id: impl Into<String>) -> Self {
        Self::new(user_id, UserRole::Guest)
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }
}
