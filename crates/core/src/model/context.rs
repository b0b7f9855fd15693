use serde::{Deserialize, Serialize};

use crate::model::UserId;

/// Explicit per-call user context.
///
/// Accessors that are user-scoped take this by reference instead of reading
/// an ambient signed-in user, so they stay pure functions of their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: UserId,
}

impl UserContext {
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
