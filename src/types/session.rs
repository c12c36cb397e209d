use serde::{Deserialize, Serialize};

/// Identity of the signed-in user, as handed out by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: String,
    pub email: Option<String>,
}
