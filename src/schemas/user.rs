use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::types::UserRole;

#[derive(Debug, Deserialize)]
pub(crate) struct UserCreate {
    pub(crate) email: String,
    pub(crate) password: String,
    #[serde(alias = "fullName", alias = "name")]
    pub(crate) full_name: String,
    #[serde(default = "default_user_role")]
    pub(crate) role: UserRole,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserLogin {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) full_name: String,
    pub(crate) role: UserRole,
    pub(crate) bio: Option<String>,
    pub(crate) avatar_url: Option<String>,
    pub(crate) created_at: String,
}

impl UserResponse {
    pub(crate) fn from_db(user: crate::db::models::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            bio: user.bio,
            avatar_url: user.avatar_url,
            created_at: format_primitive(user.created_at),
        }
    }
}

fn default_user_role() -> UserRole {
    UserRole::Student
}
