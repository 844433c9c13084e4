use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum UserType {
    Employee,
    Admin,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserType::Employee => "Employee",
            UserType::Admin => "Admin",
        };
        write!(f, "{}", s)
    }
}

/// The authenticated user as exposed by the session provider.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SessionUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: String,
}

impl SessionUser {
    pub fn employee(email: impl Into<String>) -> Self {
        SessionUser {
            user_type: UserType::Employee,
            email: email.into(),
        }
    }
}
