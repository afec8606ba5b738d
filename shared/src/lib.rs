use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod protocol;
pub mod records;
mod serde_helper;

// =========================================================
// Constants
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const AUTH_SCHEME: &str = "Bearer";

// =========================================================
// Identity
// =========================================================

/// Console role. The backend only ever issues these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Staff,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }

    /// Parses the wire name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == name)
    }

    /// Human readable label shown next to the user's name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Manager => "Manager",
            Role::Staff => "Staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record as returned by `/api/auth/me` and the user listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub department_id: Option<i64>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    /// Only present on admin listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
}

// =========================================================
// Authentication payloads
// =========================================================

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Plain `{"message": "..."}` acknowledgement returned by state-changing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_round_trips_wire_names() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn user_decodes_backend_record() {
        let json = r#"{
            "id": 1,
            "email": "admin@omnichat.com",
            "full_name": "System Admin",
            "phone": null,
            "role": "admin",
            "department_id": null,
            "is_active": true,
            "created_at": "2024-05-01T08:30:00.123456"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.role, Role::Admin);
        assert!(user.department_name.is_none());
    }

    #[test]
    fn user_with_unknown_role_is_rejected() {
        let json = r#"{"id":2,"email":"x@y.z","full_name":"X","role":"root",
            "is_active":true,"created_at":"2024-05-01T08:30:00"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn login_request_debug_hides_password() {
        let req = LoginRequest::new("a@b.c", "hunter2");
        let printed = format!("{:?}", req);
        assert!(printed.contains("a@b.c"));
        assert!(!printed.contains("hunter2"));
    }
}
