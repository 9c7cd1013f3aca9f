//! Session domain model.
//!
//! The session represents the authenticated identity for the lifetime of a
//! dashboard run. It is rehydrated from the durable snapshot on cold start
//! and destroyed on logout.

use serde::{Deserialize, Serialize};

/// The role carried by an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Admin,
}

/// An authenticated session.
///
/// Only one session is active at a time; its lifetime spans from a
/// successful login (or snapshot restore) until explicit logout or token
/// invalidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Login principal (account name or student number)
    pub username: String,
    pub role: Role,
    /// The student record bound to this account, when role is Student
    pub student_id: Option<String>,
    /// Whether the self-assessment has been completed
    #[serde(default)]
    pub assessment_completed: bool,
    /// Opaque bearer token attached to outbound gateway requests
    pub auth_token: String,
}

impl Session {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        let role: Role = serde_json::from_str("\"STUDENT\"").unwrap();
        assert_eq!(role, Role::Student);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
    }
}
