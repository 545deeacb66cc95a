//! Client-side session state.

use serde::{Deserialize, Serialize};

labeled_enum! {
    /// Portal a session belongs to.
    pub enum Role {
        Admin => "admin",
        Borrower => "borrower",
    }
}

impl Role {
    /// Login page that guarded routes of this role fall back to.
    pub fn login_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Borrower => "/borrower",
        }
    }

    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Borrower => "/borrower/dashboard",
        }
    }
}

/// Whatever the login or registration form collected.
///
/// Every field is optional; absent fields read as empty. Passwords are
/// never kept here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentData {
    pub student_id: String,
    pub name: String,
    pub department: String,
    pub year: String,
    pub semester: String,
    pub phone: String,
    pub email: String,
    pub remember_me: bool,
    pub accept_terms: bool,
}

/// Session as persisted in local storage.
///
/// Written at login, cleared at logout, never expires and is never checked
/// against a server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub user_role: Option<Role>,
    pub student_data: Option<StudentData>,
}

impl Session {
    pub fn admin() -> Self {
        Self {
            is_authenticated: true,
            user_role: Some(Role::Admin),
            student_data: None,
        }
    }

    pub fn borrower(student_data: StudentData) -> Self {
        Self {
            is_authenticated: true,
            user_role: Some(Role::Borrower),
            student_data: Some(student_data),
        }
    }

    /// Student data with missing fields defaulted.
    pub fn student(&self) -> StudentData {
        self.student_data.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_data_tolerates_partial_blobs() {
        let data: StudentData =
            serde_json::from_str(r#"{"studentId":"2021001","password":"x"}"#).unwrap();
        assert_eq!(data.student_id, "2021001");
        assert_eq!(data.name, "");
        assert!(!data.remember_me);
    }

    #[test]
    fn test_default_session_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated);
        assert_eq!(session.user_role, None);
        assert_eq!(session.student(), StudentData::default());
    }
}
