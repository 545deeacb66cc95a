//! Form payloads submitted from the login and profile screens.

use serde::{Deserialize, Serialize};

use super::session::StudentData;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminLoginForm {
    pub username: String,
    pub password: String,
}

/// Student login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub student_id: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Student self-registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub student_id: String,
    pub password: String,
    pub confirm_password: String,
    pub department: String,
    pub year: String,
    pub semester: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub accept_terms: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl From<&LoginForm> for StudentData {
    fn from(form: &LoginForm) -> Self {
        Self {
            student_id: form.student_id.clone(),
            remember_me: form.remember_me,
            ..Self::default()
        }
    }
}

impl From<&RegistrationForm> for StudentData {
    fn from(form: &RegistrationForm) -> Self {
        Self {
            student_id: form.student_id.clone(),
            name: form.name.clone(),
            department: form.department.clone(),
            year: form.year.clone(),
            semester: form.semester.clone(),
            phone: form.phone.clone(),
            email: form.email.clone(),
            remember_me: false,
            accept_terms: form.accept_terms,
        }
    }
}
