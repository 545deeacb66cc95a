// src/pipeline/validate.rs

//! Input format validators and form checks.
//!
//! Validation is advisory and client-side only: each check either yields a
//! field-level message or passes silently. The format heuristics are kept
//! exactly as permissive as the portals have always been.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::strength::password_score;
use crate::error::{AppError, Result};
use crate::models::{AdminLoginForm, LoginForm, PasswordChangeForm, RegistrationForm};

pub const DEPARTMENTS: &[&str] = &[
    "BSC-IT", "BSC-DS", "BSC-AIML", "BSC-VFX", "BCA", "BCOM", "BMS", "BFM",
];
pub const YEARS: &[&str] = &["1st", "2nd", "3rd"];
pub const SEMESTERS: &[&str] = &["Sem 1", "Sem 2", "Sem 3", "Sem 4", "Sem 5", "Sem 6"];

/// Registration passwords scoring below this are flagged.
const MIN_REGISTER_SCORE: u8 = 50;
const MIN_PHONE_LEN: usize = 10;

static STUDENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7}$").expect("student ID pattern is valid"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Exactly seven ASCII digits.
pub fn validate_student_id(id: &str) -> bool {
    STUDENT_ID.is_match(id)
}

/// `local@domain.tld` shape check. Not RFC 5322.
pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// At least ten characters of any kind.
pub fn validate_phone(phone: &str) -> bool {
    phone.chars().count() >= MIN_PHONE_LEN
}

labeled_enum! {
    /// Form fields that can carry an error message.
    pub enum Field {
        Name => "name",
        StudentId => "studentId",
        Username => "username",
        Password => "password",
        ConfirmPassword => "confirmPassword",
        CurrentPassword => "currentPassword",
        NewPassword => "newPassword",
        Department => "department",
        Year => "year",
        Semester => "semester",
        Email => "email",
        Phone => "phone",
        AcceptTerms => "acceptTerms",
    }
}

/// Which form a field belongs to; password strength only matters on
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
}

/// Field name to message, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Apply a real-time check result: set the message or clear the field.
    pub fn apply(&mut self, field: Field, outcome: Option<&str>) {
        match outcome {
            Some(message) => self.insert(field, message),
            None => self.remove(field),
        }
    }

    /// `Ok` when empty, otherwise a `Form` error carrying every message.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Form(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Check one field as the user types.
///
/// Empty values never produce a message. `current_password` is what the
/// password field holds, for the confirmation check.
pub fn check_field(
    kind: FormKind,
    field: Field,
    value: &str,
    current_password: &str,
) -> Option<&'static str> {
    if value.is_empty() {
        return None;
    }
    match field {
        Field::StudentId if !validate_student_id(value) => Some("Student ID must be 7 digits"),
        Field::Email if !validate_email(value) => Some("Please enter a valid email address"),
        Field::Password
            if kind == FormKind::Register && password_score(value) < MIN_REGISTER_SCORE =>
        {
            Some("Password should be stronger")
        }
        Field::ConfirmPassword if value != current_password => Some("Passwords do not match"),
        Field::Phone if !validate_phone(value) => Some("Phone number should be at least 10 digits"),
        _ => None,
    }
}

fn require(errors: &mut FieldErrors, field: Field, value: &str, message: &str) {
    if value.is_empty() {
        errors.insert(field, message);
    }
}

/// Submit-time check for the admin login: both fields present.
pub fn validate_admin_login(form: &AdminLoginForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, Field::Username, &form.username, "Username is required");
    require(&mut errors, Field::Password, &form.password, "Password is required");
    errors
}

/// Submit-time check for the student login: both fields present.
pub fn validate_login(form: &LoginForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, Field::StudentId, &form.student_id, "Student ID is required");
    require(&mut errors, Field::Password, &form.password, "Password is required");
    errors
}

/// Submit-time check for registration.
///
/// Only presence, list membership and password confirmation block the
/// submit; format problems are reported by [`registration_warnings`].
pub fn validate_registration(form: &RegistrationForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, Field::Name, &form.name, "Full name is required");
    require(&mut errors, Field::StudentId, &form.student_id, "Student ID is required");
    require(&mut errors, Field::Password, &form.password, "Password is required");
    require(
        &mut errors,
        Field::ConfirmPassword,
        &form.confirm_password,
        "Please confirm password",
    );
    require(&mut errors, Field::Department, &form.department, "Department is required");
    require(&mut errors, Field::Year, &form.year, "Year is required");
    require(&mut errors, Field::Semester, &form.semester, "Semester is required");
    require(&mut errors, Field::Email, &form.email, "Email is required");
    require(&mut errors, Field::Phone, &form.phone, "Phone is required");
    if !form.accept_terms {
        errors.insert(Field::AcceptTerms, "Please accept terms and conditions");
    }

    let choices = [
        (Field::Department, form.department.as_str(), DEPARTMENTS),
        (Field::Year, form.year.as_str(), YEARS),
        (Field::Semester, form.semester.as_str(), SEMESTERS),
    ];
    for (field, value, allowed) in choices {
        if !value.is_empty() && !allowed.contains(&value) {
            errors.insert(field, format!("Please choose a {field} from the list"));
        }
    }

    if form.password != form.confirm_password {
        errors.insert(Field::ConfirmPassword, "Passwords do not match");
    }
    errors
}

/// Real-time format messages for every filled registration field.
pub fn registration_warnings(form: &RegistrationForm) -> FieldErrors {
    let mut warnings = FieldErrors::new();
    let fields = [
        (Field::StudentId, form.student_id.as_str()),
        (Field::Email, form.email.as_str()),
        (Field::Password, form.password.as_str()),
        (Field::ConfirmPassword, form.confirm_password.as_str()),
        (Field::Phone, form.phone.as_str()),
    ];
    for (field, value) in fields {
        let outcome = check_field(FormKind::Register, field, value, &form.password);
        warnings.apply(field, outcome);
    }
    warnings
}

/// Submit-time check for a password change from the profile screen.
pub fn validate_password_change(form: &PasswordChangeForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let missing = "Please fill in all password fields";
    require(&mut errors, Field::CurrentPassword, &form.current_password, missing);
    require(&mut errors, Field::NewPassword, &form.new_password, missing);
    require(&mut errors, Field::ConfirmPassword, &form.confirm_password, missing);
    if errors.is_empty() && form.new_password != form.confirm_password {
        errors.insert(
            Field::ConfirmPassword,
            "New password and confirmation don't match",
        );
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_parse_alongside_result_alias() {
        let field: Result<Field> = "studentid".parse();
        assert_eq!(field.unwrap(), Field::StudentId);
        assert!("surname".parse::<Field>().is_err());
    }

    fn complete_registration() -> RegistrationForm {
        RegistrationForm {
            name: "Kavya Nair".into(),
            student_id: "2024011".into(),
            password: "Shelf#2024".into(),
            confirm_password: "Shelf#2024".into(),
            department: "BSC-DS".into(),
            year: "1st".into(),
            semester: "Sem 1".into(),
            phone: "+91 9000000001".into(),
            email: "kavya.nair@college.edu".into(),
            accept_terms: true,
        }
    }

    #[test]
    fn test_student_id_is_exactly_seven_digits() {
        assert!(validate_student_id("2021001"));
        assert!(!validate_student_id("202100"));
        assert!(!validate_student_id("20210011"));
        assert!(!validate_student_id("202100a"));
        assert!(!validate_student_id(" 2021001"));
        // Non-ASCII digits are not student IDs
        assert!(!validate_student_id("२०२१००१"));
    }

    #[test]
    fn test_email_heuristic_is_permissive() {
        assert!(validate_email("arjun.sharma@college.edu"));
        assert!(validate_email("a@b.c"));
        assert!(validate_email("weird!chars@host.x.y"));
        assert!(!validate_email("no-at-sign.edu"));
        assert!(!validate_email("two@@college.edu"));
        assert!(!validate_email("space in@college.edu"));
        assert!(!validate_email("nodot@college"));
    }

    #[test]
    fn test_phone_only_checks_length() {
        assert!(validate_phone("9876543210"));
        assert!(validate_phone("call me now"));
        assert!(!validate_phone("98765"));
    }

    #[test]
    fn test_check_field_messages() {
        assert_eq!(
            check_field(FormKind::Login, Field::StudentId, "123", ""),
            Some("Student ID must be 7 digits")
        );
        assert_eq!(
            check_field(FormKind::Register, Field::Password, "abc", ""),
            Some("Password should be stronger")
        );
        // Strength is not judged on the login form
        assert_eq!(check_field(FormKind::Login, Field::Password, "abc", ""), None);
        assert_eq!(
            check_field(FormKind::Register, Field::ConfirmPassword, "abc", "abd"),
            Some("Passwords do not match")
        );
        assert_eq!(check_field(FormKind::Register, Field::Phone, "", ""), None);
    }

    #[test]
    fn test_apply_clears_fixed_fields() {
        let mut errors = FieldErrors::new();
        errors.apply(Field::Email, check_field(FormKind::Register, Field::Email, "x", ""));
        assert!(errors.contains(Field::Email));
        errors.apply(
            Field::Email,
            check_field(FormKind::Register, Field::Email, "x@y.z", ""),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_login_requires_both_fields() {
        let errors = validate_login(&LoginForm::default());
        assert_eq!(errors.get(Field::StudentId), Some("Student ID is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));

        let form = LoginForm {
            student_id: "2021001".into(),
            password: "student123".into(),
            remember_me: false,
        };
        assert!(validate_login(&form).is_empty());
    }

    #[test]
    fn test_validate_registration_accepts_complete_form() {
        assert!(validate_registration(&complete_registration()).is_empty());
        assert!(registration_warnings(&complete_registration()).is_empty());
    }

    #[test]
    fn test_validate_registration_reports_missing_fields() {
        let errors = validate_registration(&RegistrationForm::default());
        assert_eq!(errors.len(), 10);
        assert_eq!(
            errors.get(Field::AcceptTerms),
            Some("Please accept terms and conditions")
        );
        assert_eq!(errors.get(Field::Name), Some("Full name is required"));
    }

    #[test]
    fn test_validate_registration_password_mismatch() {
        let mut form = complete_registration();
        form.confirm_password = "Different#1".into();
        let errors = validate_registration(&form);
        assert_eq!(errors.get(Field::ConfirmPassword), Some("Passwords do not match"));
    }

    #[test]
    fn test_validate_registration_rejects_unlisted_choices() {
        let mut form = complete_registration();
        form.department = "Astrology".into();
        let errors = validate_registration(&form);
        assert_eq!(
            errors.get(Field::Department),
            Some("Please choose a department from the list")
        );
    }

    #[test]
    fn test_format_problems_do_not_block_registration() {
        let mut form = complete_registration();
        form.email = "not-an-email".into();
        form.phone = "123".into();
        assert!(validate_registration(&form).is_empty());

        let warnings = registration_warnings(&form);
        assert!(warnings.contains(Field::Email));
        assert!(warnings.contains(Field::Phone));
    }

    #[test]
    fn test_validate_password_change() {
        let errors = validate_password_change(&PasswordChangeForm::default());
        assert_eq!(errors.len(), 3);

        let form = PasswordChangeForm {
            current_password: "student123".into(),
            new_password: "Library#1".into(),
            confirm_password: "Library#2".into(),
        };
        assert_eq!(
            validate_password_change(&form).get(Field::ConfirmPassword),
            Some("New password and confirmation don't match")
        );
    }

    #[test]
    fn test_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.insert(Field::Email, "Email is required");
        match errors.into_result() {
            Err(AppError::Form(errors)) => assert_eq!(errors.to_string(), "email: Email is required"),
            other => panic!("expected form error, got {other:?}"),
        }
    }
}
