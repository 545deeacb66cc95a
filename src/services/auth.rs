//! Demo authentication against the configured credentials.
//!
//! Every call waits out a fixed simulated round trip before answering.
//! Successful logins write the session to the store; failures leave it
//! untouched and never say which part was wrong.

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::{
    AdminLoginForm, AuthConfig, LoginForm, PasswordChangeForm, RegistrationForm, Role, Session,
    StudentData,
};
use crate::pipeline::validate::{
    validate_admin_login, validate_login, validate_password_change, validate_registration,
};
use crate::storage::{KeyValueStore, clear_session, load_session, save_session};

/// Login, registration and logout over a key/value session store.
pub struct AuthService<S> {
    config: AuthConfig,
    store: S,
}

impl<S: KeyValueStore> AuthService<S> {
    pub fn new(config: AuthConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn simulate_latency(&self, millis: u64) {
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    /// Current session as persisted.
    pub async fn session(&self) -> Result<Session> {
        load_session(&self.store).await
    }

    pub async fn login_admin(&self, form: &AdminLoginForm) -> Result<Session> {
        validate_admin_login(form).into_result()?;
        self.simulate_latency(self.config.admin_login_latency_ms).await;

        if form.username != self.config.admin_username || form.password != self.config.admin_password {
            log::warn!("Admin login rejected for '{}'", form.username);
            return Err(AppError::LoginFailed);
        }

        let session = Session::admin();
        save_session(&self.store, &session).await?;
        log::info!("Admin '{}' logged in", form.username);
        Ok(session)
    }

    pub async fn login_borrower(&self, form: &LoginForm) -> Result<Session> {
        validate_login(form).into_result()?;
        self.simulate_latency(self.config.login_latency_ms).await;

        if form.student_id != self.config.student_id || form.password != self.config.student_password {
            log::warn!("Student login rejected for '{}'", form.student_id);
            return Err(AppError::LoginFailed);
        }

        let session = Session::borrower(StudentData::from(form));
        save_session(&self.store, &session).await?;
        log::info!("Student {} logged in", form.student_id);
        Ok(session)
    }

    /// Register and sign in straight away.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Session> {
        validate_registration(form).into_result()?;
        self.simulate_latency(self.config.register_latency_ms).await;

        let session = Session::borrower(StudentData::from(form));
        save_session(&self.store, &session).await?;
        log::info!("Registered student {} ({})", form.student_id, form.name);
        Ok(session)
    }

    pub async fn logout(&self) -> Result<()> {
        clear_session(&self.store).await?;
        log::info!("Logged out");
        Ok(())
    }

    /// Password change from the profile screen. Requires a borrower
    /// session; nothing is stored since passwords never are.
    pub async fn change_password(&self, form: &PasswordChangeForm) -> Result<()> {
        let session = self.session().await?;
        if !(session.is_authenticated && session.user_role == Some(Role::Borrower)) {
            return Err(AppError::validation("Sign in as a student to change the password"));
        }
        validate_password_change(form).into_result()?;
        log::info!("Password changed for {}", session.student().student_id);
        Ok(())
    }
}
