//! Storage abstractions for client-side state.
//!
//! Mirrors browser local storage: string keys mapped to string values.
//!
//! ## Keys
//!
//! ```text
//! isAuthenticated   "true" or absent
//! userRole          "admin" | "borrower"
//! studentData       JSON object of the login/registration form fields
//! library           JSON snapshot of books and borrowers
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{Role, Seed, Session, StudentData};

// Re-export for convenience
pub use local::LocalStorage;

pub const IS_AUTHENTICATED: &str = "isAuthenticated";
pub const USER_ROLE: &str = "userRole";
pub const STUDENT_DATA: &str = "studentData";
pub const LIBRARY: &str = "library";

/// Trait for key/value storage backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}

/// Read the session back from its three keys.
///
/// Only the exact string `"true"` authenticates and only the exact role
/// labels are recognised. A `studentData` blob that does not parse reads
/// as an empty record.
pub async fn load_session<S: KeyValueStore + ?Sized>(store: &S) -> Result<Session> {
    let is_authenticated = store.get_item(IS_AUTHENTICATED).await?.as_deref() == Some("true");

    let user_role = store
        .get_item(USER_ROLE)
        .await?
        .and_then(|raw| Role::ALL.iter().copied().find(|r| r.as_str() == raw));

    let student_data = store.get_item(STUDENT_DATA).await?.map(|raw| {
        serde_json::from_str::<StudentData>(&raw).unwrap_or_else(|e| {
            log::warn!("Unreadable studentData ({}); using empty record", e);
            StudentData::default()
        })
    });

    Ok(Session {
        is_authenticated,
        user_role,
        student_data,
    })
}

/// Persist a session, removing keys the session leaves empty.
pub async fn save_session<S: KeyValueStore + ?Sized>(store: &S, session: &Session) -> Result<()> {
    if session.is_authenticated {
        store.set_item(IS_AUTHENTICATED, "true").await?;
    } else {
        store.remove_item(IS_AUTHENTICATED).await?;
    }

    match session.user_role {
        Some(role) => store.set_item(USER_ROLE, role.as_str()).await?,
        None => store.remove_item(USER_ROLE).await?,
    }

    match &session.student_data {
        Some(data) => {
            let json = serde_json::to_string(data)?;
            store.set_item(STUDENT_DATA, &json).await?;
        }
        None => store.remove_item(STUDENT_DATA).await?,
    }
    Ok(())
}

pub async fn clear_session<S: KeyValueStore + ?Sized>(store: &S) -> Result<()> {
    for key in [IS_AUTHENTICATED, USER_ROLE, STUDENT_DATA] {
        store.remove_item(key).await?;
    }
    Ok(())
}

/// Saved library state, if any action has been persisted yet.
///
/// The state is checked like seed data, so a hand-edited store with
/// `available > quantity` or duplicate ids is refused.
pub async fn load_library<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Seed>> {
    let Some(raw) = store.get_item(LIBRARY).await? else {
        return Ok(None);
    };
    let state: Seed = serde_json::from_str(&raw)?;
    state
        .validate()
        .map_err(|e| AppError::config(format!("Invalid saved library state: {e}")))?;
    Ok(Some(state))
}

pub async fn save_library<S: KeyValueStore + ?Sized>(store: &S, state: &Seed) -> Result<()> {
    let json = serde_json::to_string(state)?;
    store.set_item(LIBRARY, &json).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_empty_store_is_logged_out() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());

        assert_eq!(load_session(&store).await.unwrap(), Session::default());
    }

    #[tokio::test]
    async fn test_session_round_trips_through_keys() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        let session = Session::borrower(StudentData {
            student_id: "2021001".into(),
            remember_me: true,
            ..Default::default()
        });

        save_session(&store, &session).await.unwrap();
        assert_eq!(store.get_item(USER_ROLE).await.unwrap().as_deref(), Some("borrower"));
        assert_eq!(load_session(&store).await.unwrap(), session);

        clear_session(&store).await.unwrap();
        assert_eq!(load_session(&store).await.unwrap(), Session::default());
    }

    #[tokio::test]
    async fn test_hand_edited_values() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        store.set_item(IS_AUTHENTICATED, "yes").await.unwrap();
        store.set_item(USER_ROLE, "Admin").await.unwrap();
        store.set_item(STUDENT_DATA, "{broken").await.unwrap();

        let session = load_session(&store).await.unwrap();
        assert!(!session.is_authenticated);
        assert_eq!(session.user_role, None);
        assert_eq!(session.student_data, Some(StudentData::default()));
    }

    #[tokio::test]
    async fn test_library_snapshot() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());
        assert!(load_library(&store).await.unwrap().is_none());

        let seed = Seed::default();
        save_library(&store, &seed).await.unwrap();
        let loaded = load_library(&store).await.unwrap().unwrap();
        assert_eq!(loaded.books, seed.books);
        assert_eq!(loaded.borrowers, seed.borrowers);
    }

    #[tokio::test]
    async fn test_invalid_library_state_is_refused() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStorage::new(tmp.path());

        let mut seed = Seed::default();
        seed.books[0].available = seed.books[0].quantity + 1;
        save_library(&store, &seed).await.unwrap();

        assert!(matches!(load_library(&store).await, Err(AppError::Config(_))));
    }
}
