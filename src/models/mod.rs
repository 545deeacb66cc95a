// src/models/mod.rs

//! Domain models for the library portals.
//!
//! This module contains all record shapes shared by the derivation
//! pipeline, the services and the storage layer, organized by their
//! primary purpose.

mod book;
mod borrower;
mod config;
mod forms;
mod seed;
mod session;

// Re-export all public types
pub use book::{Book, BookId, BookStatus, Category, Condition, DEFAULT_COVER, NewBook};
pub use borrower::{
    BorrowRecord, Borrower, BorrowerId, BorrowerStatus, Membership, Notification,
    NotificationType, RecordStatus,
};
pub use config::{AuthConfig, Config, LoggingConfig, MembershipConfig, PathsConfig, PolicyConfig};
pub use forms::{AdminLoginForm, LoginForm, PasswordChangeForm, RegistrationForm};
pub use seed::Seed;
pub use session::{Role, Session, StudentData};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_case_insensitively() {
        assert_eq!("computer science".parse::<Category>().unwrap(), Category::ComputerScience);
        assert_eq!("SUSPENDED".parse::<BorrowerStatus>().unwrap(), BorrowerStatus::Suspended);
        assert_eq!(" premium ".parse::<Membership>().unwrap(), Membership::Premium);
        assert!("Mint".parse::<Condition>().is_err());
    }

    #[test]
    fn test_labels_round_trip_through_display() {
        for condition in Condition::ALL {
            assert_eq!(condition.to_string().parse::<Condition>().unwrap(), *condition);
        }
    }

    #[test]
    fn test_labels_serialize_as_display_text() {
        let json = serde_json::to_string(&RecordStatus::Overdue).unwrap();
        assert_eq!(json, "\"overdue\"");
        let json = serde_json::to_string(&Category::ArtificialIntelligence).unwrap();
        assert_eq!(json, "\"Artificial Intelligence\"");
    }
}
