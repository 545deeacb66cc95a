//! Service layer for the library portals.
//!
//! This module contains the stateful logic for:
//! - Circulation and account administration (`Library`)
//! - Demo authentication over the session store (`AuthService`)
//! - Route resolution and guards (`router`)

mod auth;
mod library;
pub mod router;

pub use auth::AuthService;
pub use library::{Library, ReminderKind};
pub use router::{Navigation, Route, authorize, navigate};
