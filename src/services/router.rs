//! Client-side routes and their guards.
//!
//! Guards trust whatever session state is persisted. Editing the stored
//! keys by hand is enough to get past them.

use std::fmt;

use crate::models::{Role, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    AdminLogin,
    AdminDashboard,
    BorrowerLogin,
    BorrowerDashboard,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Landing,
        Route::AdminLogin,
        Route::AdminDashboard,
        Route::BorrowerLogin,
        Route::BorrowerDashboard,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::AdminLogin => Role::Admin.login_path(),
            Route::AdminDashboard => Role::Admin.dashboard_path(),
            Route::BorrowerLogin => Role::Borrower.login_path(),
            Route::BorrowerDashboard => Role::Borrower.dashboard_path(),
        }
    }

    /// Match a path exactly, allowing one trailing slash.
    pub fn parse(path: &str) -> Option<Route> {
        let path = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(trimmed) => trimmed,
        };
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Role a route is reserved for, if it is guarded.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::AdminDashboard => Some(Role::Admin),
            Route::BorrowerDashboard => Some(Role::Borrower),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of opening a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(&'static str),
}

/// Whether a session may open pages reserved for `required`.
pub fn authorize(session: &Session, required: Role) -> bool {
    session.is_authenticated && session.user_role == Some(required)
}

/// Resolve a path the way the router would.
///
/// Guarded pages the session may not see redirect to that role's login
/// page; unknown paths go back to the landing page.
pub fn navigate(session: &Session, path: &str) -> Navigation {
    let Some(route) = Route::parse(path) else {
        return Navigation::Redirect(Route::Landing.path());
    };
    match route.required_role() {
        Some(role) if !authorize(session, role) => Navigation::Redirect(role.login_path()),
        _ => Navigation::Render(route),
    }
}
