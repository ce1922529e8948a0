//! Route-guard predicates.
//!
//! Pure checks over the session plus the redirect the caller should
//! follow on denial; navigation itself stays with the caller.

use jiff::Timestamp;
use kiosk::claims::Actor;
use thiserror::Error;

use crate::auth::session::SessionStore;

/// Redirect target for a session of the wrong shape.
pub const FORBIDDEN_ROUTE: &str = "/forbidden";

/// Denied access, carrying the redirect the caller should follow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Denied {
    /// No valid session; redirect to a login page.
    #[error("authentication required")]
    NotAuthenticated {
        /// Login route for the actor kind the caller requires.
        login_route: &'static str,
    },

    /// A valid session of the wrong shape; redirect to the forbidden page.
    #[error("access forbidden")]
    Forbidden,
}

impl Denied {
    /// Route the caller should navigate to.
    #[must_use]
    pub const fn redirect_route(&self) -> &'static str {
        match self {
            Self::NotAuthenticated { login_route } => login_route,
            Self::Forbidden => FORBIDDEN_ROUTE,
        }
    }
}

/// Require any valid session.
///
/// # Errors
///
/// Returns [`Denied::NotAuthenticated`] with the platform login route when
/// no unexpired session is installed.
pub fn require_authenticated(session: &SessionStore, now: Timestamp) -> Result<(), Denied> {
    if session.is_authenticated_at(now) {
        Ok(())
    } else {
        Err(Denied::NotAuthenticated {
            login_route: Actor::Platform.login_route(),
        })
    }
}

/// Require a valid session for a specific actor kind.
///
/// # Errors
///
/// Absence of a session redirects to the required actor's login route; a
/// session of another actor kind is forbidden.
pub fn require_actor(session: &SessionStore, actor: Actor, now: Timestamp) -> Result<(), Denied> {
    let Some(claims) = session.claims().filter(|claims| !claims.is_expired_at(now)) else {
        return Err(Denied::NotAuthenticated {
            login_route: actor.login_route(),
        });
    };

    if claims.actor == actor {
        Ok(())
    } else {
        Err(Denied::Forbidden)
    }
}

/// Require at least one of the given roles.
///
/// # Errors
///
/// Returns [`Denied::Forbidden`] when the session holds none of the roles.
pub fn require_any_role(
    session: &SessionStore,
    any_of: &[&str],
    now: Timestamp,
) -> Result<(), Denied> {
    let Some(claims) = session.claims().filter(|claims| !claims.is_expired_at(now)) else {
        return Err(Denied::NotAuthenticated {
            login_route: Actor::Platform.login_route(),
        });
    };

    if any_of.iter().any(|role| claims.roles.iter().any(|held| held == role)) {
        Ok(())
    } else {
        Err(Denied::Forbidden)
    }
}
