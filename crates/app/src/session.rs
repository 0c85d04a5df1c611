use dioxus::prelude::*;
use shared_types::{Session, SessionStatus};

/// Global session state, provided once by `App`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionState {
    pub status: Signal<SessionStatus>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            status: Signal::new(SessionStatus::Pending),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status.read().is_pending()
    }

    /// Owned copy of the signed-in session, if any.
    pub fn session(&self) -> Option<Session> {
        self.status.read().session().cloned()
    }

    /// Settle a `Pending` status from the server's answer. Errors count as signed out.
    pub fn resolve<E: std::fmt::Display>(&mut self, lookup: Result<Option<Session>, E>) {
        let session = lookup.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "session lookup failed; continuing signed out");
            None
        });
        self.status.set(SessionStatus::from_lookup(session));
    }

    pub fn sign_in(&mut self, session: Session) {
        self.status.set(SessionStatus::Authenticated(session));
    }

    pub fn sign_out(&mut self) {
        self.status.set(SessionStatus::Anonymous);
    }

    /// Reflect a saved display name without another round trip.
    pub fn set_display_name(&mut self, name: String) {
        if let SessionStatus::Authenticated(session) = &mut *self.status.write() {
            session.display_name = name;
        }
    }
}

/// Hook to access session state.
pub fn use_session() -> SessionState {
    use_context::<SessionState>()
}
