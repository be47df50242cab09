//! Session token → authenticated identity bindings.
//!
//! Sessions are keyed on an opaque token handed to the caller at login and
//! reference the account by identity key, never by a copy of its data.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::Account;

/// Opaque bearer token identifying one caller's session slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Fresh random token.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for SessionToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who an authenticated session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionIdentity {
    pub identity_key: String,
    pub display_name: String,
}

impl From<&Account> for SessionIdentity {
    fn from(account: &Account) -> Self {
        Self {
            identity_key: account.identity_key.clone(),
            display_name: account.display_name.clone(),
        }
    }
}

/// Result of resolving a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated(SessionIdentity),
}

impl Identity {
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(&id.display_name),
        }
    }

    pub fn authenticated(self) -> Option<SessionIdentity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(id),
        }
    }
}

struct Slot {
    identity: SessionIdentity,
    last_seen: DateTime<Utc>,
}

/// Active session bindings.
pub struct SessionManager {
    slots: RwLock<HashMap<SessionToken, Slot>>,
    /// `None` keeps sessions until logout.
    idle_timeout: Option<Duration>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionManager {
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Build from a timeout in minutes; 0 disables expiry.
    pub fn with_idle_minutes(minutes: u64) -> Self {
        let timeout = i64::try_from(minutes)
            .ok()
            .filter(|m| *m > 0)
            .and_then(Duration::try_minutes);
        Self::new(timeout)
    }

    /// Issue a new token bound to `account`.
    pub fn login(&self, account: &Account) -> SessionToken {
        let token = SessionToken::generate();
        self.bind(&token, SessionIdentity::from(account));
        token
    }

    /// Bind `token` to `identity`, replacing any prior binding.
    pub fn bind(&self, token: &SessionToken, identity: SessionIdentity) {
        self.bind_at(token, identity, Utc::now());
    }

    fn bind_at(&self, token: &SessionToken, identity: SessionIdentity, now: DateTime<Utc>) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let replaced = slots
            .insert(
                token.clone(),
                Slot {
                    identity,
                    last_seen: now,
                },
            )
            .is_some();
        tracing::debug!(replaced, active = slots.len(), "session bound");
    }

    /// Resolve `token`, refreshing its idle timer.
    pub fn current_identity(&self, token: &SessionToken) -> Identity {
        self.current_identity_at(token, Utc::now())
    }

    fn current_identity_at(&self, token: &SessionToken, now: DateTime<Utc>) -> Identity {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let Some(slot) = slots.get_mut(token) else {
            return Identity::Anonymous;
        };

        if let Some(timeout) = self.idle_timeout {
            if now - slot.last_seen > timeout {
                slots.remove(token);
                tracing::debug!("session expired");
                return Identity::Anonymous;
            }
        }

        slot.last_seen = now;
        Identity::Authenticated(slot.identity.clone())
    }

    /// Drop the binding for `token`. No-op when there is none.
    pub fn clear(&self, token: &SessionToken) {
        let removed = self
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .is_some();
        tracing::debug!(removed, "session cleared");
    }

    pub fn logout(&self, token: &SessionToken) {
        self.clear(token);
    }

    pub fn active_sessions(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
