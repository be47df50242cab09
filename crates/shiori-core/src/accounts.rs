use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::credential::Credential;
use crate::error::ShioriError;
use crate::models::{Account, StatusEntry, StatusLabel};

/// In-memory account records, keyed by identity key (email).
///
/// Writes are serialised by a single reader/writer lock, so two requests
/// touching the same account never interleave. Contents live only as long
/// as the process.
pub struct AccountStore {
    inner: RwLock<Accounts>,
    /// Checked when the identity key is unknown, so a miss costs the same
    /// hash derivation as a wrong secret.
    decoy: Credential,
    hash_rounds: u32,
}

#[derive(Default)]
struct Accounts {
    by_key: HashMap<String, Account>,
    /// display name → identity key of the first account registered with it.
    by_display_name: HashMap<String, String>,
}

impl AccountStore {
    /// A store whose new credentials use `rounds` PBKDF2 iterations.
    pub fn with_hash_rounds(rounds: u32) -> Self {
        Self {
            inner: RwLock::new(Accounts::default()),
            decoy: Credential::derive("decoy", rounds),
            hash_rounds: rounds,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Accounts> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Accounts> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an account with an empty status map.
    pub fn register(
        &self,
        identity_key: &str,
        display_name: &str,
        secret: &str,
    ) -> Result<(), ShioriError> {
        // Hash outside the lock; derivation is the slow part.
        let credential = Credential::derive(secret, self.hash_rounds);

        let mut accounts = self.write();
        if accounts.by_key.contains_key(identity_key) {
            return Err(ShioriError::DuplicateIdentity);
        }

        let indexed = accounts
            .by_display_name
            .entry(display_name.to_string())
            .or_insert_with(|| identity_key.to_string());
        if indexed.as_str() != identity_key {
            tracing::warn!(
                display_name,
                "display name already in use; lookups by name resolve to the earlier account"
            );
        }

        accounts.by_key.insert(
            identity_key.to_string(),
            Account::new(
                identity_key.to_string(),
                display_name.to_string(),
                credential,
            ),
        );
        tracing::info!(total = accounts.by_key.len(), "account registered");
        Ok(())
    }

    /// Return the account if `secret` matches its stored credential.
    pub fn verify(&self, identity_key: &str, secret: &str) -> Result<Account, ShioriError> {
        let account = self.read().by_key.get(identity_key).cloned();
        match account {
            Some(account) if account.credential.matches(secret) => Ok(account),
            Some(_) => Err(ShioriError::InvalidCredentials),
            None => {
                let _ = self.decoy.matches(secret);
                Err(ShioriError::InvalidCredentials)
            }
        }
    }

    /// Insert or overwrite the label for `item_id`.
    pub fn set_status(
        &self,
        identity_key: &str,
        item_id: u64,
        label: &str,
    ) -> Result<StatusLabel, ShioriError> {
        let mut accounts = self.write();
        let account = accounts
            .by_key
            .get_mut(identity_key)
            .ok_or(ShioriError::UnknownAccount)?;
        let label: StatusLabel = label.parse()?;
        let previous = account.statuses.set(item_id, label);
        tracing::debug!(item_id, %label, ?previous, "status set");
        Ok(label)
    }

    /// The label for `item_id`, or `None` when unset.
    pub fn get_status(
        &self,
        identity_key: &str,
        item_id: u64,
    ) -> Result<Option<StatusLabel>, ShioriError> {
        self.read()
            .by_key
            .get(identity_key)
            .map(|account| account.statuses.get(item_id))
            .ok_or(ShioriError::UnknownAccount)
    }

    /// Snapshot of the whole status map, in insertion order.
    pub fn list_statuses(&self, identity_key: &str) -> Result<Vec<StatusEntry>, ShioriError> {
        self.read()
            .by_key
            .get(identity_key)
            .map(|account| account.statuses.entries().to_vec())
            .ok_or(ShioriError::UnknownAccount)
    }

    /// Resolve a display name through the secondary index.
    ///
    /// Display names are not unique; the earliest registration wins.
    pub fn identity_for_display_name(&self, display_name: &str) -> Option<String> {
        self.read().by_display_name.get(display_name).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().by_key.is_empty()
    }
}
