use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::StatusLabel;
use crate::credential::Credential;

/// A registered account.
///
/// Values handed out by the store are snapshots; mutating one does not
/// touch the stored record.
#[derive(Debug, Clone)]
pub struct Account {
    pub identity_key: String,
    pub display_name: String,
    pub credential: Credential,
    pub statuses: StatusMap,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(identity_key: String, display_name: String, credential: Credential) -> Self {
        Self {
            identity_key,
            display_name,
            credential,
            statuses: StatusMap::default(),
            created_at: Utc::now(),
        }
    }
}

/// One labelled catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub item_id: u64,
    pub label: StatusLabel,
}

/// Per-account item → label mapping, iterated in insertion order.
///
/// Re-labelling an item overwrites it in place and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMap {
    entries: Vec<StatusEntry>,
    /// item id → position in `entries`. Entries are never removed.
    index: HashMap<u64, usize>,
}

impl StatusMap {
    /// Insert or overwrite. Returns the previous label, if any.
    pub fn set(&mut self, item_id: u64, label: StatusLabel) -> Option<StatusLabel> {
        match self.index.get(&item_id).copied() {
            Some(pos) => Some(std::mem::replace(&mut self.entries[pos].label, label)),
            None => {
                self.index.insert(item_id, self.entries.len());
                self.entries.push(StatusEntry { item_id, label });
                None
            }
        }
    }

    pub fn get(&self, item_id: u64) -> Option<StatusLabel> {
        self.index.get(&item_id).map(|&pos| self.entries[pos].label)
    }

    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
