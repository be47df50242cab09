//! Per-user watch list operations.
//!
//! Every operation first resolves the caller through the session manager;
//! anonymous callers get [`ShioriError::NotAuthenticated`].

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use shiori_api::CatalogGateway;

use crate::accounts::AccountStore;
use crate::error::ShioriError;
use crate::models::{StatusEntry, StatusLabel};
use crate::session::{SessionIdentity, SessionManager, SessionToken};

/// A labelled item enriched with catalog display data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedItem {
    pub item_id: u64,
    pub title: String,
    pub image_url: Option<String>,
    pub label: StatusLabel,
}

/// An item left out of an enumeration because the catalog lookup failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedItem {
    pub item_id: u64,
    pub label: StatusLabel,
    pub reason: String,
}

/// Outcome of [`ListService::enumerate`].
///
/// Lookup failures never fail the whole call: the affected items are moved
/// to `skipped` and `entries` keeps the remaining ones in list order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListReport {
    pub entries: Vec<ListedItem>,
    pub skipped: Vec<SkippedItem>,
}

pub struct ListService<G> {
    accounts: Arc<AccountStore>,
    sessions: Arc<SessionManager>,
    catalog: Arc<G>,
    lookup_concurrency: usize,
}

impl<G> Clone for ListService<G> {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
            sessions: Arc::clone(&self.sessions),
            catalog: Arc::clone(&self.catalog),
            lookup_concurrency: self.lookup_concurrency,
        }
    }
}

impl<G: CatalogGateway> ListService<G> {
    pub fn new(accounts: Arc<AccountStore>, sessions: Arc<SessionManager>, catalog: Arc<G>) -> Self {
        Self {
            accounts,
            sessions,
            catalog,
            lookup_concurrency: 1,
        }
    }

    /// Allow up to `limit` catalog lookups in flight during enumeration.
    pub fn with_lookup_concurrency(mut self, limit: usize) -> Self {
        self.lookup_concurrency = limit.max(1);
        self
    }

    fn require_identity(&self, token: Option<&SessionToken>) -> Result<SessionIdentity, ShioriError> {
        token
            .and_then(|t| self.sessions.current_identity(t).authenticated())
            .ok_or(ShioriError::NotAuthenticated)
    }

    /// Attach or replace the caller's label for `item_id`.
    pub fn add_or_update(
        &self,
        token: Option<&SessionToken>,
        item_id: u64,
        label: &str,
    ) -> Result<StatusLabel, ShioriError> {
        let identity = self.require_identity(token)?;
        let label: StatusLabel = label.parse()?;
        self.accounts
            .set_status(&identity.identity_key, item_id, label.as_db_str())
    }

    /// The caller's label for `item_id`; `None` when anonymous or unset.
    pub fn status_for(
        &self,
        token: Option<&SessionToken>,
        item_id: u64,
    ) -> Result<Option<StatusLabel>, ShioriError> {
        match self.require_identity(token) {
            Ok(identity) => self.accounts.get_status(&identity.identity_key, item_id),
            Err(_) => Ok(None),
        }
    }

    /// The caller's labelled items with catalog titles and images.
    pub async fn enumerate(&self, token: Option<&SessionToken>) -> Result<ListReport, ShioriError> {
        let identity = self.require_identity(token)?;
        let statuses = self.accounts.list_statuses(&identity.identity_key)?;

        let lookups: Vec<_> = stream::iter(statuses)
            .map(|entry| {
                let catalog = Arc::clone(&self.catalog);
                async move { (entry, catalog.fetch_item(entry.item_id).await) }
            })
            .buffered(self.lookup_concurrency)
            .collect()
            .await;

        let mut report = ListReport::default();
        for (StatusEntry { item_id, label }, lookup) in lookups {
            match lookup {
                Ok(detail) => report.entries.push(ListedItem {
                    item_id,
                    title: detail.title,
                    image_url: detail.image_url,
                    label,
                }),
                Err(e) => {
                    tracing::warn!(item_id, error = %e, "catalog lookup failed; skipping list entry");
                    report.skipped.push(SkippedItem {
                        item_id,
                        label,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeCatalog;

    struct Fixture {
        accounts: Arc<AccountStore>,
        sessions: Arc<SessionManager>,
        catalog: Arc<FakeCatalog>,
        service: ListService<FakeCatalog>,
        token: SessionToken,
    }

    fn fixture(catalog: FakeCatalog) -> Fixture {
        let accounts = Arc::new(AccountStore::with_hash_rounds(1_000));
        let sessions = Arc::new(SessionManager::default());
        accounts.register("a@x.com", "Alice", "secret1").unwrap();
        let account = accounts.verify("a@x.com", "secret1").unwrap();
        let token = sessions.login(&account);
        let catalog = Arc::new(catalog);
        let service = ListService::new(
            Arc::clone(&accounts),
            Arc::clone(&sessions),
            Arc::clone(&catalog),
        );
        Fixture {
            accounts,
            sessions,
            catalog,
            service,
            token,
        }
    }

    #[test]
    fn test_add_requires_authentication() {
        let f = fixture(FakeCatalog::default());
        assert!(matches!(
            f.service.add_or_update(None, 1, "Watching"),
            Err(ShioriError::NotAuthenticated)
        ));
        let stranger = SessionToken::generate();
        assert!(matches!(
            f.service.add_or_update(Some(&stranger), 1, "Watching"),
            Err(ShioriError::NotAuthenticated)
        ));
        // Authentication is checked before the label.
        assert!(matches!(
            f.service.add_or_update(None, 1, "bogus"),
            Err(ShioriError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_add_rejects_invalid_label() {
        let f = fixture(FakeCatalog::default());
        assert!(matches!(
            f.service.add_or_update(Some(&f.token), 1, "Rewatching"),
            Err(ShioriError::InvalidLabel(_))
        ));
        assert!(f.accounts.list_statuses("a@x.com").unwrap().is_empty());
    }

    #[test]
    fn test_add_then_update() {
        let f = fixture(FakeCatalog::default());
        let stored = f
            .service
            .add_or_update(Some(&f.token), 5, "Plan to Watch")
            .unwrap();
        assert_eq!(stored, StatusLabel::PlanToWatch);
        f.service
            .add_or_update(Some(&f.token), 5, "Completed")
            .unwrap();

        assert_eq!(
            f.service.status_for(Some(&f.token), 5).unwrap(),
            Some(StatusLabel::Completed)
        );
        assert_eq!(f.accounts.list_statuses("a@x.com").unwrap().len(), 1);
    }

    #[test]
    fn test_status_for_anonymous_is_none() {
        let f = fixture(FakeCatalog::default());
        f.service.add_or_update(Some(&f.token), 5, "Watching").unwrap();
        assert_eq!(f.service.status_for(None, 5).unwrap(), None);
    }

    #[tokio::test]
    async fn test_enumerate_requires_authentication() {
        let f = fixture(FakeCatalog::default());
        assert!(matches!(
            f.service.enumerate(None).await,
            Err(ShioriError::NotAuthenticated)
        ));

        f.sessions.logout(&f.token);
        assert!(matches!(
            f.service.enumerate(Some(&f.token)).await,
            Err(ShioriError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_enumerate_single_entry() {
        let f = fixture(FakeCatalog::with_items(&[42]));
        f.service
            .add_or_update(Some(&f.token), 42, "Watching")
            .unwrap();

        let report = f.service.enumerate(Some(&f.token)).await.unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].item_id, 42);
        assert_eq!(report.entries[0].title, "Anime 42");
        assert_eq!(report.entries[0].label, StatusLabel::Watching);
        assert!(report.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_enumerate_drops_failed_lookups() {
        let f = fixture(FakeCatalog::with_items(&[1, 2, 3]).fail_on(2));
        for (id, label) in [(1, "Watching"), (2, "Dropped"), (3, "Completed")] {
            f.service.add_or_update(Some(&f.token), id, label).unwrap();
        }

        let report = f.service.enumerate(Some(&f.token)).await.unwrap();
        let ids: Vec<_> = report.entries.iter().map(|e| e.item_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].item_id, 2);
        assert_eq!(report.skipped[0].label, StatusLabel::Dropped);

        // One lookup per item, in list order; no retries.
        assert_eq!(*f.catalog.item_calls.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_enumerate_drops_missing_items() {
        let f = fixture(FakeCatalog::with_items(&[10]));
        f.service.add_or_update(Some(&f.token), 99, "Watching").unwrap();
        f.service.add_or_update(Some(&f.token), 10, "Watching").unwrap();

        let report = f.service.enumerate(Some(&f.token)).await.unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].item_id, 10);
        assert_eq!(report.skipped[0].item_id, 99);
        assert!(report.skipped[0].reason.contains("not found"));
    }

    #[tokio::test]
    async fn test_enumerate_keeps_insertion_order_with_concurrency() {
        let ids = [30, 10, 20, 50, 40];
        let f = fixture(FakeCatalog::with_items(&ids));
        let service = f.service.clone().with_lookup_concurrency(4);
        for id in ids {
            service.add_or_update(Some(&f.token), id, "Watching").unwrap();
        }
        // Re-labelling keeps the original position.
        service.add_or_update(Some(&f.token), 10, "Completed").unwrap();

        let report = service.enumerate(Some(&f.token)).await.unwrap();
        let got: Vec<_> = report.entries.iter().map(|e| e.item_id).collect();
        assert_eq!(got, ids.to_vec());
        assert_eq!(report.entries[1].label, StatusLabel::Completed);
    }
}
