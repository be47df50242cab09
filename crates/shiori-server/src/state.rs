use std::sync::Arc;

use shiori_api::CatalogGateway;
use shiori_core::accounts::AccountStore;
use shiori_core::config::AppConfig;
use shiori_core::list::ListService;
use shiori_core::session::SessionManager;

/// Shared handles for all handlers. Owned by `main`; one per process.
pub struct AppState<G> {
    pub accounts: Arc<AccountStore>,
    pub sessions: Arc<SessionManager>,
    pub catalog: Arc<G>,
    pub lists: ListService<G>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
            sessions: Arc::clone(&self.sessions),
            catalog: Arc::clone(&self.catalog),
            lists: self.lists.clone(),
        }
    }
}

impl<G: CatalogGateway> AppState<G> {
    /// Fresh, empty stores around `catalog`.
    pub fn new(catalog: G, config: &AppConfig) -> Self {
        let accounts = Arc::new(AccountStore::with_hash_rounds(config.accounts.hash_rounds));
        let sessions = Arc::new(SessionManager::with_idle_minutes(
            config.session.idle_timeout_minutes,
        ));
        let catalog = Arc::new(catalog);
        let lists = ListService::new(
            Arc::clone(&accounts),
            Arc::clone(&sessions),
            Arc::clone(&catalog),
        )
        .with_lookup_concurrency(config.catalog.lookup_concurrency);

        Self {
            accounts,
            sessions,
            catalog,
            lists,
        }
    }
}
