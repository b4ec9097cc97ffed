use crate::errors::AppError;
use crate::ledger::LedgerStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<LedgerStore>>,
}

impl AppState {
    pub fn new(store: LedgerStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` against the store on the blocking pool. Mutations flush to
    /// disk, which must not stall the async workers.
    pub async fn with_store_blocking<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut LedgerStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut store = Arc::clone(&self.store).lock_owned().await;
        tokio::task::spawn_blocking(move || f(&mut store))
            .await
            .map_err(AppError::internal)
    }
}
