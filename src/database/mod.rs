pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{ProjectStore, Store, StoreError, TaskStore};

/// Picks the backend from configuration: PostgreSQL when a database URL is
/// configured, the in-memory store otherwise.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn Store>, StoreError> {
    match config.database.url.as_deref() {
        Some(url) => {
            let store = PgStore::connect(url, &config.database).await?;
            store.init().await?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory store (data is lost on restart)");
            let store = MemoryStore::new();
            info!("Store backend: {}", store.backend_name());
            Ok(Arc::new(store))
        }
    }
}
