use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;

use crate::config::Config;
use crate::id_generator::IdGenerator;
use crate::resolver::PageResolver;
use crate::store::PageStore;

/// Shared application state: one store opened at startup and handed
/// explicitly to everything that needs it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub resolver: Arc<PageResolver>,
    pub ids: IdGenerator,
    pub config: Config,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let options =
            SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let store = Arc::new(PageStore::new(pool));
        store.init().await?;

        let resolver = Arc::new(PageResolver::new(store.clone()));

        Ok(Self {
            store,
            resolver,
            ids: IdGenerator::new(),
            config,
        })
    }
}
