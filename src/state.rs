use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CatalogService, FavoriteService, MessageService, ProfileService,
    SeaOrmAuthService, SeaOrmCatalogService, SeaOrmFavoriteService, SeaOrmMessageService,
    SeaOrmProfileService,
};

/// Process-wide state: configuration, the connection pool and the services
/// built on top of it.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,
    pub store: Store,
    pub auth_service: Arc<dyn AuthService>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub favorite_service: Arc<dyn FavoriteService>,
    pub message_service: Arc<dyn MessageService>,
    pub profile_service: Arc<dyn ProfileService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;
        let catalog_service =
            Arc::new(SeaOrmCatalogService::new(store.clone())) as Arc<dyn CatalogService>;
        let favorite_service =
            Arc::new(SeaOrmFavoriteService::new(store.clone())) as Arc<dyn FavoriteService>;
        let message_service =
            Arc::new(SeaOrmMessageService::new(store.clone())) as Arc<dyn MessageService>;
        let profile_service =
            Arc::new(SeaOrmProfileService::new(store.clone())) as Arc<dyn ProfileService>;

        Self {
            config: Arc::new(config),
            store,
            auth_service,
            catalog_service,
            favorite_service,
            message_service,
            profile_service,
        }
    }
}
