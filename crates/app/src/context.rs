//! App Context

use std::sync::Arc;

use crate::{
    api::{ApiClient, transport::ReqwestTransport},
    auth::{facade::AuthFacade, session::SessionStore, tokens::TokenStore},
    config::AppConfig,
    domain::{
        carts::BasketStore,
        catalog::CatalogFacade,
        market::MarketFacade,
        notifications::NotificationsFacade,
        pos::PosFacade,
        tenants::TenantsFacade,
    },
    storage::{FileStore, KeyValueStore},
};

/// Wired application services sharing one storage backend and session.
#[derive(Clone)]
pub struct AppContext {
    /// Shared storage backend.
    pub storage: Arc<dyn KeyValueStore>,

    /// Shared session state.
    pub session: Arc<SessionStore>,

    /// Uniform API client.
    pub api: ApiClient,

    /// Auth flows.
    pub auth: AuthFacade,

    /// Storefront shopping cart.
    pub cart: Arc<BasketStore>,

    /// Catalog browsing.
    pub catalog: CatalogFacade,

    /// Public market browsing.
    pub market: MarketFacade,

    /// Point-of-sale workflow.
    pub pos: Arc<PosFacade>,

    /// Notification reads.
    pub notifications: NotificationsFacade,

    /// Platform tenant administration.
    pub tenants: TenantsFacade,
}

impl AppContext {
    /// Build the context from configuration, opening the state file.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.state_path));

        Self::with_storage(&config.api_base_url, storage)
    }

    /// Build the context over an arbitrary storage backend.
    pub fn with_storage(base_url: &str, storage: Arc<dyn KeyValueStore>) -> Self {
        let session = Arc::new(SessionStore::new(Arc::clone(&storage)));
        let tokens = TokenStore::new(Arc::clone(&storage));
        let api = ApiClient::new(
            base_url,
            Arc::new(ReqwestTransport::new()),
            Arc::clone(&session),
        );

        let catalog = CatalogFacade::new(api.clone());
        let cart = Arc::new(BasketStore::cart(Arc::clone(&storage)));
        let ticket = Arc::new(BasketStore::ticket(Arc::clone(&storage)));

        Self {
            auth: AuthFacade::new(api.clone(), Arc::clone(&session), tokens),
            pos: Arc::new(PosFacade::new(api.clone(), catalog.clone(), ticket)),
            market: MarketFacade::new(api.clone()),
            notifications: NotificationsFacade::new(api.clone()),
            tenants: TenantsFacade::new(api.clone()),
            catalog,
            cart,
            storage,
            session,
            api,
        }
    }
}
