//! # Application Context
//!
//! Owns everything a running storefront needs: config, catalog and the two
//! stores. The view layer holds one `AppContext` and passes `&mut` access
//! to whatever dispatches actions, so there is a single writer per store.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       AppContext::bootstrap                             │
//! │                                                                         │
//! │  1. Build AuthPersistence ──── storage + "<app_name>-auth"             │
//! │                                                                         │
//! │  2. Restore AuthStore ──────── stored snapshot or Anonymous            │
//! │                                                                         │
//! │  3. Attach save hook ───────── every session change is written back    │
//! │                                                                         │
//! │  4. Empty CartStore ────────── the cart is never persisted             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::{Catalog, CoreResult, Product};
use tracing::info;

use crate::auth::AuthStore;
use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::error::StateResult;
use crate::persist::AuthPersistence;
use crate::storage::{FileStorage, MemoryStorage, SnapshotStorage};

/// Config, catalog and stores for one storefront session.
#[derive(Debug)]
pub struct AppContext {
    pub config: StorefrontConfig,
    pub catalog: Catalog,
    pub cart: CartStore,
    pub auth: AuthStore,
}

impl AppContext {
    /// Restores the auth store from `storage` and wires up persistence.
    pub fn bootstrap<S>(config: StorefrontConfig, storage: S) -> Self
    where
        S: SnapshotStorage + Clone + 'static,
    {
        let persistence = AuthPersistence::new(storage, config.auth_key());
        let mut auth = persistence.restore();
        persistence.attach(&mut auth);

        info!(
            app = %config.app_name,
            session = ?auth.session(),
            "storefront context ready"
        );

        AppContext {
            config,
            catalog: Catalog::demo(),
            cart: CartStore::new(),
            auth,
        }
    }

    /// Bootstraps with file storage under the configured snapshot directory.
    pub fn open(config: StorefrontConfig) -> StateResult<Self> {
        let dir = config.snapshot_dir()?;
        info!(?dir, "using snapshot directory");
        Ok(Self::bootstrap(config, FileStorage::new(dir)))
    }

    /// Default config with throwaway in-memory storage.
    pub fn in_memory() -> Self {
        Self::bootstrap(StorefrontConfig::default(), MemoryStorage::new())
    }

    /// Replaces the demo catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Looks up `product_id` in the catalog and adds it to the cart.
    pub fn add_to_cart_by_id(&mut self, product_id: &str) -> CoreResult<()> {
        let product = self.catalog.get(product_id)?;
        self.cart.add_item(product);
        Ok(())
    }

    /// The home page "Top Deals" section.
    pub fn top_deals(&self) -> Vec<&Product> {
        self.catalog.top_deals(self.config.top_deals_count)
    }

    /// The home page "Trending" section.
    pub fn trending(&self) -> Vec<&Product> {
        self.catalog.trending(self.config.trending_count)
    }
}
