//! # storefront-state: Client State Containers
//!
//! The cart and auth stores the storefront's view layer reads and
//! dispatches to, plus the side-effecting pieces around them: the
//! persisted session snapshot and config loading.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   view action ──► AppContext ──► CartStore / AuthStore (&mut self)     │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                                  Listeners::notify(&state)              │
//! │                                   │                 │                   │
//! │                        re-render ◄┘                 └► AuthPersistence  │
//! │                                                          │              │
//! │                                                          ▼              │
//! │                                               SnapshotStorage::write    │
//! │                                               ("<app_name>-auth")       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart items, drawer flag and derived totals
//! - [`auth`] - Signed-in user and login modal flag
//! - [`listeners`] - Subscription registry shared by both stores
//! - [`storage`] - Key-value snapshot storage (file and memory)
//! - [`persist`] - Load-on-init / save-on-mutation for the auth store
//! - [`config`] - `storefront.toml` + environment configuration
//! - [`context`] - Owns config, catalog and stores
//! - [`error`] - Storage and config errors
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_state::AppContext;
//!
//! let mut ctx = AppContext::in_memory();
//! ctx.add_to_cart_by_id("1").unwrap();
//! ctx.add_to_cart_by_id("1").unwrap();
//! assert_eq!(ctx.cart.total_items(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod cart;
pub mod config;
pub mod context;
pub mod error;
pub mod listeners;
pub mod persist;
pub mod storage;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{AuthState, AuthStore, Session};
pub use cart::{Cart, CartItem, CartStore, CartTotals};
pub use config::{DigitGrouping, StorefrontConfig};
pub use context::AppContext;
pub use error::{StateError, StateResult};
pub use listeners::{Listeners, SubscriptionId};
pub use persist::{AuthPersistence, AuthSnapshot};
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage};
