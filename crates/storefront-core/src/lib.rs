//! # storefront-core: Pure Domain Logic for the Storefront
//!
//! This crate holds the storefront's domain types and pure functions:
//! money arithmetic, the static product catalog and its queries, and the
//! login/signup form rules. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     View Layer (external)                       │   │
//! │  │   Navbar ──► Product Cards ──► Cart Drawer ──► Login Modal      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ subscribe / dispatch                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              storefront-state (CartStore, AuthStore)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  queries  │  │   forms   │  │   │
//! │  │   │   User    │  │           │  │  presets  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO PERSISTENCE • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, User)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Static catalog and browse queries
//! - [`validation`] - Login and signup form rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::catalog::Catalog;
//!
//! let catalog = Catalog::demo();
//! let deals = catalog.top_deals(4);
//! assert_eq!(deals.len(), 4);
//! assert!(deals[0].discount >= deals[1].discount);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, PriceRange, ProductQuery, SortOrder};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
pub use validation::{LoginForm, SignupForm};
