//! # State Error Types
//!
//! Errors for snapshot storage and configuration loading.
//!
//! ## Where These Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io / serde_json / toml                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StateError (this module)                                              │
//! │       │                                                                 │
//! │       ├── SnapshotStorage / StorefrontConfig::load → returned to caller│
//! │       │                                                                 │
//! │       └── inside a store listener → logged with warn!, never returned  │
//! │                                                                         │
//! │  CartStore / AuthStore operations themselves cannot fail.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for state-layer operations.
pub type StateResult<T> = Result<T, StateError>;

/// Storage and configuration failures.
#[derive(Debug, Error)]
pub enum StateError {
    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Reading or writing a snapshot file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot could not be encoded or decoded.
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage key that cannot be used as a file name.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// No platform data directory and no explicit override.
    #[error("Could not determine a data directory; set STOREFRONT_DATA_DIR")]
    NoDataDir,

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config file exists but could not be read.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config file is not valid TOML for [`crate::StorefrontConfig`].
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config parsed but holds unusable values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
