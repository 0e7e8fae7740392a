//! # TableStore
//!
//! A concurrent, schema-less, in-memory multi-table record store:
//! - Named tables, created explicitly and idempotently
//! - Records as free-form field → value maps, keyed by string id
//! - Upsert `insert`, strict `update`, `retrieve` and `delete`
//! - One reader/writer guard shared by every table
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Callers (any number of threads)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  operations / Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Store                                │
//! │        RwLock<HashMap<name, Table>>  (shared reads,          │
//! │                                       exclusive writes)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Table     │   ...    │   Table     │
//!   │ id → Record │          │ id → Record │
//!   └──────┬──────┘          └─────────────┘
//!          ▼
//!   ┌─────────────┐
//!   │   Record    │
//!   │field → Value│
//!   └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use tablestore::{Record, Store, StoreError};
//!
//! let store = Store::new();
//! store.create_table("users");
//!
//! let alice = Record::new().with("name", "Alice").with("age", 30);
//! store.insert("users", "1", alice.clone()).unwrap();
//! assert_eq!(store.retrieve("users", "1").unwrap(), alice);
//!
//! let err = store.retrieve("orders", "1").unwrap_err();
//! assert!(matches!(err, StoreError::TableNotFound { .. }));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod value;
pub mod record;
pub mod table;
pub mod command;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ParseError, Result, StoreError};
pub use config::Config;
pub use value::Value;
pub use record::Record;
pub use table::Table;
pub use command::{Command, Outcome};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of TableStore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
