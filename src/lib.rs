//! SQLite-backed inventory and loan tracking for a small library.
//!
//! # Intention
//!
//! - Track book records and active loans in a two-table SQLite store.
//! - Expose catalog (add/list/search) and loan (borrow/return) operations
//!   as methods on one store handle.
//! - Keep the interactive menu a thin dispatcher over those operations.
//!
//! # Architectural Boundaries
//!
//! - All SQL lives in `schema`, `store`, `catalog`, `loans` and `seed`.
//! - `menu` does I/O and message rendering only; it never touches the
//!   connection directly.
//! - Single-threaded and synchronous throughout: one store handle, one
//!   operation at a time.

pub mod catalog;
pub mod error;
pub mod loans;
pub mod menu;
pub mod schema;
pub mod seed;
pub mod store;

pub use catalog::Book;
pub use error::{LibraryError, Result};
pub use loans::{ActiveLoan, Loan};
pub use store::{LibraryStore, StoreConfig};
