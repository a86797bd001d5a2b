//! # uniflow-memory
//!
//! Persistent storage for UniFlow (SQLite-backed).

pub mod store;

pub use store::Store;
