//! # uniflow-core
//!
//! Core types, traits, configuration, and error handling for UniFlow.

pub mod config;
pub mod error;
pub mod message;
pub mod models;
pub mod service;
pub mod traits;

pub use config::shellexpand;
