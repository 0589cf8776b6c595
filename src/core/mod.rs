//! Core module - configuration and the catalog store

pub mod config;
pub mod store;

pub use config::Config;
pub use store::{CatalogStore, PartFilter, StoreError};
