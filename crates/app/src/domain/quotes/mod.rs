//! Quotes

pub mod data;
pub mod errors;
mod items;
pub mod models;
mod repository;
pub mod service;

pub use errors::{PersistenceError, StorageError};
pub use service::*;
