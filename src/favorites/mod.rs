//! Favorited recipes and their persistence.
//!
//! # Architecture
//!
//! - [`FavoritesStore`]: the collection, hydrated once at startup and
//!   re-serialized to storage on every mutation
//! - [`FavoritesStorage`]: the persistence interface injected into the store
//! - [`JsonFileStorage`] / [`MemoryStorage`]: file-backed and in-process slots
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pantry_chef::favorites::{FavoritesStore, MemoryStorage};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = FavoritesStore::hydrate(Arc::new(MemoryStorage::new())).await;
//! assert!(!store.is_favorite("recipe-1").await);
//! # });
//! ```

mod storage;
mod store;

pub use storage::{FAVORITES_KEY, FavoritesStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::FavoritesStore;
