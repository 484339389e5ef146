//! Session management.
//!
//! Each browser (or API client) gets its own [`Session`] holding a
//! [`Controller`](crate::controller::Controller). Sessions are identified by
//! UUID and expire after a period of inactivity.
//!
//! # Architecture
//!
//! - [`Session`]: one visitor's controller plus activity timestamps
//! - [`SessionStore`]: thread-safe store for all active sessions
//!
//! # Example
//!
//! ```rust
//! use pantry_chef::session::SessionStore;
//!
//! let store = SessionStore::new();
//! let session = store.create();
//! session.with_controller(|c| c.add_ingredient("Eggs")).unwrap();
//!
//! assert_eq!(session.snapshot().ingredients, vec!["Eggs"]);
//! ```

mod store;

pub use store::{Session, SessionState, SessionStore};
