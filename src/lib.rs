//! Pantry Chef
//!
//! Suggests recipes from the ingredients a user already has, respecting
//! dietary preferences and portion count, and keeps a persistent list of
//! favorites. HTML-first: every page is server-rendered and works without
//! JavaScript. A JSON API mirrors every interaction.
//!
//! # Modules
//!
//! - [`domain`]: recipe and request data model
//! - [`generation`]: recipe generators (local templates or a remote backend)
//! - [`favorites`]: favorites collection and its storage
//! - [`controller`]: per-user state machine (input, loading, results, detail)
//! - [`session`]: per-visitor controllers and expiry
//! - [`ui`]: server-rendered pages
//! - [`server`]: Axum router, handlers and startup

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::assigning_clones)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::unused_async)]

pub mod config;
pub mod controller;
pub mod domain;
pub mod favorites;
pub mod generation;
pub mod server;
pub mod session;
pub mod ui;

use std::sync::Arc;

use crate::config::AppConfig;
use favorites::FavoritesStore;
use generation::RecipeGenerator;
use session::SessionStore;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Produces recipes for sessions and the stateless endpoint.
    pub generator: Arc<dyn RecipeGenerator>,
    /// Saved recipes, shared by every session.
    pub favorites: FavoritesStore,
    /// Per-visitor controllers.
    pub sessions: SessionStore,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
