//! Server-rendered HTML.
//!
//! Pages are plain strings built with `format!`; every interaction is a form
//! post followed by a redirect, so nothing here needs JavaScript.
//!
//! # Structure
//!
//! - [`layout`]: document shell
//! - [`components`]: buttons, badges, escaping helpers
//! - [`recipe`]: recipe card and detail fragments
//! - [`views`]: one page per controller view, plus favorites

pub mod components;
pub mod layout;
pub mod recipe;
pub mod views;

pub use views::{favorite_detail_page, favorites_page, not_found_page, session_page};
