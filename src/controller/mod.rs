//! Per-user screen state: ingredient entry, generation, results and detail.
//!
//! # Architecture
//!
//! - [`Controller`]: synchronous state machine over [`View`]
//! - [`GenerationTicket`]: identifies one generation attempt so late results
//!   from an abandoned attempt can be recognised and dropped
//! - [`ControllerSnapshot`]: serializable copy of everything a view renders
//!
//! ```text
//! Input --begin_generation--> Loading --finish_generation(ok)--> Results --select--> Detail
//!   ^                            |  \--finish_generation(err)--> Input      ^          |
//!   |                            +--back--> Input                           +--back----+
//!   +-------------------------------------back-------------------- Results
//! ```
//!
//! The controller never awaits. Generation itself runs elsewhere and reports
//! back through [`Controller::finish_generation`].

mod state;

pub use state::{
    Controller, ControllerSnapshot, DEFAULT_PORTIONS, GENERATION_FAILED_MESSAGE, GenerationTicket,
    SUGGESTED_INGREDIENTS, View,
};

use crate::domain::ValidationError;

/// Operations the controller refuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Recipes are already being generated")]
    AlreadyLoading,

    /// Ingredient, preference and portion edits are only accepted on the input view.
    #[error("Input cannot be changed while on the {0} view")]
    NotEditable(View),

    #[error("Cannot {action} from the {view} view")]
    InvalidTransition { action: &'static str, view: View },

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),
}
