//! Recipe generation behind a swappable interface.
//!
//! The [`RecipeGenerator`] trait is the only thing the controller and the
//! HTTP layer know about. Two implementations ship:
//!
//! - [`TemplateGenerator`]: synthesizes recipes locally from five fixed
//!   templates with randomized quantities and nutrition, after a simulated
//!   delay.
//! - [`RemoteGenerator`]: posts the request to another instance's
//!   `/api/recipes/generate` endpoint (or any backend speaking the same
//!   contract).
//!
//! # Usage
//!
//! ```rust,ignore
//! use pantry_chef::generation::GeneratorFactory;
//!
//! let generator = GeneratorFactory::create(&config.generation)?;
//! let recipes = generator.generate(&request).await?;
//! ```

mod factory;
mod random;
mod remote;
mod template;

pub use factory::GeneratorFactory;
pub use random::{RandomSource, SeededRandom};
pub use remote::RemoteGenerator;
pub use template::{MAX_RECIPES_PER_REQUEST, TemplateGenerator};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Recipe, RecipeRequest};

/// Errors a generator can report.
///
/// The template generator never fails; these come from remote backends or
/// from misconfiguration.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The generator is missing required settings.
    #[error("Generator not configured: {0}")]
    NotConfigured(String),

    /// The request never reached the backend or the connection failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// The backend answered with something that is not a recipe list.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Response body of the generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub recipes: Vec<Recipe>,
}

/// Something that turns a [`RecipeRequest`] into recipes.
#[async_trait]
pub trait RecipeGenerator: Send + Sync + std::fmt::Debug {
    /// Produce at most `min(request.max_recipes, 5)` recipes.
    async fn generate(&self, request: &RecipeRequest) -> Result<Vec<Recipe>, GenerationError>;

    /// Get the provider name for logging and debugging.
    fn provider_name(&self) -> &'static str;
}
