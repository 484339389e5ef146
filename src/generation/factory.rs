//! Factory for creating recipe generators based on configuration.

use std::sync::Arc;
use std::time::Duration;

use super::random::SeededRandom;
use super::remote::RemoteGenerator;
use super::template::TemplateGenerator;
use super::{GenerationError, RecipeGenerator};
use crate::config::GenerationConfig;

/// Factory for creating recipe generators based on configuration.
#[derive(Debug)]
pub struct GeneratorFactory;

impl GeneratorFactory {
    /// Create a generator based on configuration.
    ///
    /// # Provider Selection
    ///
    /// - `"remote"`: [`RemoteGenerator`] against `base_url` (required)
    /// - `"template"` or anything else: [`TemplateGenerator`] with the
    ///   configured simulated delay and optional fixed seed
    pub fn create(config: &GenerationConfig) -> Result<Arc<dyn RecipeGenerator>, GenerationError> {
        match config.provider.as_str() {
            "remote" => {
                let base_url = config.base_url.as_deref().ok_or_else(|| {
                    GenerationError::NotConfigured(
                        "generation.base_url is required for the remote generator".to_string(),
                    )
                })?;
                let generator = RemoteGenerator::new(
                    base_url,
                    config.api_key.clone(),
                    Duration::from_secs(config.timeout_secs),
                )?;
                tracing::info!(
                    endpoint = %generator.endpoint(),
                    "Using remote recipe generator"
                );
                Ok(Arc::new(generator))
            }
            other => {
                if other != "template" {
                    tracing::warn!(
                        provider = %other,
                        "Unknown generator provider, falling back to templates"
                    );
                }
                tracing::info!(
                    delay_ms = config.simulated_delay_ms,
                    seeded = config.seed.is_some(),
                    "Using template recipe generator"
                );
                let generator = match config.seed {
                    Some(seed) => TemplateGenerator::with_random(
                        config.simulated_delay(),
                        Box::new(SeededRandom::from_seed(seed)),
                    ),
                    None => TemplateGenerator::new(config.simulated_delay()),
                };
                Ok(Arc::new(generator))
            }
        }
    }
}
