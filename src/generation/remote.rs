//! Recipe generation over HTTP.
//!
//! Speaks the same contract as `POST /api/recipes/generate`: the body is a
//! [`RecipeRequest`], the answer is a [`GenerateResponse`].

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::template::MAX_RECIPES_PER_REQUEST;
use super::{GenerateResponse, GenerationError, RecipeGenerator};
use crate::domain::{Recipe, RecipeRequest};

/// Generator backed by a remote recipe service.
#[derive(Debug)]
pub struct RemoteGenerator {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl RemoteGenerator {
    /// Path of the generation endpoint relative to the base URL.
    const GENERATE_PATH: &'static str = "api/recipes/generate";

    /// Create a generator for the backend at `base_url`.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let endpoint = Self::endpoint_for(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::NotConfigured(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// The full URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn endpoint_for(base_url: &str) -> Result<Url, GenerationError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(GenerationError::NotConfigured(
                "Remote generator requires a base URL".to_string(),
            ));
        }

        // Url::join drops the last path segment unless it ends with '/'.
        let base = format!("{}/", trimmed.trim_end_matches('/'));
        Url::parse(&base)
            .and_then(|u| u.join(Self::GENERATE_PATH))
            .map_err(|e| GenerationError::NotConfigured(format!("Invalid base URL: {e}")))
    }
}

#[async_trait]
impl RecipeGenerator for RemoteGenerator {
    async fn generate(&self, request: &RecipeRequest) -> Result<Vec<Recipe>, GenerationError> {
        let mut builder = self.client.post(self.endpoint.clone()).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                name: "generation.remote.rejected",
                status = status.as_u16(),
                "Remote generator returned an error"
            );
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let mut recipes = body.recipes;
        recipes.truncate(request.max_recipes.min(MAX_RECIPES_PER_REQUEST));
        Ok(recipes)
    }

    fn provider_name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_path() {
        let timeout = Duration::from_secs(5);

        let plain = RemoteGenerator::new("http://localhost:3000", None, timeout).unwrap();
        assert_eq!(
            plain.endpoint().as_str(),
            "http://localhost:3000/api/recipes/generate"
        );

        let nested = RemoteGenerator::new("https://chef.example.com/v2/", None, timeout).unwrap();
        assert_eq!(
            nested.endpoint().as_str(),
            "https://chef.example.com/v2/api/recipes/generate"
        );
    }

    #[test]
    fn test_rejects_missing_or_invalid_base_url() {
        let timeout = Duration::from_secs(5);
        assert!(matches!(
            RemoteGenerator::new("  ", None, timeout),
            Err(GenerationError::NotConfigured(_))
        ));
        assert!(matches!(
            RemoteGenerator::new("not a url", None, timeout),
            Err(GenerationError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let generator = RemoteGenerator::new(
            "http://localhost:3000",
            Some(" ".to_string()),
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(generator.api_key.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let generator =
            RemoteGenerator::new("http://127.0.0.1:9", None, Duration::from_secs(2)).unwrap();
        let request = RecipeRequest {
            ingredients_available: vec!["Rice".to_string()],
            dietary_constraints: crate::domain::DietaryPreferences::default(),
            portion_size: 2,
            max_recipes: 5,
            allow_substitutions: true,
            skill_level: crate::domain::SkillLevel::Beginner,
        };

        let result = generator.generate(&request).await;
        assert!(matches!(result, Err(GenerationError::Http(_))));
    }
}
