//! Shared setup for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::Value;

use pantry_chef::AppState;
use pantry_chef::config::{
    AppConfig, FavoritesConfig, GenerationConfig, ResilienceConfig, ServerConfig, SessionConfig,
};
use pantry_chef::domain::{Recipe, RecipeRequest};
use pantry_chef::favorites::{FavoritesStore, MemoryStorage};
use pantry_chef::generation::{GenerationError, RecipeGenerator, SeededRandom, TemplateGenerator};
use pantry_chef::server::build_router;
use pantry_chef::session::SessionStore;

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
            static_dir: "static".to_string(),
        },
        generation: GenerationConfig {
            provider: "template".to_string(),
            simulated_delay_ms: 0,
            max_recipes: 5,
            seed: Some(7),
            base_url: None,
            api_key: None,
            timeout_secs: 5,
        },
        favorites: FavoritesConfig {
            path: "unused.json".to_string(),
        },
        sessions: SessionConfig {
            idle_timeout_secs: 1800,
            cleanup_interval_secs: 300,
        },
        resilience: ResilienceConfig {
            timeout_disabled: false,
            request_timeout_secs: 30,
        },
    }
}

/// Template generator with no delay and a fixed seed.
pub fn instant_generator() -> Arc<dyn RecipeGenerator> {
    Arc::new(TemplateGenerator::with_random(
        Duration::ZERO,
        Box::new(SeededRandom::from_seed(7)),
    ))
}

/// Template generator that stays busy for a minute.
pub fn slow_generator() -> Arc<dyn RecipeGenerator> {
    Arc::new(TemplateGenerator::with_random(
        Duration::from_secs(60),
        Box::new(SeededRandom::from_seed(7)),
    ))
}

#[derive(Debug)]
pub struct FailingGenerator;

#[async_trait]
impl RecipeGenerator for FailingGenerator {
    async fn generate(&self, _request: &RecipeRequest) -> Result<Vec<Recipe>, GenerationError> {
        Err(GenerationError::Http("connection refused".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }
}

pub struct Harness {
    pub server: TestServer,
    pub storage: Arc<MemoryStorage>,
}

pub async fn harness(generator: Arc<dyn RecipeGenerator>) -> Harness {
    harness_with_storage(generator, MemoryStorage::new()).await
}

pub async fn harness_with_storage(
    generator: Arc<dyn RecipeGenerator>,
    storage: MemoryStorage,
) -> Harness {
    let storage = Arc::new(storage);
    let favorites = FavoritesStore::hydrate(storage.clone()).await;

    let state = AppState {
        generator,
        favorites,
        sessions: SessionStore::new(),
        config: Arc::new(test_config()),
    };

    Harness {
        server: TestServer::new(build_router(state)).unwrap(),
        storage,
    }
}

/// Poll a session until it leaves the loading view.
pub async fn wait_until_loaded(server: &TestServer, session_id: &str) -> Value {
    for _ in 0..200 {
        let state: Value = server
            .get(&format!("/api/sessions/{session_id}"))
            .await
            .json();
        if state["view"] != "loading" {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("session {session_id} never finished loading");
}
