//! `RemoteGenerator` against a local backend speaking the generation contract.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Value, json};

use pantry_chef::domain::{DietaryPreferences, RecipeRequest, SkillLevel};
use pantry_chef::generation::{GenerationError, RecipeGenerator, RemoteGenerator};

type SeenAuth = Arc<Mutex<Option<String>>>;

fn backend_recipe(n: usize) -> Value {
    json!({
        "id": format!("remote-{n}"),
        "title": format!("Remote Dish {n}"),
        "prep_time_minutes": 15,
        "servings": 2,
        "ingredients": [{ "name": "Rice", "quantity": "150g" }],
        "instructions": ["Cook."],
        "nutrition": { "calories_per_serving": 350, "protein_g": 12, "carbs_g": 45, "fat_g": 9 }
    })
}

async fn seven_recipes(State(seen): State<SeenAuth>, headers: HeaderMap) -> impl IntoResponse {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    *seen.lock().unwrap() = auth;

    let recipes: Vec<Value> = (0..7).map(backend_recipe).collect();
    axum::Json(json!({ "recipes": recipes }))
}

async fn unavailable() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, "kitchen closed")
}

async fn garbage() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], r#"{"dishes": "none"}"#)
}

/// Serve the fake backend on an ephemeral port and return its base URL.
async fn spawn_backend(seen: SeenAuth) -> String {
    let app = Router::new()
        .route("/ok/api/recipes/generate", post(seven_recipes))
        .route("/down/api/recipes/generate", post(unavailable))
        .route("/garbage/api/recipes/generate", post(garbage))
        .with_state(seen);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn request(max_recipes: usize) -> RecipeRequest {
    RecipeRequest {
        ingredients_available: vec!["Rice".to_string()],
        dietary_constraints: DietaryPreferences::default(),
        portion_size: 2,
        max_recipes,
        allow_substitutions: true,
        skill_level: SkillLevel::Beginner,
    }
}

fn generator(base: &str, api_key: Option<&str>) -> RemoteGenerator {
    RemoteGenerator::new(base, api_key.map(ToString::to_string), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_decodes_and_truncates_recipes() {
    let seen = SeenAuth::default();
    let base = spawn_backend(Arc::clone(&seen)).await;

    let recipes = generator(&format!("{base}/ok"), None)
        .generate(&request(3))
        .await
        .unwrap();
    assert_eq!(recipes.len(), 3);
    assert_eq!(recipes[0].id, "remote-0");
    assert_eq!(recipes[2].title, "Remote Dish 2");
    assert!(seen.lock().unwrap().is_none());

    let recipes = generator(&format!("{base}/ok"), None)
        .generate(&request(50))
        .await
        .unwrap();
    assert_eq!(recipes.len(), 5);
}

#[tokio::test]
async fn test_sends_bearer_key() {
    let seen = SeenAuth::default();
    let base = spawn_backend(Arc::clone(&seen)).await;

    generator(&format!("{base}/ok"), Some("secret-token"))
        .generate(&request(5))
        .await
        .unwrap();
    assert_eq!(seen.lock().unwrap().as_deref(), Some("Bearer secret-token"));
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let base = spawn_backend(SeenAuth::default()).await;

    let result = generator(&format!("{base}/down"), None)
        .generate(&request(5))
        .await;
    match result {
        Err(GenerationError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "kitchen closed");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_body_is_invalid_response() {
    let base = spawn_backend(SeenAuth::default()).await;

    let result = generator(&format!("{base}/garbage"), None)
        .generate(&request(5))
        .await;
    assert!(matches!(result, Err(GenerationError::InvalidResponse(_))));
}
