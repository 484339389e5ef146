mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{
    FailingGenerator, harness, harness_with_storage, instant_generator, slow_generator,
    wait_until_loaded,
};
use pantry_chef::domain::Recipe;
use pantry_chef::favorites::MemoryStorage;

async fn new_session(server: &axum_test::TestServer) -> String {
    let response = server.post("/api/sessions").await;
    response.assert_status(StatusCode::CREATED);
    let state: Value = response.json();
    state["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let h = harness(instant_generator()).await;
    let body: Value = h.server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["generator"], "template");
    assert_eq!(body["favorites"], 0);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let h = harness(instant_generator()).await;
    let id = new_session(&h.server).await;

    let state: Value = h.server.get(&format!("/api/sessions/{id}")).await.json();
    assert_eq!(state["view"], "input");
    assert_eq!(state["portions"], 2);
    assert_eq!(state["ingredients"], json!([]));

    let state: Value = h
        .server
        .post(&format!("/api/sessions/{id}/ingredients"))
        .json(&json!({ "name": "  Chicken breast " }))
        .await
        .json();
    assert_eq!(state["ingredients"], json!(["Chicken breast"]));

    let state: Value = h
        .server
        .post(&format!("/api/sessions/{id}/ingredients"))
        .json(&json!({ "name": "chicken breast" }))
        .await
        .json();
    assert_eq!(state["ingredients"], json!(["Chicken breast"]));

    let state: Value = h
        .server
        .delete(&format!("/api/sessions/{id}/ingredients/Chicken%20breast"))
        .await
        .json();
    assert_eq!(state["ingredients"], json!([]));

    h.server
        .delete(&format!("/api/sessions/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = h
        .server
        .get(&format!("/api/sessions/{id}"))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn test_preferences_and_portions() {
    let h = harness(instant_generator()).await;
    let id = new_session(&h.server).await;

    let state: Value = h
        .server
        .put(&format!("/api/sessions/{id}/preferences"))
        .json(&json!({ "vegan": true, "gluten_free": true }))
        .await
        .json();
    assert_eq!(state["preferences"]["vegan"], true);
    assert_eq!(state["preferences"]["gluten_free"], true);
    assert_eq!(state["preferences"]["kosher"], false);

    let state: Value = h
        .server
        .put(&format!("/api/sessions/{id}/portions"))
        .json(&json!({ "portions": 8 }))
        .await
        .json();
    assert_eq!(state["portions"], 8);

    let response = h
        .server
        .put(&format!("/api/sessions/{id}/portions"))
        .json(&json!({ "portions": 9 }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_generate_without_ingredients_is_rejected() {
    let h = harness(Arc::new(FailingGenerator)).await;
    let id = new_session(&h.server).await;

    let response = h
        .server
        .post(&format!("/api/sessions/{id}/generate"))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "Please add at least one ingredient");

    let state: Value = h.server.get(&format!("/api/sessions/{id}")).await.json();
    assert_eq!(state["view"], "input");
    assert_eq!(state["error"], "Please add at least one ingredient");
}

#[tokio::test]
async fn test_full_session_flow() {
    let h = harness(instant_generator()).await;
    let id = new_session(&h.server).await;

    h.server
        .post(&format!("/api/sessions/{id}/ingredients"))
        .json(&json!({ "name": "Chicken breast" }))
        .await;

    h.server
        .post(&format!("/api/sessions/{id}/generate"))
        .await
        .assert_status(StatusCode::ACCEPTED);

    let state = wait_until_loaded(&h.server, &id).await;
    assert_eq!(state["view"], "results");
    let recipes = state["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 5);
    for recipe in recipes {
        assert_eq!(recipe["servings"], 2);
    }
    assert_eq!(recipes[0]["title"], "Savory Chicken breast Bowl");

    let recipe_id = recipes[1]["id"].as_str().unwrap().to_string();

    let state: Value = h
        .server
        .post(&format!("/api/sessions/{id}/recipes/{recipe_id}/select"))
        .await
        .json();
    assert_eq!(state["view"], "detail");
    assert_eq!(state["selected_recipe"]["id"], recipe_id.as_str());

    // Editing is refused away from the input view.
    h.server
        .post(&format!("/api/sessions/{id}/ingredients"))
        .json(&json!({ "name": "Rice" }))
        .expect_failure()
        .await
        .assert_status(StatusCode::CONFLICT);

    let status: Value = h
        .server
        .post(&format!("/api/sessions/{id}/recipes/{recipe_id}/favorite"))
        .await
        .json();
    assert_eq!(status["favorite"], true);

    let favorites: Vec<Recipe> = h.server.get("/api/favorites").await.json();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, recipe_id);
    assert!(h.storage.raw().unwrap().contains(&recipe_id));

    let state: Value = h.server.post(&format!("/api/sessions/{id}/back")).await.json();
    assert_eq!(state["view"], "results");
    let state: Value = h.server.post(&format!("/api/sessions/{id}/back")).await.json();
    assert_eq!(state["view"], "input");
    assert_eq!(state["recipes"], json!([]));
    assert_eq!(state["ingredients"], json!(["Chicken breast"]));
}

#[tokio::test]
async fn test_unknown_recipe_is_not_found() {
    let h = harness(instant_generator()).await;
    let id = new_session(&h.server).await;
    h.server
        .post(&format!("/api/sessions/{id}/ingredients"))
        .json(&json!({ "name": "Rice" }))
        .await;
    h.server.post(&format!("/api/sessions/{id}/generate")).await;
    wait_until_loaded(&h.server, &id).await;

    h.server
        .post(&format!("/api/sessions/{id}/recipes/nope/select"))
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
    h.server
        .post(&format!("/api/sessions/{id}/recipes/nope/favorite"))
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_second_generate_while_loading_conflicts() {
    let h = harness(slow_generator()).await;
    let id = new_session(&h.server).await;
    h.server
        .post(&format!("/api/sessions/{id}/ingredients"))
        .json(&json!({ "name": "Rice" }))
        .await;

    let state: Value = h
        .server
        .post(&format!("/api/sessions/{id}/generate"))
        .await
        .json();
    assert_eq!(state["view"], "loading");

    h.server
        .post(&format!("/api/sessions/{id}/generate"))
        .expect_failure()
        .await
        .assert_status(StatusCode::CONFLICT);

    // Backing out abandons the pending request.
    let state: Value = h.server.post(&format!("/api/sessions/{id}/back")).await.json();
    assert_eq!(state["view"], "input");
}

#[tokio::test]
async fn test_failed_generation_returns_to_input() {
    let h = harness(Arc::new(FailingGenerator)).await;
    let id = new_session(&h.server).await;
    h.server
        .post(&format!("/api/sessions/{id}/ingredients"))
        .json(&json!({ "name": "Rice" }))
        .await;
    h.server.post(&format!("/api/sessions/{id}/generate")).await;

    let state = wait_until_loaded(&h.server, &id).await;
    assert_eq!(state["view"], "input");
    assert_eq!(state["error"], "Failed to generate recipes. Please try again.");
    assert_eq!(state["recipes"], json!([]));
}

#[tokio::test]
async fn test_stateless_generation() {
    let h = harness(instant_generator()).await;

    let body: Value = h
        .server
        .post("/api/recipes/generate")
        .json(&json!({
            "ingredients_available": ["Tofu", "Rice"],
            "dietary_constraints": { "vegan": true },
            "portion_size": 3,
            "max_recipes": 3
        }))
        .await
        .json();
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 3);
    assert_eq!(recipes[0]["servings"], 3);
    assert_eq!(recipes[0]["ingredients"][0]["substitution"], "tofu");

    let response = h
        .server
        .post("/api/recipes/generate")
        .json(&json!({
            "ingredients_available": [],
            "portion_size": 2,
            "max_recipes": 5
        }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    h.server
        .post("/api/recipes/generate")
        .json(&json!({
            "ingredients_available": ["Rice"],
            "portion_size": 9,
            "max_recipes": 5
        }))
        .expect_failure()
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_stateless_generation_failure_is_bad_gateway() {
    let h = harness(Arc::new(FailingGenerator)).await;

    let response = h
        .server
        .post("/api/recipes/generate")
        .json(&json!({
            "ingredients_available": ["Rice"],
            "portion_size": 2,
            "max_recipes": 5
        }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_favorites_api() {
    let h = harness(instant_generator()).await;

    let recipe = json!({
        "id": "r1",
        "title": "Quick Rice Stir-Fry",
        "prep_time_minutes": 20,
        "servings": 2,
        "ingredients": [{ "name": "Rice", "quantity": "150g" }],
        "instructions": ["Cook."],
        "nutrition": { "calories_per_serving": 400, "protein_g": 20, "carbs_g": 40, "fat_g": 10 }
    });

    let status: Value = h.server.post("/api/favorites").json(&recipe).await.json();
    assert_eq!(status, json!({ "recipe_id": "r1", "favorite": true }));
    let favorites: Vec<Recipe> = h.server.get("/api/favorites").await.json();
    assert_eq!(favorites.len(), 1);

    let status: Value = h.server.post("/api/favorites").json(&recipe).await.json();
    assert_eq!(status["favorite"], false);
    let favorites: Vec<Recipe> = h.server.get("/api/favorites").await.json();
    assert!(favorites.is_empty());

    h.server.post("/api/favorites").json(&recipe).await;
    h.server
        .delete("/api/favorites/r1")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    h.server
        .delete("/api/favorites/r1")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(h.storage.raw().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_malformed_storage_starts_empty() {
    let h = harness_with_storage(instant_generator(), MemoryStorage::with_raw("{broken")).await;
    let favorites: Vec<Recipe> = h.server.get("/api/favorites").await.json();
    assert!(favorites.is_empty());
}
