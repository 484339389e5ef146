//! JSON API under `/api`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::AppState;
use crate::controller::ControllerError;
use crate::domain::{DietaryPreferences, Recipe, RecipeRequest};
use crate::generation::{GenerateResponse, MAX_RECIPES_PER_REQUEST};
use crate::session::{Session, SessionState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/ingredients", post(add_ingredient))
        .route("/sessions/{id}/ingredients/{name}", delete(remove_ingredient))
        .route("/sessions/{id}/preferences", put(set_preferences))
        .route("/sessions/{id}/portions", put(set_portions))
        .route("/sessions/{id}/generate", post(generate))
        .route("/sessions/{id}/recipes/{recipe_id}/select", post(select_recipe))
        .route(
            "/sessions/{id}/recipes/{recipe_id}/favorite",
            post(toggle_session_favorite),
        )
        .route("/sessions/{id}/back", post(back))
        .route("/favorites", get(list_favorites).post(toggle_favorite))
        .route("/favorites/{recipe_id}", delete(remove_favorite))
        .route("/recipes/generate", post(generate_recipes))
}

fn session(state: &AppState, id: &str) -> Result<Session, ApiError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))
}

/// POST /api/sessions
async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionState>) {
    let session = state.sessions.create();
    (StatusCode::CREATED, Json(session.to_state()))
}

/// GET /api/sessions/{id}
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionState>, ApiError> {
    Ok(Json(session(&state, &id)?.to_state()))
}

/// DELETE /api/sessions/{id}
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .sessions
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ApiError::SessionNotFound(id))
}

#[derive(Debug, Deserialize)]
struct IngredientBody {
    name: String,
}

/// POST /api/sessions/{id}/ingredients
async fn add_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<IngredientBody>,
) -> Result<Json<SessionState>, ApiError> {
    let session = session(&state, &id)?;
    session.with_controller(|c| c.add_ingredient(&body.name))?;
    Ok(Json(session.to_state()))
}

/// DELETE /api/sessions/{id}/ingredients/{name}
async fn remove_ingredient(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<SessionState>, ApiError> {
    let session = session(&state, &id)?;
    session.with_controller(|c| c.remove_ingredient(&name))?;
    Ok(Json(session.to_state()))
}

/// PUT /api/sessions/{id}/preferences
async fn set_preferences(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(preferences): Json<DietaryPreferences>,
) -> Result<Json<SessionState>, ApiError> {
    let session = session(&state, &id)?;
    session.with_controller(|c| c.set_preferences(preferences))?;
    Ok(Json(session.to_state()))
}

#[derive(Debug, Deserialize)]
struct PortionsBody {
    portions: u8,
}

/// PUT /api/sessions/{id}/portions
async fn set_portions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<PortionsBody>,
) -> Result<Json<SessionState>, ApiError> {
    let session = session(&state, &id)?;
    session.with_controller(|c| c.set_portions(body.portions))?;
    Ok(Json(session.to_state()))
}

/// POST /api/sessions/{id}/generate - 202 while the recipes are generated.
async fn generate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<SessionState>), ApiError> {
    let session = session(&state, &id)?;
    session.start_generation(
        Arc::clone(&state.generator),
        state.config.generation.max_recipes,
    )?;
    Ok((StatusCode::ACCEPTED, Json(session.to_state())))
}

/// POST /api/sessions/{id}/recipes/{recipe_id}/select
async fn select_recipe(
    State(state): State<AppState>,
    Path((id, recipe_id)): Path<(String, String)>,
) -> Result<Json<SessionState>, ApiError> {
    let session = session(&state, &id)?;
    session.with_controller(|c| c.select_recipe(&recipe_id).map(|_| ()))?;
    Ok(Json(session.to_state()))
}

/// POST /api/sessions/{id}/back
async fn back(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionState>, ApiError> {
    let session = session(&state, &id)?;
    session.with_controller(|c| c.back());
    Ok(Json(session.to_state()))
}

#[derive(Debug, Serialize)]
struct FavoriteStatus {
    recipe_id: String,
    favorite: bool,
}

/// POST /api/sessions/{id}/recipes/{recipe_id}/favorite
async fn toggle_session_favorite(
    State(state): State<AppState>,
    Path((id, recipe_id)): Path<(String, String)>,
) -> Result<Json<FavoriteStatus>, ApiError> {
    let session = session(&state, &id)?;
    let recipe = session
        .with_controller(|c| c.recipe(&recipe_id).cloned())
        .ok_or_else(|| ControllerError::RecipeNotFound(recipe_id.clone()))?;

    let favorite = state.favorites.toggle_favorite(&recipe).await;
    Ok(Json(FavoriteStatus {
        recipe_id,
        favorite,
    }))
}

/// GET /api/favorites
async fn list_favorites(State(state): State<AppState>) -> Json<Vec<Recipe>> {
    Json(state.favorites.list().await)
}

/// POST /api/favorites - toggle a full recipe.
async fn toggle_favorite(
    State(state): State<AppState>,
    Json(recipe): Json<Recipe>,
) -> Json<FavoriteStatus> {
    let favorite = state.favorites.toggle_favorite(&recipe).await;
    Json(FavoriteStatus {
        recipe_id: recipe.id,
        favorite,
    })
}

/// DELETE /api/favorites/{recipe_id} - absent ids are a no-op.
async fn remove_favorite(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> StatusCode {
    state.favorites.remove_favorite(&recipe_id).await;
    StatusCode::NO_CONTENT
}

/// POST /api/recipes/generate - stateless generation.
async fn generate_recipes(
    State(state): State<AppState>,
    Json(request): Json<RecipeRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    request.validate()?;

    let mut recipes = state.generator.generate(&request).await?;
    recipes.truncate(request.max_recipes.min(MAX_RECIPES_PER_REQUEST));

    tracing::info!(
        name: "generation.completed",
        provider = state.generator.provider_name(),
        recipes = recipes.len(),
        "Stateless generation finished"
    );
    Ok(Json(GenerateResponse { recipes }))
}
