//! Browser-facing pages. Every POST redirects back to a GET page.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;

use crate::AppState;
use crate::controller::{Controller, ControllerError};
use crate::domain::{DietaryFlag, Recipe};
use crate::session::Session;
use crate::ui;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(new_session))
        .route("/s/{id}", get(show_session))
        .route("/s/{id}/ingredients", post(add_ingredient))
        .route("/s/{id}/ingredients/remove", post(remove_ingredient))
        .route("/s/{id}/preferences/{flag}/toggle", post(toggle_preference))
        .route("/s/{id}/portions/increment", post(increment_portions))
        .route("/s/{id}/portions/decrement", post(decrement_portions))
        .route("/s/{id}/generate", post(generate))
        .route("/s/{id}/recipes/{recipe_id}/select", post(select_recipe))
        .route("/s/{id}/recipes/{recipe_id}/favorite", post(toggle_favorite))
        .route("/s/{id}/back", post(back))
        .route("/favorites", get(favorites))
        .route("/favorites/{recipe_id}", get(favorite_detail))
        .route("/favorites/{recipe_id}/remove", post(remove_favorite))
}

fn session_url(id: &str) -> String {
    format!("/s/{id}")
}

/// Apply an edit to the session and go back to its page.
///
/// Unknown sessions start over; refused edits are ignored.
fn edit_session<R>(
    state: &AppState,
    id: &str,
    f: impl FnOnce(&mut Controller) -> Result<R, ControllerError>,
) -> Redirect {
    let Some(session) = state.sessions.get(id) else {
        return Redirect::to("/");
    };
    if let Err(e) = session.with_controller(f) {
        tracing::debug!(session_id = %id, error = %e, "Edit refused");
    }
    Redirect::to(&session_url(id))
}

async fn favorite_ids(state: &AppState) -> HashSet<String> {
    state
        .favorites
        .list()
        .await
        .into_iter()
        .map(|r| r.id)
        .collect()
}

/// GET / - start a fresh session.
async fn new_session(State(state): State<AppState>) -> Redirect {
    let session = state.sessions.create();
    Redirect::to(&session_url(session.id()))
}

/// GET /s/{id} - render whatever view the session is on.
async fn show_session(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(session) = state.sessions.get(&id) else {
        return Redirect::to("/").into_response();
    };
    let snapshot = session.snapshot();
    let favorites = favorite_ids(&state).await;
    Html(ui::session_page(session.id(), &snapshot, &favorites)).into_response()
}

#[derive(Debug, Deserialize)]
struct IngredientForm {
    #[serde(default)]
    ingredient: String,
}

async fn add_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<IngredientForm>,
) -> Redirect {
    edit_session(&state, &id, |c| c.add_ingredient(&form.ingredient))
}

#[derive(Debug, Deserialize)]
struct RemoveForm {
    name: String,
}

async fn remove_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<RemoveForm>,
) -> Redirect {
    edit_session(&state, &id, |c| c.remove_ingredient(&form.name))
}

async fn toggle_preference(
    State(state): State<AppState>,
    Path((id, flag)): Path<(String, String)>,
) -> Redirect {
    match DietaryFlag::from_str(&flag) {
        Ok(flag) => edit_session(&state, &id, |c| c.toggle_preference(flag)),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unknown preference");
            Redirect::to(&session_url(&id))
        }
    }
}

async fn increment_portions(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    edit_session(&state, &id, Controller::increment_portions)
}

async fn decrement_portions(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    edit_session(&state, &id, Controller::decrement_portions)
}

/// POST /s/{id}/generate - validation errors surface inline on the input page.
async fn generate(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    let Some(session) = state.sessions.get(&id) else {
        return Redirect::to("/");
    };
    if let Err(e) = session.start_generation(
        Arc::clone(&state.generator),
        state.config.generation.max_recipes,
    ) {
        tracing::debug!(session_id = %id, error = %e, "Generation not started");
    }
    Redirect::to(&session_url(&id))
}

async fn select_recipe(
    State(state): State<AppState>,
    Path((id, recipe_id)): Path<(String, String)>,
) -> Redirect {
    edit_session(&state, &id, |c| c.select_recipe(&recipe_id).map(|_| ()))
}

async fn back(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    edit_session(&state, &id, |c| Ok::<_, ControllerError>(c.back()))
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Path((id, recipe_id)): Path<(String, String)>,
) -> Redirect {
    let Some(session) = state.sessions.get(&id) else {
        return Redirect::to("/");
    };
    if let Some(recipe) = find_recipe(&session, &recipe_id) {
        state.favorites.toggle_favorite(&recipe).await;
    }
    Redirect::to(&session_url(&id))
}

fn find_recipe(session: &Session, recipe_id: &str) -> Option<Recipe> {
    session.with_controller(|c| c.recipe(recipe_id).cloned())
}

/// GET /favorites
async fn favorites(State(state): State<AppState>) -> Html<String> {
    Html(ui::favorites_page(&state.favorites.list().await))
}

/// GET /favorites/{recipe_id}
async fn favorite_detail(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Response {
    match state.favorites.get(&recipe_id).await {
        Some(recipe) => Html(ui::favorite_detail_page(&recipe)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html(ui::not_found_page("That recipe is not in your favorites.")),
        )
            .into_response(),
    }
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Redirect {
    state.favorites.remove_favorite(&recipe_id).await;
    Redirect::to("/favorites")
}
