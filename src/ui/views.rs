//! Full pages for each controller view and for the favorites collection.

use std::collections::HashSet;
use std::fmt::Write;

use super::components::{ButtonVariant, action_button, attr, error_banner, path_segment, text};
use super::layout::html_shell;
use super::recipe::{OpenAction, recipe_card, recipe_detail};
use crate::controller::{ControllerSnapshot, View};
use crate::domain::{DietaryFlag, MAX_PORTIONS, MIN_PORTIONS, Recipe};

/// Seconds between reloads of the loading page.
const LOADING_REFRESH_SECS: u32 = 1;

/// Render the page for a session's current view.
#[must_use]
pub fn session_page(
    session_id: &str,
    snapshot: &ControllerSnapshot,
    favorite_ids: &HashSet<String>,
) -> String {
    let base = format!("/s/{session_id}");
    match snapshot.view {
        View::Input => html_shell("What's in your kitchen?", "", &input_view(&base, snapshot)),
        View::Loading => html_shell(
            "Finding recipes",
            &format!(
                r#"<meta http-equiv="refresh" content="{LOADING_REFRESH_SECS};url={}">"#,
                attr(&base)
            ),
            &loading_view(&base),
        ),
        View::Results => html_shell(
            "Recipes",
            "",
            &results_view(&base, &snapshot.recipes, favorite_ids),
        ),
        View::Detail => match &snapshot.selected_recipe {
            Some(recipe) => html_shell(
                &recipe.title,
                "",
                &recipe_detail(
                    recipe,
                    favorite_ids.contains(&recipe.id),
                    &format!("{base}/recipes/{}/favorite", path_segment(&recipe.id)),
                    &action_button(
                        &format!("{base}/back"),
                        "&larr; Back to results",
                        ButtonVariant::Ghost,
                        &[],
                    ),
                ),
            ),
            None => html_shell(
                "Recipes",
                "",
                &results_view(&base, &snapshot.recipes, favorite_ids),
            ),
        },
    }
}

fn input_view(base: &str, snapshot: &ControllerSnapshot) -> String {
    let mut chips = String::new();
    for ingredient in &snapshot.ingredients {
        chips.push_str(&action_button(
            &format!("{base}/ingredients/remove"),
            &format!("{} &times;", text(ingredient)),
            ButtonVariant::Chip,
            &[("name", ingredient)],
        ));
    }

    let suggestions = if snapshot.suggestions.is_empty() {
        String::new()
    } else {
        let mut buttons = String::new();
        for suggestion in &snapshot.suggestions {
            buttons.push_str(&action_button(
                &format!("{base}/ingredients"),
                &format!("+ {}", text(suggestion)),
                ButtonVariant::Chip,
                &[("ingredient", suggestion)],
            ));
        }
        format!(r#"<div class="suggestions"><span class="muted">Quick add:</span>{buttons}</div>"#)
    };

    let mut flags = String::new();
    for flag in DietaryFlag::ALL {
        let active = snapshot.preferences.get(flag);
        let variant = if active {
            ButtonVariant::Primary
        } else {
            ButtonVariant::Secondary
        };
        let _ = write!(
            flags,
            r#"<div class="pref" data-active="{active}">{}</div>"#,
            action_button(
                &format!("{base}/preferences/{}/toggle", flag.key()),
                flag.label(),
                variant,
                &[],
            )
        );
    }

    let decrement = if snapshot.portions > MIN_PORTIONS {
        action_button(
            &format!("{base}/portions/decrement"),
            "&minus;",
            ButtonVariant::Secondary,
            &[],
        )
    } else {
        r#"<button class="btn btn-secondary" disabled>&minus;</button>"#.to_string()
    };
    let increment = if snapshot.portions < MAX_PORTIONS {
        action_button(&format!("{base}/portions/increment"), "+", ButtonVariant::Secondary, &[])
    } else {
        r#"<button class="btn btn-secondary" disabled>+</button>"#.to_string()
    };

    format!(
        r#"<section class="card">
    <h1>What's in your kitchen?</h1>
    {error}
    <form method="post" action="{base}/ingredients" class="ingredient-form">
        <input type="text" name="ingredient" placeholder="Add an ingredient" autocomplete="off" autofocus>
        <button type="submit" class="btn btn-primary">Add</button>
    </form>
    <div class="chips">{chips}</div>
    {suggestions}
</section>
<section class="card">
    <h2>Dietary preferences</h2>
    <div class="pref-grid">{flags}</div>
</section>
<section class="card">
    <h2>Portions</h2>
    <div class="stepper">{decrement}<span class="portions">{portions}</span>{increment}</div>
</section>
<div class="actions">{generate}</div>"#,
        error = error_banner(snapshot.error.as_deref()),
        base = attr(base),
        portions = snapshot.portions,
        generate = action_button(
            &format!("{base}/generate"),
            "Find recipes",
            ButtonVariant::Primary,
            &[]
        ),
    )
}

fn loading_view(base: &str) -> String {
    format!(
        r#"<section class="card loading" aria-busy="true">
    <div class="spinner"></div>
    <h1>Finding recipes...</h1>
    <p class="muted">This page refreshes on its own.</p>
    {cancel}
</section>"#,
        cancel = action_button(&format!("{base}/back"), "Cancel", ButtonVariant::Ghost, &[]),
    )
}

fn results_view(base: &str, recipes: &[Recipe], favorite_ids: &HashSet<String>) -> String {
    let mut cards = String::new();
    for recipe in recipes {
        let segment = path_segment(&recipe.id);
        cards.push_str(&recipe_card(
            recipe,
            favorite_ids.contains(&recipe.id),
            OpenAction::Post(&format!("{base}/recipes/{segment}/select")),
            &format!("{base}/recipes/{segment}/favorite"),
        ));
    }

    let heading = match recipes.len() {
        1 => "1 recipe found".to_string(),
        n => format!("{n} recipes found"),
    };

    format!(
        r#"<div class="results-header">
    <h1>{heading}</h1>
    {back}
</div>
<div class="recipe-grid">{cards}</div>"#,
        back = action_button(&format!("{base}/back"), "Start over", ButtonVariant::Ghost, &[]),
    )
}

/// The saved recipes page.
#[must_use]
pub fn favorites_page(favorites: &[Recipe]) -> String {
    let content = if favorites.is_empty() {
        r#"<h1>Favorites</h1><p class="muted empty">No saved recipes yet.</p>"#.to_string()
    } else {
        let mut cards = String::new();
        for recipe in favorites {
            let segment = path_segment(&recipe.id);
            cards.push_str(&recipe_card(
                recipe,
                true,
                OpenAction::Link(&format!("/favorites/{segment}")),
                &format!("/favorites/{segment}/remove"),
            ));
        }
        format!(r#"<h1>Favorites</h1><div class="recipe-grid">{cards}</div>"#)
    };
    html_shell("Favorites", "", &content)
}

/// One saved recipe.
#[must_use]
pub fn favorite_detail_page(recipe: &Recipe) -> String {
    let back = r#"<a class="btn btn-ghost" href="/favorites">&larr; Back to favorites</a>"#;
    html_shell(
        &recipe.title,
        "",
        &recipe_detail(
            recipe,
            true,
            &format!("/favorites/{}/remove", path_segment(&recipe.id)),
            back,
        ),
    )
}

/// Page for a missing session or recipe.
#[must_use]
pub fn not_found_page(message: &str) -> String {
    html_shell(
        "Not found",
        "",
        &format!(
            r#"<section class="card"><h1>Not found</h1><p>{}</p><a class="btn btn-primary" href="/">Start over</a></section>"#,
            text(message)
        ),
    )
}
