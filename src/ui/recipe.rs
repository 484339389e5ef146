//! Recipe card and detail fragments.

use std::fmt::Write;

use super::components::{BadgeVariant, ButtonVariant, action_button, attr, badge, heart_icon, text};
use crate::domain::Recipe;

/// How a card opens its recipe.
#[derive(Debug, Clone, Copy)]
pub enum OpenAction<'a> {
    /// POST form (session state transition).
    Post(&'a str),
    /// Plain link.
    Link(&'a str),
}

fn favorite_button(action: &str, is_favorite: bool) -> String {
    let label = if is_favorite {
        format!("{} Saved", heart_icon(true))
    } else {
        format!("{} Save", heart_icon(false))
    };
    action_button(action, &label, ButtonVariant::Ghost, &[])
}

/// Summary card for a results or favorites list.
#[must_use]
pub fn recipe_card(
    recipe: &Recipe,
    is_favorite: bool,
    open: OpenAction<'_>,
    favorite_action: &str,
) -> String {
    let open_html = match open {
        OpenAction::Post(action) => {
            action_button(action, "View recipe", ButtonVariant::Secondary, &[])
        }
        OpenAction::Link(href) => format!(
            r#"<a class="btn btn-secondary" href="{}">View recipe</a>"#,
            attr(href)
        ),
    };

    let missing = if recipe.needs_shopping() {
        badge(
            &format!("{} to buy", recipe.missing_ingredients.len()),
            BadgeVariant::Warning,
        )
    } else {
        String::new()
    };

    format!(
        r#"<article class="card recipe-card" data-recipe-id="{id}">
    <header class="card-header">
        <h3>{title}</h3>
        {favorite}
    </header>
    <div class="card-content meta">
        {prep} {servings} {calories} {missing}
    </div>
    <footer class="card-footer">{open_html}</footer>
</article>"#,
        id = attr(&recipe.id),
        title = text(&recipe.title),
        favorite = favorite_button(favorite_action, is_favorite),
        prep = badge(&format!("{} min", recipe.prep_time_minutes), BadgeVariant::Outline),
        servings = badge(&format!("{} servings", recipe.servings), BadgeVariant::Outline),
        calories = badge(
            &format!("{} kcal", recipe.nutrition.calories_per_serving),
            BadgeVariant::Default
        ),
    )
}

/// Full recipe view.
///
/// `back_html` is trusted markup placed above the recipe.
#[must_use]
pub fn recipe_detail(
    recipe: &Recipe,
    is_favorite: bool,
    favorite_action: &str,
    back_html: &str,
) -> String {
    let image = recipe
        .image_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<img class="recipe-image" src="{}" alt="{}">"#,
                attr(url),
                attr(&recipe.title)
            )
        })
        .unwrap_or_default();

    let mut ingredients = String::new();
    for ingredient in &recipe.ingredients {
        let substitution = ingredient
            .substitution
            .as_deref()
            .map(|s| format!(r#" <span class="muted">(or {})</span>"#, text(s)))
            .unwrap_or_default();
        let _ = write!(
            ingredients,
            r#"<li><span class="qty">{}</span> {}{}</li>"#,
            text(&ingredient.quantity),
            text(&ingredient.name),
            substitution
        );
    }

    let missing = if recipe.needs_shopping() {
        let mut items = String::new();
        for item in &recipe.missing_ingredients {
            let _ = write!(
                items,
                r#"<li>{} <span class="muted">(try {})</span></li>"#,
                text(&item.name),
                text(&item.suggested_substitution)
            );
        }
        format!(
            r#"<section class="card missing"><h2>You will also need</h2><ul>{items}</ul></section>"#
        )
    } else {
        String::new()
    };

    let mut steps = String::new();
    for step in &recipe.instructions {
        let _ = write!(steps, "<li>{}</li>", text(step));
    }

    let n = recipe.nutrition;
    format!(
        r#"{back_html}
<article class="recipe-detail" data-recipe-id="{id}">
    {image}
    <header class="detail-header">
        <h1>{title}</h1>
        {favorite}
    </header>
    <p class="meta">{prep} min prep, serves {servings}</p>
    <section class="card"><h2>Ingredients</h2><ul>{ingredients}</ul></section>
    {missing}
    <section class="card"><h2>Instructions</h2><ol>{steps}</ol></section>
    <section class="card nutrition">
        <h2>Nutrition per serving</h2>
        <dl>
            <dt>Calories</dt><dd>{calories}</dd>
            <dt>Protein</dt><dd>{protein} g</dd>
            <dt>Carbs</dt><dd>{carbs} g</dd>
            <dt>Fat</dt><dd>{fat} g</dd>
        </dl>
    </section>
</article>"#,
        id = attr(&recipe.id),
        title = text(&recipe.title),
        favorite = favorite_button(favorite_action, is_favorite),
        prep = recipe.prep_time_minutes,
        servings = recipe.servings,
        calories = n.calories_per_serving,
        protein = n.protein_g,
        carbs = n.carbs_g,
        fat = n.fat_g,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MissingIngredient;
    use crate::domain::fixtures::recipe;

    #[test]
    fn test_card_shows_summary() {
        let mut r = recipe("r1");
        r.missing_ingredients.push(MissingIngredient {
            name: "ginger".to_string(),
            suggested_substitution: "coconut aminos".to_string(),
        });

        let html = recipe_card(&r, true, OpenAction::Post("/s/x/recipes/r1/select"), "/fav");
        assert!(html.contains("Savory Rice Bowl"));
        assert!(html.contains("25 min"));
        assert!(html.contains("2 servings"));
        assert!(html.contains("420 kcal"));
        assert!(html.contains("1 to buy"));
        assert!(html.contains("Saved"));
    }

    #[test]
    fn test_detail_lists_everything() {
        let mut r = recipe("r1");
        r.title = "Tom & Jerry's <Stew>".to_string();
        let html = recipe_detail(&r, false, "/fav", "");

        assert!(html.contains("Tom &amp; Jerry's &lt;Stew&gt;"));
        assert!(html.contains("200g"));
        assert!(html.contains("<dd>420</dd>"));
        assert!(!html.contains("You will also need"));
        assert!(!html.contains("<img"));
        assert!(html.contains("Save"));
    }
}
