//! Recipe data model shared by every layer.
//!
//! - [`Recipe`] and its parts are produced by a generator and never mutated.
//! - [`RecipeRequest`] carries the user's ingredients and constraints.

mod recipe;
mod request;

pub use recipe::{Ingredient, MissingIngredient, Nutrition, Recipe};
pub use request::{
    DietaryFlag, DietaryPreferences, MAX_PORTIONS, MIN_PORTIONS, RecipeRequest, SkillLevel,
    ValidationError,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Ingredient, Nutrition, Recipe};

    /// A small, fully populated recipe with the given id.
    pub fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: "Savory Rice Bowl".to_string(),
            prep_time_minutes: 25,
            servings: 2,
            ingredients: vec![Ingredient {
                name: "Rice".to_string(),
                quantity: "200g".to_string(),
                substitution: None,
            }],
            missing_ingredients: vec![],
            instructions: vec!["Cook the rice.".to_string()],
            nutrition: Nutrition {
                calories_per_serving: 420,
                protein_g: 20,
                carbs_g: 50,
                fat_g: 10,
            },
            image_url: None,
        }
    }
}
