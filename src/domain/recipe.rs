//! Generated recipes and their parts.

use serde::{Deserialize, Serialize};

/// An ingredient line attached to a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Human-readable amount, e.g. `"250g"`.
    pub quantity: String,
    /// Suggested replacement, when a dietary constraint calls for one.
    #[serde(default)]
    pub substitution: Option<String>,
}

/// Something the recipe needs that the user did not list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingIngredient {
    pub name: String,
    pub suggested_substitution: String,
}

/// Per-serving nutrition figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories_per_serving: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

/// A generated cooking suggestion.
///
/// Recipes are immutable once produced by a generator. Two recipes are the
/// same entity when their ids match; see [`Recipe::same_entity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub prep_time_minutes: u32,
    pub servings: u8,
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub missing_ingredients: Vec<MissingIngredient>,
    pub instructions: Vec<String>,
    pub nutrition: Nutrition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Recipe {
    /// Identity comparison.
    #[must_use]
    pub fn same_entity(&self, other: &Recipe) -> bool {
        self.id == other.id
    }

    /// Whether the user needs to pick up anything extra.
    #[must_use]
    pub fn needs_shopping(&self) -> bool {
        !self.missing_ingredients.is_empty()
    }
}
