use std::fmt;

use serde::Serialize;

use super::ControllerError;
use crate::domain::{
    DietaryFlag, DietaryPreferences, MAX_PORTIONS, MIN_PORTIONS, Recipe, RecipeRequest, SkillLevel,
    ValidationError,
};
use crate::generation::GenerationError;

/// Message shown after any generation failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate recipes. Please try again.";

/// Quick-add ingredients offered on the input view, in display order.
pub const SUGGESTED_INGREDIENTS: [&str; 10] = [
    "Chicken breast",
    "Rice",
    "Eggs",
    "Onion",
    "Garlic",
    "Tomatoes",
    "Pasta",
    "Olive oil",
    "Bell pepper",
    "Cheese",
];

pub const DEFAULT_PORTIONS: u8 = 2;

/// Suggestions stop once this many ingredients are entered.
const SUGGESTION_CUTOFF: usize = 10;
const MAX_SUGGESTIONS: usize = 5;

/// The screen currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Input,
    Loading,
    Results,
    Detail,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Input => "input",
            View::Loading => "loading",
            View::Results => "results",
            View::Detail => "detail",
        };
        f.write_str(name)
    }
}

/// Identifies one generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GenerationTicket(u64);

impl fmt::Display for GenerationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything a view needs to render the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSnapshot {
    pub view: View,
    pub ingredients: Vec<String>,
    pub preferences: DietaryPreferences,
    pub portions: u8,
    pub recipes: Vec<Recipe>,
    pub selected_recipe: Option<Recipe>,
    pub error: Option<String>,
    pub suggestions: Vec<String>,
}

/// State machine behind one user's screens.
#[derive(Debug, Clone)]
pub struct Controller {
    view: View,
    ingredients: Vec<String>,
    preferences: DietaryPreferences,
    portions: u8,
    recipes: Vec<Recipe>,
    selected: Option<String>,
    error: Option<String>,
    pending: Option<GenerationTicket>,
    next_ticket: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: View::Input,
            ingredients: Vec::new(),
            preferences: DietaryPreferences::default(),
            portions: DEFAULT_PORTIONS,
            recipes: Vec::new(),
            selected: None,
            error: None,
            pending: None,
            next_ticket: 1,
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    #[must_use]
    pub fn preferences(&self) -> &DietaryPreferences {
        &self.preferences
    }

    #[must_use]
    pub fn portions(&self) -> u8 {
        self.portions
    }

    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The recipe shown on the detail view.
    #[must_use]
    pub fn selected_recipe(&self) -> Option<&Recipe> {
        let id = self.selected.as_deref()?;
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Look up a recipe from the current results.
    #[must_use]
    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn pending_ticket(&self) -> Option<GenerationTicket> {
        self.pending
    }

    // Input editing

    /// Add a trimmed ingredient name. Blank names and case-insensitive
    /// duplicates are ignored.
    ///
    /// Returns `true` if the list changed.
    pub fn add_ingredient(&mut self, name: &str) -> Result<bool, ControllerError> {
        self.ensure_editable()?;

        let name = name.trim();
        if name.is_empty() || self.has_ingredient(name) {
            return Ok(false);
        }

        self.ingredients.push(name.to_string());
        self.error = None;
        Ok(true)
    }

    /// Remove an ingredient by exact name.
    pub fn remove_ingredient(&mut self, name: &str) -> Result<bool, ControllerError> {
        self.ensure_editable()?;

        let before = self.ingredients.len();
        self.ingredients.retain(|i| i != name);
        Ok(self.ingredients.len() != before)
    }

    /// Quick-add suggestions not yet entered.
    #[must_use]
    pub fn suggestions(&self) -> Vec<&'static str> {
        if self.ingredients.len() >= SUGGESTION_CUTOFF {
            return Vec::new();
        }

        SUGGESTED_INGREDIENTS
            .into_iter()
            .filter(|s| !self.has_ingredient(s))
            .take(MAX_SUGGESTIONS)
            .collect()
    }

    pub fn set_preference(
        &mut self,
        flag: DietaryFlag,
        value: bool,
    ) -> Result<(), ControllerError> {
        self.ensure_editable()?;
        self.preferences.set(flag, value);
        Ok(())
    }

    /// Flip one dietary flag and return its new value.
    pub fn toggle_preference(&mut self, flag: DietaryFlag) -> Result<bool, ControllerError> {
        self.ensure_editable()?;
        Ok(self.preferences.toggle(flag))
    }

    pub fn set_preferences(
        &mut self,
        preferences: DietaryPreferences,
    ) -> Result<(), ControllerError> {
        self.ensure_editable()?;
        self.preferences = preferences;
        Ok(())
    }

    /// One more portion, saturating at the maximum.
    pub fn increment_portions(&mut self) -> Result<u8, ControllerError> {
        self.ensure_editable()?;
        self.portions = (self.portions + 1).min(MAX_PORTIONS);
        Ok(self.portions)
    }

    /// One fewer portion, saturating at the minimum.
    pub fn decrement_portions(&mut self) -> Result<u8, ControllerError> {
        self.ensure_editable()?;
        self.portions = self.portions.saturating_sub(1).max(MIN_PORTIONS);
        Ok(self.portions)
    }

    pub fn set_portions(&mut self, portions: u8) -> Result<u8, ControllerError> {
        self.ensure_editable()?;
        if !(MIN_PORTIONS..=MAX_PORTIONS).contains(&portions) {
            return Err(ValidationError::PortionsOutOfRange(portions).into());
        }
        self.portions = portions;
        Ok(self.portions)
    }

    // Transitions

    /// Move from input to loading and hand out the request to run.
    ///
    /// A validation failure is also recorded as the inline error; the view
    /// stays on input.
    pub fn begin_generation(
        &mut self,
        max_recipes: usize,
    ) -> Result<(GenerationTicket, RecipeRequest), ControllerError> {
        match self.view {
            View::Input => {}
            View::Loading => return Err(ControllerError::AlreadyLoading),
            view => {
                return Err(ControllerError::InvalidTransition {
                    action: "generate recipes",
                    view,
                });
            }
        }

        let request = RecipeRequest {
            ingredients_available: self.ingredients.clone(),
            dietary_constraints: self.preferences,
            portion_size: self.portions,
            max_recipes,
            allow_substitutions: true,
            skill_level: SkillLevel::Beginner,
        };
        if let Err(e) = request.validate() {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        let ticket = GenerationTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        self.error = None;
        self.view = View::Loading;

        tracing::debug!(ticket = %ticket, "Generation started");
        Ok((ticket, request))
    }

    /// Apply the outcome of a generation attempt.
    ///
    /// Returns `false` when the attempt is stale (no longer loading, or a
    /// different ticket) and nothing changed.
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<Vec<Recipe>, GenerationError>,
    ) -> bool {
        if self.view != View::Loading || self.pending != Some(ticket) {
            tracing::debug!(
                ticket = %ticket,
                view = %self.view,
                "Discarding stale generation result"
            );
            return false;
        }
        self.pending = None;
        self.selected = None;

        match outcome {
            Ok(recipes) if recipes.is_empty() => {
                self.recipes.clear();
                self.view = View::Input;
            }
            Ok(recipes) => {
                self.recipes = recipes;
                self.view = View::Results;
            }
            Err(e) => {
                tracing::error!(
                    name: "generation.failed",
                    ticket = %ticket,
                    error = %e,
                    "Recipe generation failed"
                );
                self.recipes.clear();
                self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                self.view = View::Input;
            }
        }
        true
    }

    /// Open one recipe from the results.
    pub fn select_recipe(&mut self, id: &str) -> Result<&Recipe, ControllerError> {
        if self.view != View::Results {
            return Err(ControllerError::InvalidTransition {
                action: "select a recipe",
                view: self.view,
            });
        }

        let recipe = self
            .recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ControllerError::RecipeNotFound(id.to_string()))?;
        self.selected = Some(recipe.id.clone());
        self.view = View::Detail;
        Ok(recipe)
    }

    /// Step back one screen and return the new view.
    pub fn back(&mut self) -> View {
        match self.view {
            View::Detail => {
                self.selected = None;
                self.view = View::Results;
            }
            View::Results => {
                self.recipes.clear();
                self.selected = None;
                self.error = None;
                self.view = View::Input;
            }
            View::Loading => {
                if let Some(ticket) = self.pending.take() {
                    tracing::debug!(ticket = %ticket, "Generation abandoned");
                }
                self.view = View::Input;
            }
            View::Input => {}
        }
        self.view
    }

    #[must_use]
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            view: self.view,
            ingredients: self.ingredients.clone(),
            preferences: self.preferences,
            portions: self.portions,
            recipes: self.recipes.clone(),
            selected_recipe: self.selected_recipe().cloned(),
            error: self.error.clone(),
            suggestions: self.suggestions().into_iter().map(String::from).collect(),
        }
    }

    fn ensure_editable(&self) -> Result<(), ControllerError> {
        if self.view == View::Input {
            Ok(())
        } else {
            Err(ControllerError::NotEditable(self.view))
        }
    }

    fn has_ingredient(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.ingredients.iter().any(|i| i.to_lowercase() == name)
    }
}
