//! What the user asks a generator for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Smallest portion count a request may carry.
pub const MIN_PORTIONS: u8 = 1;
/// Largest portion count a request may carry.
pub const MAX_PORTIONS: u8 = 8;

/// Seven independent dietary flags.
///
/// No combination is rejected; `vegan` and `vegetarian` may both be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct DietaryPreferences {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub nut_free: bool,
    pub halal: bool,
    pub kosher: bool,
}

/// Names one field of [`DietaryPreferences`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryFlag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutFree,
    Halal,
    Kosher,
}

impl DietaryFlag {
    /// All flags in display order.
    pub const ALL: [DietaryFlag; 7] = [
        Self::Vegetarian,
        Self::Vegan,
        Self::GlutenFree,
        Self::DairyFree,
        Self::NutFree,
        Self::Halal,
        Self::Kosher,
    ];

    /// Wire name, matching the serialized field of [`DietaryPreferences`].
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::GlutenFree => "gluten_free",
            Self::DairyFree => "dairy_free",
            Self::NutFree => "nut_free",
            Self::Halal => "halal",
            Self::Kosher => "kosher",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-free",
            Self::DairyFree => "Dairy-free",
            Self::NutFree => "Nut-free",
            Self::Halal => "Halal",
            Self::Kosher => "Kosher",
        }
    }
}

impl fmt::Display for DietaryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DietaryFlag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.key() == s)
            .ok_or_else(|| ValidationError::UnknownDietaryFlag(s.to_string()))
    }
}

impl DietaryPreferences {
    #[must_use]
    pub fn get(&self, flag: DietaryFlag) -> bool {
        match flag {
            DietaryFlag::Vegetarian => self.vegetarian,
            DietaryFlag::Vegan => self.vegan,
            DietaryFlag::GlutenFree => self.gluten_free,
            DietaryFlag::DairyFree => self.dairy_free,
            DietaryFlag::NutFree => self.nut_free,
            DietaryFlag::Halal => self.halal,
            DietaryFlag::Kosher => self.kosher,
        }
    }

    pub fn set(&mut self, flag: DietaryFlag, value: bool) {
        let slot = match flag {
            DietaryFlag::Vegetarian => &mut self.vegetarian,
            DietaryFlag::Vegan => &mut self.vegan,
            DietaryFlag::GlutenFree => &mut self.gluten_free,
            DietaryFlag::DairyFree => &mut self.dairy_free,
            DietaryFlag::NutFree => &mut self.nut_free,
            DietaryFlag::Halal => &mut self.halal,
            DietaryFlag::Kosher => &mut self.kosher,
        };
        *slot = value;
    }

    /// Flip a flag and return its new value.
    pub fn toggle(&mut self, flag: DietaryFlag) -> bool {
        let value = !self.get(flag);
        self.set(flag, value);
        value
    }

    /// Flags currently set, in display order.
    #[must_use]
    pub fn active_flags(&self) -> Vec<DietaryFlag> {
        DietaryFlag::ALL
            .into_iter()
            .filter(|flag| self.get(*flag))
            .collect()
    }
}

/// Cooking experience the recipes should assume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Input to a recipe generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    /// User-entered ingredient names, case preserved, in entry order.
    pub ingredients_available: Vec<String>,
    #[serde(default)]
    pub dietary_constraints: DietaryPreferences,
    pub portion_size: u8,
    pub max_recipes: usize,
    #[serde(default = "RecipeRequest::default_allow_substitutions")]
    pub allow_substitutions: bool,
    #[serde(default)]
    pub skill_level: SkillLevel,
}

impl RecipeRequest {
    fn default_allow_substitutions() -> bool {
        true
    }

    /// Check the request before handing it to a generator.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ingredients_available.is_empty() {
            return Err(ValidationError::NoIngredients);
        }
        if !(MIN_PORTIONS..=MAX_PORTIONS).contains(&self.portion_size) {
            return Err(ValidationError::PortionsOutOfRange(self.portion_size));
        }
        if self.max_recipes == 0 {
            return Err(ValidationError::NoRecipesRequested);
        }
        Ok(())
    }
}

/// Problems with user input that block a generation request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please add at least one ingredient")]
    NoIngredients,

    #[error("Portion size must be between 1 and 8, got {0}")]
    PortionsOutOfRange(u8),

    #[error("At least one recipe must be requested")]
    NoRecipesRequested,

    #[error("Unknown dietary preference: {0}")]
    UnknownDietaryFlag(String),
}
