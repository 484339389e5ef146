//! Local recipe synthesis from fixed templates.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::random::{RandomSource, SeededRandom};
use super::{GenerationError, RecipeGenerator};
use crate::domain::{Ingredient, MissingIngredient, Nutrition, Recipe, RecipeRequest};

/// Upper bound on recipes per request, regardless of `max_recipes`.
pub const MAX_RECIPES_PER_REQUEST: usize = 5;

/// How many of the user's ingredients end up on a recipe.
const INGREDIENTS_PER_RECIPE: usize = 4;

const PANTRY_EXTRAS: [&str; 3] = ["soy sauce", "sesame oil", "ginger"];

struct RecipeTemplate {
    /// Title with one `{}` slot for an ingredient name.
    title: &'static str,
    /// Index into `ingredients_available` used for the title slot.
    slot: usize,
    /// Title word when the slot is empty.
    fallback: &'static str,
    prep_minutes: u32,
    /// Steps; a `{}` takes ingredient 0 or `step_fallback`.
    steps: &'static [&'static str],
    step_fallback: &'static str,
}

const TEMPLATES: [RecipeTemplate; MAX_RECIPES_PER_REQUEST] = [
    RecipeTemplate {
        title: "Savory {} Bowl",
        slot: 0,
        fallback: "Protein",
        prep_minutes: 25,
        steps: &[
            "Prepare and season {} with salt and pepper.",
            "Heat olive oil in a large pan over medium-high heat.",
            "Cook until golden brown on all sides, about 6-8 minutes.",
            "Add remaining ingredients and stir-fry for 5 minutes.",
            "Season to taste and serve hot.",
        ],
        step_fallback: "your protein",
    },
    RecipeTemplate {
        title: "Quick {} Stir-Fry",
        slot: 1,
        fallback: "Veggie",
        prep_minutes: 20,
        steps: &[
            "Chop all vegetables into bite-sized pieces.",
            "Heat a wok or large pan over high heat.",
            "Add oil and stir-fry vegetables for 3-4 minutes.",
            "Add sauce ingredients and toss to combine.",
            "Serve immediately over rice or noodles.",
        ],
        step_fallback: "",
    },
    RecipeTemplate {
        title: "Healthy {} Salad",
        slot: 2,
        fallback: "Garden",
        prep_minutes: 15,
        steps: &[
            "Wash and dry all greens thoroughly.",
            "Prepare the dressing by whisking ingredients together.",
            "Arrange vegetables in a large bowl.",
            "Drizzle with dressing and toss gently.",
            "Top with seeds or nuts and serve fresh.",
        ],
        step_fallback: "",
    },
    RecipeTemplate {
        title: "Comforting {} Soup",
        slot: 0,
        fallback: "Home",
        prep_minutes: 35,
        steps: &[
            "Dice all vegetables into small, uniform pieces.",
            "Sauté aromatics in a large pot until fragrant.",
            "Add broth and bring to a simmer.",
            "Add remaining ingredients and cook for 20 minutes.",
            "Season to taste and serve with crusty bread.",
        ],
        step_fallback: "",
    },
    RecipeTemplate {
        title: "Crispy {} Bites",
        slot: 1,
        fallback: "Veggie",
        prep_minutes: 30,
        steps: &[
            "Preheat oven to 400°F (200°C).",
            "Mix ingredients with seasonings in a bowl.",
            "Form into small patties or balls.",
            "Arrange on a lined baking sheet.",
            "Bake for 20-25 minutes until crispy and golden.",
        ],
        step_fallback: "",
    },
];

impl RecipeTemplate {
    fn title_for(&self, ingredients: &[String]) -> String {
        let name = ingredients
            .get(self.slot)
            .map_or(self.fallback, String::as_str);
        self.title.replace("{}", name)
    }

    fn steps_for(&self, ingredients: &[String]) -> Vec<String> {
        let name = ingredients
            .first()
            .map_or(self.step_fallback, String::as_str);
        self.steps
            .iter()
            .map(|step| step.replace("{}", name))
            .collect()
    }
}

/// Build the recipes for `request` without any delay.
///
/// Every random draw goes through `random`, so a seeded source gives
/// reproducible output apart from the recipe ids.
pub fn synthesize(request: &RecipeRequest, random: &mut dyn RandomSource) -> Vec<Recipe> {
    let count = request.max_recipes.min(MAX_RECIPES_PER_REQUEST);
    let constraints = &request.dietary_constraints;

    (0..count)
        .map(|i| {
            let template = &TEMPLATES[i % TEMPLATES.len()];

            let ingredients = request
                .ingredients_available
                .iter()
                .take(INGREDIENTS_PER_RECIPE)
                .enumerate()
                .map(|(idx, name)| Ingredient {
                    name: name.clone(),
                    quantity: format!("{}g", random.next_in_range(100..400)),
                    substitution: (idx == 0 && constraints.vegan).then(|| "tofu".to_string()),
                })
                .collect();

            let missing_ingredients = if random.chance(0.5) {
                let pick = random.next_in_range(0..PANTRY_EXTRAS.len() as u32) as usize;
                let substitution = if constraints.gluten_free {
                    "tamari (gluten-free)"
                } else {
                    "coconut aminos"
                };
                vec![MissingIngredient {
                    name: PANTRY_EXTRAS[pick].to_string(),
                    suggested_substitution: substitution.to_string(),
                }]
            } else {
                Vec::new()
            };

            let nutrition = Nutrition {
                calories_per_serving: random.next_in_range(300..600),
                protein_g: random.next_in_range(15..40),
                carbs_g: random.next_in_range(20..60),
                fat_g: random.next_in_range(8..23),
            };

            Recipe {
                id: format!("recipe-{}", Uuid::new_v4()),
                title: template.title_for(&request.ingredients_available),
                prep_time_minutes: template.prep_minutes,
                servings: request.portion_size,
                ingredients,
                missing_ingredients,
                instructions: template.steps_for(&request.ingredients_available),
                nutrition,
                image_url: None,
            }
        })
        .collect()
}

/// Generator that synthesizes recipes locally after a simulated delay.
#[derive(Debug)]
pub struct TemplateGenerator {
    delay: Duration,
    random: Mutex<Box<dyn RandomSource>>,
}

impl TemplateGenerator {
    /// Generator drawing from OS entropy.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self::with_random(delay, Box::new(SeededRandom::from_entropy()))
    }

    /// Generator drawing from the given source.
    #[must_use]
    pub fn with_random(delay: Duration, random: Box<dyn RandomSource>) -> Self {
        Self {
            delay,
            random: Mutex::new(random),
        }
    }
}

#[async_trait]
impl RecipeGenerator for TemplateGenerator {
    async fn generate(&self, request: &RecipeRequest) -> Result<Vec<Recipe>, GenerationError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let recipes = {
            let mut random = self.random.lock().unwrap_or_else(PoisonError::into_inner);
            synthesize(request, random.as_mut())
        };

        tracing::debug!(
            name: "generation.synthesized",
            count = recipes.len(),
            ingredients = request.ingredients_available.len(),
            "Synthesized recipes from templates"
        );

        Ok(recipes)
    }

    fn provider_name(&self) -> &'static str {
        "template"
    }
}
