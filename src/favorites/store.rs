//! In-memory favorites collection, written through to storage.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::storage::FavoritesStorage;
use crate::domain::Recipe;

/// The user's favorited recipes, unique by id, in insertion order.
///
/// Cloning is cheap; clones share the same collection.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    inner: Arc<FavoritesInner>,
}

#[derive(Debug)]
struct FavoritesInner {
    recipes: RwLock<Vec<Recipe>>,
    storage: Arc<dyn FavoritesStorage>,
}

impl FavoritesStore {
    /// Load the collection from `storage`.
    ///
    /// Load failures are logged and yield an empty collection.
    pub async fn hydrate(storage: Arc<dyn FavoritesStorage>) -> Self {
        let recipes = match storage.load().await {
            Ok(recipes) => {
                let loaded = recipes.len();
                let recipes = dedup_by_id(recipes);
                tracing::info!(
                    name: "favorites.hydrated",
                    count = recipes.len(),
                    duplicates = loaded - recipes.len(),
                    "Favorites loaded"
                );
                recipes
            }
            Err(e) => {
                tracing::warn!(
                    name: "favorites.load_failed",
                    error = %e,
                    "Failed to parse favorites, starting empty"
                );
                Vec::new()
            }
        };

        Self {
            inner: Arc::new(FavoritesInner {
                recipes: RwLock::new(recipes),
                storage,
            }),
        }
    }

    pub async fn is_favorite(&self, recipe_id: &str) -> bool {
        self.inner
            .recipes
            .read()
            .await
            .iter()
            .any(|r| r.id == recipe_id)
    }

    /// Remove the recipe if present, otherwise append it.
    ///
    /// Returns `true` when the recipe is a favorite afterwards.
    pub async fn toggle_favorite(&self, recipe: &Recipe) -> bool {
        let mut guard = self.inner.recipes.write().await;
        let now_favorite = if let Some(pos) = guard.iter().position(|r| r.same_entity(recipe)) {
            guard.remove(pos);
            false
        } else {
            guard.push(recipe.clone());
            true
        };

        tracing::debug!(
            recipe_id = %recipe.id,
            favorite = now_favorite,
            "Toggled favorite"
        );
        self.persist(&guard).await;
        now_favorite
    }

    /// Remove a recipe by id. Absent ids are a no-op.
    ///
    /// Returns `true` if something was removed.
    pub async fn remove_favorite(&self, recipe_id: &str) -> bool {
        let mut guard = self.inner.recipes.write().await;
        let before = guard.len();
        guard.retain(|r| r.id != recipe_id);
        if guard.len() == before {
            return false;
        }

        self.persist(&guard).await;
        true
    }

    /// Snapshot of the collection in insertion order.
    pub async fn list(&self) -> Vec<Recipe> {
        self.inner.recipes.read().await.clone()
    }

    pub async fn get(&self, recipe_id: &str) -> Option<Recipe> {
        self.inner
            .recipes
            .read()
            .await
            .iter()
            .find(|r| r.id == recipe_id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Write the collection while the caller still holds the write lock, so
    /// storage always ends up with the latest mutation.
    async fn persist(&self, recipes: &[Recipe]) {
        if let Err(e) = self.inner.storage.save(recipes).await {
            tracing::error!(
                name: "favorites.save_failed",
                error = %e,
                count = recipes.len(),
                "Failed to persist favorites"
            );
        }
    }
}

fn dedup_by_id(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut unique: Vec<Recipe> = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        if !unique.iter().any(|r| r.same_entity(&recipe)) {
            unique.push(recipe);
        }
    }
    unique
}
