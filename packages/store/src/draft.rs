//! Editable recipe fields as they sit in a form.

use uuid::Uuid;

use crate::error::DraftError;
use crate::ingredients::{join_ingredients, parse_ingredients};
use crate::models::{NewRecipe, Recipe, RecipeChanges};

/// The three text fields shared by the create and edit forms.
///
/// `ingredients` is the raw multi-line text; it is normalised only when the
/// draft is turned into a payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
}

impl RecipeDraft {
    /// An empty draft for the create form.
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft pre-populated from an existing recipe, one ingredient per line.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            ingredients: join_ingredients(&recipe.ingredients),
            instructions: recipe.instructions.clone(),
        }
    }

    /// Check the required fields and return the normalised ingredient list.
    pub fn validate(&self) -> Result<Vec<String>, DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        let ingredients = parse_ingredients(&self.ingredients);
        if ingredients.is_empty() {
            return Err(DraftError::MissingIngredients);
        }
        if self.instructions.trim().is_empty() {
            return Err(DraftError::MissingInstructions);
        }
        Ok(ingredients)
    }

    /// Insert payload owned by `owner`. Visibility is always private.
    pub fn to_new_recipe(&self, owner: Uuid) -> Result<NewRecipe, DraftError> {
        let ingredients = self.validate()?;
        Ok(NewRecipe::private(
            owner,
            self.title.clone(),
            ingredients,
            self.instructions.clone(),
        ))
    }

    /// Update payload carrying only the mutable columns.
    pub fn to_changes(&self) -> Result<RecipeChanges, DraftError> {
        let ingredients = self.validate()?;
        Ok(RecipeChanges {
            title: self.title.clone(),
            ingredients,
            instructions: self.instructions.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
