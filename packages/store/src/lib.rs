pub mod backend;
pub mod book;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod form;
pub mod ingredients;
pub mod models;

#[cfg(test)]
mod memory;
#[cfg(test)]
pub use memory::MemoryBackend;

pub use backend::{AuthBackend, RecipeTable, SessionState, SessionWatch};
pub use book::{RecipeBook, RecipeEvent};
pub use dashboard::{Dashboard, Followup};
pub use draft::RecipeDraft;
pub use error::{BackendError, DraftError, SubmitError};
pub use form::{FormTarget, RecipeForm};
pub use ingredients::{join_ingredients, parse_ingredients};
pub use models::{
    NewRecipe, Recipe, RecipeChanges, RecipeId, Session, SessionUser, SignUpOutcome,
};
