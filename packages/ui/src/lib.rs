//! This crate contains all shared UI for Recipe Vault.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const RECIPES_CSS: Asset = asset!("/assets/styling/recipes.css");

mod backend;
pub use backend::{use_backend, Backend};

pub mod notices;
pub use notices::{push_notice, use_notices, NoticeLevel, NoticeStack, Notices};

mod auth_panel;
pub use auth_panel::{AuthMode, AuthPanel};

mod recipe_fields;
pub use recipe_fields::RecipeFields;

mod recipe_form;
pub use recipe_form::AddRecipeForm;

mod edit_recipe_dialog;
pub use edit_recipe_dialog::EditRecipeDialog;

mod recipe_card;
pub use recipe_card::RecipeCard;

mod confirm_dialog;
pub use confirm_dialog::ConfirmDialog;
