use dioxus::prelude::*;
use store::{Recipe, RecipeId};

use crate::icons::{FaPen, FaTrash};
use crate::Icon;

/// One recipe in the dashboard grid, with edit and delete controls.
#[component]
pub fn RecipeCard(
    recipe: Recipe,
    on_edit: EventHandler<Recipe>,
    on_delete: EventHandler<RecipeId>,
    #[props(default)] busy: bool,
) -> Element {
    let id = recipe.id;
    let for_edit = recipe.clone();

    rsx! {
        div {
            class: "recipe-card",
            div {
                class: "recipe-card-actions",
                button {
                    class: "icon-btn icon-btn--edit",
                    title: "Edit recipe",
                    onclick: move |_| on_edit.call(for_edit.clone()),
                    Icon { icon: FaPen, width: 16, height: 16 }
                }
                button {
                    class: "icon-btn icon-btn--delete",
                    title: "Delete recipe",
                    disabled: busy,
                    onclick: move |_| on_delete.call(id),
                    Icon { icon: FaTrash, width: 16, height: 16 }
                }
            }
            h2 { class: "recipe-title", "{recipe.title}" }
            div {
                class: "recipe-section",
                h3 { "Ingredients:" }
                ul {
                    for (index, ingredient) in recipe.ingredients.iter().enumerate() {
                        li { key: "{index}", "{ingredient}" }
                    }
                }
            }
            div {
                class: "recipe-section",
                h3 { "Instructions:" }
                p { class: "recipe-instructions", "{recipe.instructions}" }
            }
        }
    }
}
