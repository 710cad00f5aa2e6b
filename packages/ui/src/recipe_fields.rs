use dioxus::prelude::*;
use store::RecipeForm;

/// Title, ingredients and instructions inputs bound to a form signal.
#[component]
pub fn RecipeFields(form: Signal<RecipeForm>, id_prefix: String) -> Element {
    let mut form = form;
    let draft = form.read().draft.clone();

    rsx! {
        div {
            class: "form-field",
            label { r#for: "{id_prefix}-title", "Recipe Title" }
            input {
                id: "{id_prefix}-title",
                r#type: "text",
                required: true,
                value: "{draft.title}",
                oninput: move |evt: FormEvent| form.write().draft.title = evt.value(),
            }
        }

        div {
            class: "form-field",
            label { r#for: "{id_prefix}-ingredients", "Ingredients (one per line)" }
            textarea {
                id: "{id_prefix}-ingredients",
                required: true,
                rows: "5",
                value: "{draft.ingredients}",
                oninput: move |evt: FormEvent| form.write().draft.ingredients = evt.value(),
            }
        }

        div {
            class: "form-field",
            label { r#for: "{id_prefix}-instructions", "Instructions" }
            textarea {
                id: "{id_prefix}-instructions",
                required: true,
                rows: "5",
                value: "{draft.instructions}",
                oninput: move |evt: FormEvent| form.write().draft.instructions = evt.value(),
            }
        }
    }
}
