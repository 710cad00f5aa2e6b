use dioxus::prelude::*;
use store::{RecipeBook, RecipeEvent, RecipeForm, Session, SubmitError};

use crate::notices::{push_notice, use_notices, NoticeLevel};
use crate::{use_backend, RecipeFields};

/// Inline form for adding a recipe owned by the signed-in user.
///
/// Emits the [`RecipeEvent`] of a successful insert; the parent decides what
/// to refresh or hide. `on_busy` brackets the request so the parent keeps the
/// form mounted until it settles.
#[component]
pub fn AddRecipeForm(
    session: Session,
    on_event: EventHandler<RecipeEvent>,
    on_busy: EventHandler<bool>,
) -> Element {
    let backend = use_backend();
    let mut form = use_signal(RecipeForm::create);
    let mut notices = use_notices();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let begun = form.write().begin_submit();
        let draft = match begun {
            Ok(draft) => draft,
            Err(SubmitError::InFlight) => return,
            Err(e) => {
                push_notice(&mut notices, NoticeLevel::Error, &format!("Error adding recipe: {e}"));
                return;
            }
        };
        on_busy.call(true);
        let book = RecipeBook::new(backend.clone());
        let session = session.clone();
        spawn(async move {
            let outcome = book.create(&session, &draft).await;
            form.write().finish_submit(&outcome);
            on_busy.call(false);
            match outcome {
                Ok(event) => {
                    on_event.call(event);
                    push_notice(&mut notices, NoticeLevel::Success, "Recipe added successfully!");
                }
                Err(e) => {
                    push_notice(&mut notices, NoticeLevel::Error, &format!("Error adding recipe: {e}"));
                }
            }
        });
    };

    let submitting = form.read().is_submitting();

    rsx! {
        form {
            class: "recipe-form",
            onsubmit: handle_submit,

            RecipeFields { form, id_prefix: "new-recipe" }

            button {
                class: "btn btn--primary",
                r#type: "submit",
                disabled: submitting,
                if submitting { "Adding..." } else { "Add Recipe" }
            }
        }
    }
}
