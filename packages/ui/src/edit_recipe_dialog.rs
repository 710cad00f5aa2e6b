use dioxus::prelude::*;
use store::{Recipe, RecipeBook, RecipeEvent, RecipeForm, SubmitError};

use crate::icons::FaXmark;
use crate::notices::{push_notice, use_notices, NoticeLevel};
use crate::views::ModalOverlay;
use crate::{use_backend, Icon, RecipeFields};

/// Modal editor for an existing recipe.
///
/// Only title, ingredients and instructions can change. On success the
/// [`RecipeEvent::Updated`] is emitted and the parent closes the dialog; on
/// failure the dialog stays open with the edited values. `on_close` is called
/// for cancel and sends nothing; it is unavailable while a save is in flight.
#[component]
pub fn EditRecipeDialog(
    recipe: Recipe,
    on_event: EventHandler<RecipeEvent>,
    on_busy: EventHandler<bool>,
    on_close: EventHandler<()>,
) -> Element {
    let backend = use_backend();
    let id = recipe.id;
    let mut form = use_signal(|| RecipeForm::edit(&recipe));
    let mut notices = use_notices();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let begun = form.write().begin_submit();
        let draft = match begun {
            Ok(draft) => draft,
            Err(SubmitError::InFlight) => return,
            Err(e) => {
                push_notice(&mut notices, NoticeLevel::Error, &format!("Error updating recipe: {e}"));
                return;
            }
        };
        on_busy.call(true);
        let book = RecipeBook::new(backend.clone());
        spawn(async move {
            let outcome = book.update(id, &draft).await;
            form.write().finish_submit(&outcome);
            on_busy.call(false);
            match outcome {
                Ok(event) => {
                    on_event.call(event);
                    push_notice(&mut notices, NoticeLevel::Success, "Recipe updated successfully!");
                }
                Err(e) => {
                    push_notice(&mut notices, NoticeLevel::Error, &format!("Error updating recipe: {e}"));
                }
            }
        });
    };

    let submitting = form.read().is_submitting();

    rsx! {
        ModalOverlay {
            div {
                class: "modal-body",
                div {
                    class: "modal-header",
                    h2 { class: "modal-title", "Edit Recipe" }
                    button {
                        class: "modal-close",
                        title: "Close",
                        disabled: submitting,
                        onclick: move |_| on_close.call(()),
                        Icon { icon: FaXmark, width: 14, height: 14 }
                    }
                }

                form {
                    class: "recipe-form",
                    onsubmit: handle_submit,

                    RecipeFields { form, id_prefix: "edit-recipe" }

                    div {
                        class: "modal-actions",
                        button {
                            class: "btn btn--primary",
                            r#type: "submit",
                            disabled: submitting,
                            if submitting { "Saving..." } else { "Save Changes" }
                        }
                        button {
                            class: "btn btn--secondary",
                            r#type: "button",
                            disabled: submitting,
                            onclick: move |_| on_close.call(()),
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}
