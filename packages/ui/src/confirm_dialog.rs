use dioxus::prelude::*;

use crate::views::ModalOverlay;

/// Modal yes/no prompt guarding a destructive action.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            div {
                class: "modal-body",
                h2 { class: "modal-title", "{title}" }
                p { class: "modal-text", "{message}" }
                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn--danger",
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                    button {
                        class: "btn btn--secondary",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
