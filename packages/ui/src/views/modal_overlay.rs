use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a modal card.
/// Clicks outside the card are ignored; the children provide the only way out.
#[component]
pub fn ModalOverlay(children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            style: "z-index: 2000",
            div {
                class: "modal-card",
                role: "dialog",
                aria_modal: "true",
                {children}
            }
        }
    }
}
