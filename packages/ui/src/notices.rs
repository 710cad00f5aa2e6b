//! User-facing notices: confirmations and write failures.
//!
//! Notices live in a `Signal<Notices>` provided at the application root. Each
//! one disappears on its own after [`NOTICE_TTL`] or when dismissed.

use std::time::Duration;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::icons::FaXmark;
use crate::Icon;

pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Notices {
    entries: Vec<Notice>,
    next_id: u64,
}

impl Notices {
    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }

    /// Append a notice and return its id.
    pub fn push(&mut self, level: NoticeLevel, message: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notice {
            id,
            level,
            message: message.to_string(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }
}

pub fn use_notices() -> Signal<Notices> {
    use_context::<Signal<Notices>>()
}

/// Show `message` and schedule its removal.
///
/// The timer runs in the root scope so it outlives the component that raised
/// the notice.
pub fn push_notice(notices: &mut Signal<Notices>, level: NoticeLevel, message: &str) {
    let id = notices.write().push(level, message);
    let mut notices = *notices;
    spawn_forever(async move {
        sleep(NOTICE_TTL).await;
        notices.write().dismiss(id);
    });
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[component]
pub fn NoticeStack() -> Element {
    let mut notices = use_notices();
    let entries = notices.read().entries().to_vec();

    rsx! {
        div {
            class: "notice-stack",
            role: "status",
            for notice in entries {
                div {
                    key: "{notice.id}",
                    class: match notice.level {
                        NoticeLevel::Error => "notice notice--error",
                        NoticeLevel::Success => "notice notice--success",
                        NoticeLevel::Info => "notice notice--info",
                    },
                    span { "{notice.message}" }
                    button {
                        class: "notice-dismiss",
                        title: "Dismiss",
                        onclick: move |_| notices.write().dismiss(notice.id),
                        Icon { icon: FaXmark, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}
