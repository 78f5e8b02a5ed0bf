//! Transient toast notices and the blocking browser dialogs.

use contracts::error::{ApiError, NoticeLevel};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    id: u64,
    level: NoticeLevel,
    message: String,
}

/// Toast queue of the page. Each notice removes itself after the configured lifetime.
#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
    duration_ms: StoredValue<u32>,
}

impl ToastService {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
            duration_ms: StoredValue::new(duration_ms),
        }
    }

    pub fn show(&self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        if message.trim().is_empty() {
            return;
        }
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|t| t.push(Toast { id, level, message }));

        let svc = *self;
        let duration = self.duration_ms.get_value();
        spawn_local(async move {
            TimeoutFuture::new(duration).await;
            svc.toasts.update(|t| t.retain(|toast| toast.id != id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(NoticeLevel::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(NoticeLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(NoticeLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(NoticeLevel::Error, message);
    }

    /// Log a failure and surface it: the main notice plus one error per detail.
    pub fn report(&self, err: &ApiError, fallback: &str) {
        match err.level() {
            NoticeLevel::Warning => log::warn!("{}", err),
            _ => log::error!("{}", err),
        }
        self.show(err.level(), err.user_message(fallback));
        for detail in err.details() {
            self.error(detail.clone());
        }
    }
}

/// Renders the toast queue. Mounted once by the overlay root.
#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_context::<ToastService>().expect("ToastService not provided in context");

    view! {
        <div
            class="notification-stack"
            style="position: fixed; top: 20px; right: 20px; z-index: 10000; display: flex; flex-direction: column; gap: 8px;"
        >
            <For
                each=move || svc.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let style = format!(
                        "padding: 12px 20px; background: {}; color: white; border-radius: 6px; animation: slideIn 0.3s ease;",
                        toast.level.background()
                    );
                    view! {
                        <div class=toast.level.class_name() style=style>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

/// Blocking `alert()`
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Blocking `confirm()`; `false` when no window is available
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
