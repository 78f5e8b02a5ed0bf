//! Modal layers over the admin table.
//!
//! Modals are pushed with a builder and rendered by [`ModalHost`]; the last
//! pushed one is the top layer and the only one Escape reaches.

use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen_futures::spawn_local;

const BASE_Z_INDEX: i32 = 1000;

type Builder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;
type CloseGuard = Arc<dyn Fn() -> bool + Send + Sync>;

/// Surface options of a pushed modal
#[derive(Clone, Default)]
pub struct ModalOptions {
    style: Option<String>,
    class: Option<String>,
    guard: Option<CloseGuard>,
}

impl ModalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(self, style: impl Into<String>) -> Self {
        Self {
            style: Some(style.into()),
            ..self
        }
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..self
        }
    }

    /// Overlay click and Escape only dismiss the modal when `guard` returns true.
    /// The guard may run its own close path and return false.
    pub fn guard(self, guard: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Self {
            guard: Some(Arc::new(guard)),
            ..self
        }
    }

    fn allows_dismiss(&self) -> bool {
        self.guard.as_ref().map_or(true, |guard| guard())
    }
}

#[derive(Clone)]
struct Layer {
    id: u64,
    builder: Builder,
    options: ModalOptions,
}

/// Given to a modal's builder so the modal can close itself.
#[derive(Clone, Copy)]
pub struct ModalHandle {
    id: u64,
    modals: ModalStackService,
}

impl ModalHandle {
    /// Close on the next tick, bypassing the guard
    pub fn close(&self) {
        self.modals.close_deferred(self.id);
    }
}

#[derive(Clone, Copy)]
pub struct ModalStackService {
    layers: RwSignal<Vec<Layer>>,
    last_id: StoredValue<u64>,
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            layers: RwSignal::new(Vec::new()),
            last_id: StoredValue::new(0),
        }
    }

    pub fn push<F>(&self, options: ModalOptions, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.last_id.update_value(|id| *id += 1);
        let id = self.last_id.get_value();
        let builder: Builder = Arc::new(builder);
        self.layers.update(|layers| {
            layers.push(Layer {
                id,
                builder,
                options,
            })
        });
        ModalHandle { id, modals: *self }
    }

    pub fn close(&self, id: u64) {
        self.layers.update(|layers| layers.retain(|layer| layer.id != id));
    }

    /// Removing a layer inside its own click dispatch would drop the running handler
    pub fn close_deferred(&self, id: u64) {
        let modals = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            modals.close(id);
        });
    }

    /// Overlay click or Escape on the layer `id`
    fn dismiss(&self, id: u64) {
        let options = self.layers.with_untracked(|layers| {
            layers
                .iter()
                .find(|layer| layer.id == id)
                .map(|layer| layer.options.clone())
        });
        if options.is_some_and(|o| o.allows_dismiss()) {
            self.close_deferred(id);
        }
    }

    fn top_id(&self) -> Option<u64> {
        self.layers
            .with_untracked(|layers| layers.last().map(|layer| layer.id))
    }
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders every layer. Mounted once by the overlay root.
#[component]
pub fn ModalHost() -> impl IntoView {
    let modals = use_context::<ModalStackService>().expect("ModalStackService not provided");

    // Host lives as long as the page
    let _ = window_event_listener(ev::keydown, move |ev| {
        if ev.key() != "Escape" {
            return;
        }
        if let Some(id) = modals.top_id() {
            modals.dismiss(id);
        }
    });

    let layers = move || {
        modals.layers.with(|layers| {
            layers
                .iter()
                .cloned()
                .zip(BASE_Z_INDEX..)
                .collect::<Vec<_>>()
        })
    };

    view! {
        <For
            each=layers
            key=|(layer, _)| layer.id
            children=move |(layer, z_index)| {
                let id = layer.id;
                let content = (layer.builder)(ModalHandle { id, modals });
                view! {
                    <ModalFrame
                        z_index=z_index
                        on_close=Callback::new(move |_| modals.dismiss(id))
                        modal_class=layer.options.class.unwrap_or_default()
                        modal_style=layer.options.style.unwrap_or_default()
                    >
                        {content}
                    </ModalFrame>
                }
            }
        />
    }
}
