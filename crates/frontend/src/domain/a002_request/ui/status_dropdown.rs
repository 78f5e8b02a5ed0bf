//! Status and payment dropdowns of the request rows.
//!
//! At most one dropdown is open per page (`PageContext::dropdown`). It is
//! rendered by `DropdownHost` at a fixed position under the edit button, so it
//! is never clipped by the table cell.

use super::cells;
use crate::domain::a002_request::api;
use crate::layout::global_context::{use_page, PageContext};
use contracts::domain::a002_request::PaymentStatus;
use contracts::shared::inline_edit::{DropdownChoice, DropdownKey, DropdownSlot, EditField};
use contracts::shared::status_registry::{describe, options, payment_options};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

/// Toggle the dropdown of `field` for a request row
pub fn open_dropdown(page: PageContext, request_id: &str, initial: &str, field: EditField) {
    let Some(cell) = cells::edit_cell(request_id, field) else {
        log::error!("edit cell not found for request {}", request_id);
        return;
    };
    let Some(anchor) = cells::container_in(&cell, field).and_then(|c| cells::anchor_for(&c, field)) else {
        log::error!("edit container not found for request {}", request_id);
        return;
    };
    let current = cells::current_value(&cell, field, initial);
    page.dropdown.update(|slot| {
        slot.trigger(DropdownKey::new(request_id, field), anchor, current);
    });
}

/// Apply the picked item: close, call the API, then patch the row
pub fn choose(page: PageContext, choice: DropdownChoice) {
    let mut command = None;
    page.dropdown.update(|slot| command = slot.select(choice));
    let Some(command) = command else {
        return;
    };

    spawn_local(async move {
        let config = page.config();
        match api::apply_edit(&config, &command).await {
            Ok(()) => match cells::apply_edit_result(&command, &config) {
                Ok(()) => page.toasts.success(command.success_message()),
                Err(e) => page.toasts.report(&e, command.failure_message()),
            },
            Err(e) => page.toasts.report(&e, command.transport_message()),
        }
    });
}

/// Whether a document click should leave the open dropdown alone
fn is_inside(slot: &DropdownSlot, target: &Element) -> bool {
    let in_dropdown = target
        .closest(".status-dropdown, .payment-dropdown")
        .ok()
        .flatten()
        .is_some();
    if in_dropdown {
        return true;
    }
    slot.open_key()
        .and_then(|key| cells::edit_container(key.request_id.as_str(), key.field))
        .map(|container| container.contains(Some(target)))
        .unwrap_or(false)
}

#[derive(Clone)]
struct Item {
    label: String,
    dot_style: String,
    is_current: bool,
    allowed: bool,
    choice: DropdownChoice,
}

fn items(page: PageContext, field: EditField, current: &str) -> Vec<Item> {
    match field.status_kind() {
        Some(kind) => {
            if describe(kind, current).is_none() {
                log::warn!("unknown {:?} status '{}' on the page", kind, current);
            }
            options(kind, current, page.transitions())
                .into_iter()
                .map(|opt| Item {
                    label: opt.label(),
                    dot_style: opt.descriptor.dot_style(),
                    is_current: opt.is_current,
                    allowed: opt.allowed,
                    choice: DropdownChoice::Status(opt.status),
                })
                .collect()
        }
        None => {
            let paid = PaymentStatus::from_data_value(current).is_paid();
            payment_options(paid)
                .into_iter()
                .map(|opt| Item {
                    label: opt.label(),
                    dot_style: opt.descriptor.dot_style(),
                    is_current: opt.is_current,
                    allowed: true,
                    choice: DropdownChoice::Payment(opt.paid),
                })
                .collect()
        }
    }
}

/// Renders the open dropdown, if any. Mounted once by the overlay root.
#[component]
pub fn DropdownHost() -> impl IntoView {
    let page = use_page();

    // Клик вне контейнера закрывает список
    let _ = window_event_listener(leptos::ev::click, move |ev| {
        if !page.dropdown.with_untracked(|s| s.is_open()) {
            return;
        }
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if !page.dropdown.with_untracked(|slot| is_inside(slot, &target)) {
            page.dropdown.update(|slot| slot.dismiss());
        }
    });

    move || {
        let DropdownSlot::Open { key, anchor, current } = page.dropdown.get() else {
            return None;
        };
        let field = key.field;
        let rows = items(page, field, &current)
            .into_iter()
            .map(|item| {
                let choice = item.choice.clone();
                let allowed = item.allowed;
                let text_style = if item.is_current { "font-weight: 600;" } else { "" };
                let item_style = if allowed { "" } else { "opacity: 0.4; cursor: not-allowed;" };
                view! {
                    <div
                        class=field.item_class()
                        style=item_style
                        on:click=move |_| {
                            if allowed {
                                choose(page, choice.clone());
                            }
                        }
                    >
                        <span class="status-dot" style=item.dot_style></span>
                        <span style=text_style>{item.label}</span>
                    </div>
                }
            })
            .collect_view();

        Some(view! {
            <div class=field.dropdown_class() style=anchor.style()>
                {rows}
            </div>
        })
    }
}
