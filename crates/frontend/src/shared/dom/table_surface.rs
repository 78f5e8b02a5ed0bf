//! Pointer interactions on the admin table: column resize handles and the
//! hover highlight shared by all rows of one order.
//!
//! Listeners sit on the window and look at the event target, so rows
//! re-appended by a sort keep working.

use super::table::TableAdapter;
use super::{attr_selector, query_all, set_style};
use crate::layout::global_context::use_page;
use contracts::shared::table_layout::{
    ColumnDrag, HoverChange, RowHover, FIT_TRANSITION_MS, MERGED_ROW_HOVER,
};
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent};

fn target_element(ev: &MouseEvent) -> Option<Element> {
    ev.target()?.dyn_into::<Element>().ok()
}

/// Header cell owning the resize handle under the pointer, with its index
fn resize_target(ev: &MouseEvent) -> Option<(usize, Element)> {
    let handle = target_element(ev)?;
    if !handle.class_list().contains("resize-handle") {
        return None;
    }
    let th = handle.parent_element()?;
    let row = th.parent_element()?;
    let children = row.children();
    let index = (0..children.length()).position(|i| children.item(i).as_ref() == Some(&th))?;
    Some((index, handle))
}

fn set_column_width(th: &Element, width: f64) {
    let px = format!("{}px", width);
    set_style(th, "width", &px);
    set_style(th, "min-width", &px);
}

fn set_body_cursor(cursor: &str) {
    if let Some(body) = super::document().and_then(|d| d.body()) {
        let _ = body.style().set_property("cursor", cursor);
    }
}

fn apply_hover(change: &HoverChange) {
    if let Some(order_id) = &change.leave {
        for row in query_all(&format!("tr{}", attr_selector("data-order-id", order_id))) {
            let _ = row.class_list().remove_1(MERGED_ROW_HOVER);
        }
    }
    if let Some(order_id) = &change.enter {
        for row in query_all(&format!("tr{}", attr_selector("data-order-id", order_id))) {
            let _ = row.class_list().add_1(MERGED_ROW_HOVER);
        }
    }
}

/// Order id of the row whose merged cell is under the pointer
fn hovered_order(ev: &MouseEvent) -> Option<String> {
    target_element(ev)?
        .closest(".merged-cell")
        .ok()
        .flatten()?
        .closest("tr")
        .ok()
        .flatten()?
        .get_attribute("data-order-id")
}

/// Installs the table listeners. Mounted once by the overlay root.
#[component]
pub fn TableSurface() -> impl IntoView {
    let page = use_page();
    let drag = StoredValue::new(None::<ColumnDrag>);
    let hover = StoredValue::new(RowHover::default());
    let table = move || TableAdapter::find(&page.with_config(|c| c.table_id.clone()));

    let _ = window_event_listener(ev::mousedown, move |ev| {
        let Some((index, handle)) = resize_target(&ev) else {
            return;
        };
        let Some(th) = table().and_then(|t| t.header_cell(index)) else {
            return;
        };
        drag.set_value(Some(ColumnDrag::start(
            index,
            f64::from(ev.page_x()),
            f64::from(th.offset_width()),
        )));
        let _ = handle.class_list().add_1("resizing");
        set_body_cursor("col-resize");
        ev.prevent_default();
    });

    let _ = window_event_listener(ev::mousemove, move |ev| {
        let Some(current) = drag.get_value() else {
            return;
        };
        let Some(width) = current.width_at(f64::from(ev.page_x())) else {
            return;
        };
        if let Some(th) = table().and_then(|t| t.header_cell(current.column)) {
            set_column_width(&th, width);
        }
    });

    let _ = window_event_listener(ev::mouseup, move |_| {
        if drag.get_value().is_none() {
            return;
        }
        drag.set_value(None);
        set_body_cursor("default");
        for handle in query_all(".resize-handle.resizing") {
            let _ = handle.class_list().remove_1("resizing");
        }
    });

    // Двойной клик по ручке подгоняет ширину под содержимое
    let _ = window_event_listener(ev::dblclick, move |ev| {
        let Some((index, _)) = resize_target(&ev) else {
            return;
        };
        ev.prevent_default();
        let Some(table) = table() else {
            return;
        };
        let Some(th) = table.header_cell(index) else {
            return;
        };
        let width = table.fit_column_width(index);
        log::debug!("auto-fit column {} to {}px", index, width);
        set_style(&th, "transition", "width 0.2s ease");
        set_column_width(&th, width);
        spawn_local(async move {
            TimeoutFuture::new(FIT_TRANSITION_MS).await;
            set_style(&th, "transition", "");
        });
    });

    let _ = window_event_listener(ev::mouseover, move |ev| {
        let order_id = hovered_order(&ev);
        let change = hover.try_update_value(|h| h.point_at(order_id.as_deref()));
        if let Some(change) = change.filter(|c| !c.is_empty()) {
            apply_hover(&change);
        }
    });
}
