//! Lookup and in-place patching of the editable cells of a request row.

use crate::shared::dom::{attr_selector, patch_badge, query, query_all, query_in, set_style, text_of};
use contracts::config::AdminConfig;
use contracts::error::{ApiError, RELOAD_HINT};
use contracts::shared::inline_edit::{
    display_value, payment_targets, Anchor, EditCommand, EditField, RowRef,
};
use contracts::shared::status_registry::BadgePatch;
use web_sys::Element;

/// Cell holding the control of `field` for a request
pub fn edit_cell(request_id: &str, field: EditField) -> Option<Element> {
    let id = attr_selector("data-request-id", request_id);
    match field {
        EditField::Payment => query(&format!("{}[data-current-payment]", id)),
        _ => query(&format!(".status-cell{}", id)),
    }
}

/// Container whose clicks do not count as "outside" for an open dropdown
pub fn container_in(cell: &Element, field: EditField) -> Option<Element> {
    let container = match field {
        EditField::Payment => ".payment-container",
        _ => ".status-container",
    };
    query_in(cell, container)
}

pub fn edit_container(request_id: &str, field: EditField) -> Option<Element> {
    edit_cell(request_id, field).and_then(|cell| container_in(&cell, field))
}

/// Dropdown position under the cell's edit button
pub fn anchor_for(container: &Element, field: EditField) -> Option<Anchor> {
    let button = match field {
        EditField::Payment => ".payment-edit-btn",
        _ => ".status-edit-btn",
    };
    let rect = query_in(container, button)?.get_bounding_client_rect();
    Some(Anchor::below(rect.left(), rect.bottom()))
}

/// Current value of the cell, updated on every successful patch;
/// `initial` is what the template rendered.
pub fn current_value(cell: &Element, field: EditField, initial: &str) -> String {
    let attribute = match field {
        EditField::Payment => "data-current-payment",
        _ => "data-current-status",
    };
    cell.get_attribute(attribute)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| initial.to_string())
}

fn patch_cell(cell: &Element, badge_selector: &str, attribute: &str, patch: &BadgePatch) -> bool {
    let Some(badge) = query_in(cell, badge_selector) else {
        return false;
    };
    patch_badge(&badge, patch);
    let _ = cell.set_attribute(attribute, &patch.data_value);
    true
}

fn order_id_of(cell: &Element) -> Option<String> {
    cell.get_attribute("data-order-id").or_else(|| {
        cell.closest("tr[data-order-id]")
            .ok()
            .flatten()
            .and_then(|row| row.get_attribute("data-order-id"))
    })
}

/// Reflect a successful edit on the page. A missing cell or badge is a
/// precondition failure: the change is stored but the page is stale.
pub fn apply_edit_result(command: &EditCommand, config: &AdminConfig) -> Result<(), ApiError> {
    match command {
        EditCommand::ChangeStatus { request_id, status } => {
            let patch = BadgePatch::status(*status);
            let cell = edit_cell(request_id.as_str(), EditField::RequestStatus)
                .ok_or_else(|| ApiError::precondition(RELOAD_HINT))?;
            if !patch_cell(&cell, ".status-badge", "data-current-status", &patch) {
                return Err(ApiError::precondition(RELOAD_HINT));
            }
            Ok(())
        }
        EditCommand::ChangePayment { request_id, paid } => {
            let cells = query_all("[data-request-id][data-current-payment]");
            let rows: Vec<RowRef> = cells
                .iter()
                .map(|cell| {
                    let order_id = order_id_of(cell);
                    RowRef::new(
                        cell.get_attribute("data-request-id").unwrap_or_default(),
                        order_id.as_deref(),
                    )
                })
                .collect();
            let targets = payment_targets(&rows, request_id.as_str(), config.payment_propagation);
            if targets.is_empty() {
                return Err(ApiError::precondition(RELOAD_HINT));
            }
            let patch = BadgePatch::payment(*paid);
            let patched = targets
                .iter()
                .filter(|&&idx| patch_cell(&cells[idx], ".payment-badge", "data-current-payment", &patch))
                .count();
            if patched < targets.len() {
                log::warn!("payment badge missing in {} of {} cells", targets.len() - patched, targets.len());
                return Err(ApiError::precondition(RELOAD_HINT));
            }
            Ok(())
        }
    }
}

/// Cell of an editable field (`data-field`) of a request
pub fn field_cell(request_id: &str, field: &str) -> Option<Element> {
    query(&format!(
        "{}{}",
        attr_selector("data-request-id", request_id),
        attr_selector("data-field", field)
    ))
}

/// Text currently shown for a field
pub fn shown_value(request_id: &str, field: &str) -> String {
    field_cell(request_id, field)
        .and_then(|cell| query_in(&cell, ".editable-value"))
        .map(|span| text_of(&span))
        .unwrap_or_default()
}

/// Show a saved value; a filled cell loses its validation highlight
pub fn show_saved_value(request_id: &str, field: &str, value: &str) -> Result<(), ApiError> {
    let cell = field_cell(request_id, field).ok_or_else(|| ApiError::precondition(RELOAD_HINT))?;
    if let Some(span) = query_in(&cell, ".editable-value") {
        span.set_text_content(Some(&display_value(field, value)));
    }
    if !value.is_empty() {
        set_style(&cell, "background-color", "");
    }
    Ok(())
}

/// Replace the text of a field's value span
pub fn show_text(request_id: &str, field: &str, text: &str) {
    if let Some(span) = field_cell(request_id, field).and_then(|cell| query_in(&cell, ".editable-value")) {
        span.set_text_content(Some(text));
    }
}
