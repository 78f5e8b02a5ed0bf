//! Attachment point of the admin page.
//!
//! The table itself is server-rendered; the page creates one [`AdminPage`]
//! and forwards its inline handlers to it. Dropdowns, modals and toasts are
//! rendered by the overlay root mounted here.

use crate::domain::a001_order::ui::add_order::open_add_order;
use crate::domain::a001_order::ui::delete_confirm::delete_selected;
use crate::domain::a002_request::api::download_url;
use crate::domain::a002_request::ui::field_edit::{open_field_edit, open_file_dialog, update_field_inline};
use crate::domain::a002_request::ui::status_dropdown::{open_dropdown, DropdownHost};
use crate::layout::global_context::PageContext;
use crate::shared::collator::KoreanCollator;
use crate::shared::dom::table::{mark_sorted_header, TableAdapter};
use crate::shared::dom::table_surface::TableSurface;
use crate::shared::dom::{open_in_new_window, selection};
use crate::shared::modal_stack::ModalHost;
use crate::shared::notify::ToastHost;
use crate::usecases::u501_bulk_send;
use contracts::config::AdminConfig;
use contracts::shared::inline_edit::EditField;
use contracts::usecases::u501_bulk_send::NotificationKind;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Overlay root: provides the page services, hooks the table and renders the hosts
#[component]
pub fn App(page: PageContext) -> impl IntoView {
    provide_context(page);
    provide_context(page.modals);
    provide_context(page.toasts);

    view! {
        <TableSurface />
        <DropdownHost />
        <ModalHost />
        <ToastHost />
    }
}

/// Configuration passed by the page: a JSON string, a plain object or nothing.
/// Anything unreadable falls back to the defaults.
fn read_config(value: JsValue) -> AdminConfig {
    let parsed = if value.is_undefined() || value.is_null() {
        Ok(AdminConfig::default())
    } else if let Some(json) = value.as_string() {
        AdminConfig::from_json(&json).map_err(|e| format!("{:#}", e))
    } else {
        serde_wasm_bindgen::from_value::<AdminConfig>(value).map_err(|e| e.to_string())
    };
    parsed.unwrap_or_else(|e| {
        log::warn!("admin page config ignored: {}", e);
        AdminConfig::default()
    })
}

/// Controller of one server-rendered admin table
#[wasm_bindgen]
pub struct AdminPage {
    page: PageContext,
}

#[wasm_bindgen]
impl AdminPage {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> AdminPage {
        let config = read_config(config);
        log::debug!("attaching admin page to #{}", config.table_id);
        let page = PageContext::new(config);
        leptos::mount::mount_to_body(move || view! { <App page=page /> });
        AdminPage { page }
    }

    /// Status badge click; `status_type` is "order" or "request"
    pub fn edit_status(&self, request_id: &str, current_status: &str, status_type: &str) {
        open_dropdown(
            self.page,
            request_id,
            current_status,
            EditField::for_status_type(status_type),
        );
    }

    pub fn edit_payment(&self, request_id: &str, current_payment: &str) {
        open_dropdown(self.page, request_id, current_payment, EditField::Payment);
    }

    pub fn edit_field(&self, request_id: &str, field: &str, field_type: &str) {
        open_field_edit(self.page, request_id, field, field_type);
    }

    pub fn update_field(&self, request_id: &str, field: &str, value: &str) {
        update_field_inline(self.page, request_id, field, value);
    }

    pub fn open_file_dialog(&self, request_id: &str, field: &str) {
        open_file_dialog(self.page, request_id, field);
    }

    pub fn download_file(&self, file_key: &str) {
        let url = self.page.with_config(|c| download_url(c, file_key));
        open_in_new_window(&url);
    }

    /// Header click: same column toggles the direction, another starts ascending
    pub fn sort_table(&self, column: &str) {
        let table_id = self.page.with_config(|c| c.table_id.clone());
        let Some(table) = TableAdapter::find(&table_id) else {
            log::error!("table #{} not found", table_id);
            return;
        };
        let next = self.page.sort.with_untracked(|s| s.next(column));
        let Some(direction) = next.direction else {
            return;
        };
        if table.sort(column, direction, &KoreanCollator::new()) {
            mark_sorted_header(column, direction);
            self.page.sort.set(next);
        }
    }

    pub fn toggle_all_checkboxes(&self) {
        selection::toggle_all();
    }

    /// Click anywhere in a checkbox cell
    pub fn toggle_checkbox(&self, cell: Element) {
        selection::toggle_in_cell(&cell);
    }

    pub fn update_select_all_state(&self) {
        selection::update_select_all();
    }

    pub fn send_quotation_guide(&self) {
        u501_bulk_send::start(self.page, NotificationKind::Quotation);
    }

    pub fn send_payment_completion_guide(&self) {
        u501_bulk_send::start(self.page, NotificationKind::PaymentCompletion);
    }

    pub fn send_draft_guide(&self) {
        u501_bulk_send::start(self.page, NotificationKind::DraftGuide);
    }

    pub fn send_final_draft_guide(&self) {
        u501_bulk_send::start(self.page, NotificationKind::FinalDraftGuide);
    }

    pub fn delete_selected(&self) {
        delete_selected(self.page);
    }

    pub fn open_add_order(&self) {
        open_add_order(self.page);
    }
}
