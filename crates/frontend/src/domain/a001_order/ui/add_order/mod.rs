//! Add-order modal.
//!
//! - upload.rs: concurrent presigned uploads
//! - view_model.rs: form, file tabs and commands
//! - view.rs: Leptos components

mod upload;
mod view;
mod view_model;

pub use view::AddOrderModal;
pub use view_model::AddOrderViewModel;

use crate::layout::global_context::PageContext;
use crate::shared::modal_stack::ModalOptions;
use leptos::prelude::*;

/// Open a fresh add-order session
pub fn open_add_order(page: PageContext) {
    let vm = AddOrderViewModel::new(page);
    vm.load_ids();
    page.modals.push(
        ModalOptions::new()
            .class("add-order-modal")
            .style("width: 860px; max-height: 90vh; overflow-y: auto;")
            .guard(move || vm.confirm_close()),
        move |handle| view! { <AddOrderModal vm=vm handle=handle /> }.into_any(),
    );
}
