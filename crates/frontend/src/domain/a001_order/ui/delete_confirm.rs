//! Deleting the checked orders after a confirmation listing their files.

use crate::domain::a001_order::api;
use crate::layout::global_context::PageContext;
use crate::shared::dom::{query_in, selection, text_of};
use crate::shared::modal_stack::{ModalHandle, ModalOptions};
use contracts::domain::a001_order::{OrderFile, OrderFileCounts};
use contracts::domain::common::EntityKind;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, PartialEq)]
struct OrderSummary {
    order_id: String,
    name: String,
    email: String,
    file_count: u32,
    files: Vec<OrderFile>,
}

/// Customer name and email from the 4th and 5th cells of the order's first row
fn customer_of(order_id: &str) -> (String, String) {
    let row = selection::checkbox_row_for(EntityKind::Order, order_id);
    let cell = |n: u32| {
        row.as_ref()
            .and_then(|r| query_in(r, &format!("td:nth-child({})", n)))
            .map(|c| text_of(&c))
            .unwrap_or_else(|| "-".to_string())
    };
    (cell(4), cell(5))
}

fn summarize(order_ids: &[String], customers: Vec<(String, String)>, counts: &OrderFileCounts) -> Vec<OrderSummary> {
    order_ids
        .iter()
        .zip(customers)
        .map(|(id, (name, email))| OrderSummary {
            order_id: id.clone(),
            name,
            email,
            file_count: counts.count(id),
            files: counts.files(id).to_vec(),
        })
        .collect()
}

/// Entry point of the "delete selected" button
pub fn delete_selected(page: PageContext) {
    let order_ids = selection::checked_ids(EntityKind::Order);
    if order_ids.is_empty() {
        page.toasts.error(EntityKind::Order.empty_selection_message());
        return;
    }
    let customers: Vec<_> = order_ids.iter().map(|id| customer_of(id)).collect();

    spawn_local(async move {
        let config = page.config();
        match api::file_counts(&config, &order_ids).await {
            Ok(counts) => {
                let orders = summarize(&order_ids, customers, &counts);
                page.modals.push(
                    ModalOptions::new().class("delete-confirm-modal").style("width: 560px;"),
                    move |handle| {
                        view! { <DeleteConfirm page=page handle=handle orders=orders.clone() /> }.into_any()
                    },
                );
            }
            Err(e) => {
                log::error!("file counts: {}", e);
                page.toasts.error("파일 개수 조회 중 오류가 발생했습니다.");
            }
        }
    });
}

#[component]
fn DeleteConfirm(page: PageContext, handle: ModalHandle, orders: Vec<OrderSummary>) -> impl IntoView {
    let pending = RwSignal::new(false);
    let order_ids: Vec<String> = orders.iter().map(|o| o.order_id.clone()).collect();
    let order_ids = StoredValue::new(order_ids);
    let total = orders.len();

    let confirm = move |_| {
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        let ids = order_ids.get_value();
        spawn_local(async move {
            let config = page.config();
            match api::delete_orders(&config, ids).await {
                Ok(message) => {
                    page.toasts
                        .success(message.unwrap_or_else(|| "삭제되었습니다.".to_string()));
                    handle.close();
                    page.schedule_reload();
                }
                Err(e) => {
                    page.toasts.report(&e, "삭제 중 오류가 발생했습니다.");
                    pending.set(false);
                }
            }
        });
    };

    let items = orders
        .into_iter()
        .map(|order| {
            let files = (!order.files.is_empty()).then(|| {
                let rows = order
                    .files
                    .into_iter()
                    .map(|file| {
                        let (icon, color) = if file.is_transcript() {
                            ("📝", "#dc2626")
                        } else {
                            ("📎", "#7c2d12")
                        };
                        view! {
                            <p style=format!("color: {}; font-size: 11px; margin: 2px 0; padding-left: 12px;", color)>
                                {format!("{} {}", icon, file.name)}
                            </p>
                        }
                    })
                    .collect_view();
                view! {
                    <div style="margin-top: 8px; padding: 8px; background-color: #fee2e2; border-radius: 6px;">
                        <p style="color: #991b1b; font-size: 12px; font-weight: 500; margin: 0 0 6px 0;">
                            "삭제될 파일 목록:"
                        </p>
                        {rows}
                    </div>
                }
            });
            view! {
                <div style="background-color: #f9fafb; padding: 12px; border-radius: 8px; margin-bottom: 12px; border-left: 3px solid #dc2626;">
                    <p style="color: #111827; font-weight: 500; margin: 0 0 4px 0;">
                        {format!("Order ID: {}", order.order_id)}
                    </p>
                    <p style="color: #6b7280; font-size: 14px; margin: 0 0 8px 0;">
                        {format!("주문자: {} ({})", order.name, order.email)}
                    </p>
                    <p style="color: #dc2626; font-size: 14px; margin: 0 0 8px 0; font-weight: 500;">
                        {format!("파일 개수: {}개", order.file_count)}
                    </p>
                    {files}
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="modal-header">
            <h3 class="modal-title">"주문 삭제"</h3>
        </div>
        <div class="modal-body" style="margin-bottom: 16px;">
            <p style="color: #374151; font-weight: 500; margin-bottom: 12px;">
                {format!("다음 {}개 주문이 삭제됩니다:", total)}
            </p>
            <div style="max-height: 400px; overflow-y: auto;">{items}</div>
        </div>
        <div class="modal-footer" style="display: flex; justify-content: flex-end; gap: 8px;">
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| handle.close()>
                "취소"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                disabled=move || pending.get()
                on_click=confirm
            >
                {move || if pending.get() { "삭제 중..." } else { "삭제" }}
            </Button>
        </div>
    }
}
