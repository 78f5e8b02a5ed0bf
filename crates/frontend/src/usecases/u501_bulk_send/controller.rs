//! Selection → validation modal → history check → send.

use super::api;
use super::view::{DuplicateDialog, ValidationDialog};
use crate::layout::global_context::PageContext;
use crate::shared::dom::{self, attr_selector, selection};
use crate::shared::modal_stack::{ModalHandle, ModalOptions};
use contracts::usecases::u501_bulk_send::highlight::{CELL_BACKGROUND, ROW_ACCENT, SCROLL_DELAY_MS};
use contracts::usecases::u501_bulk_send::notification::{
    HISTORY_TRANSPORT_FAILED, SEND_TRANSPORT_FAILED, VALIDATION_TRANSPORT_FAILED,
};
use contracts::usecases::u501_bulk_send::{
    require_selection, HighlightPlan, NotificationKind, PendingSend, PendingSendSelection,
    SendGate, ValidationAction, ValidationReport,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Entry point of the four "send guide" buttons
pub fn start(page: PageContext, kind: NotificationKind) {
    let entity = kind.entity();
    let checked = match require_selection(entity, selection::checked_ids(entity)) {
        Ok(ids) => ids,
        Err(e) => {
            page.toasts.error(e.user_message(""));
            return;
        }
    };
    log::debug!("{}: validating {} ids", kind.label(), checked.len());

    spawn_local(async move {
        let config = page.config();
        match api::validate(&config, kind, checked.clone()).await {
            Ok(results) => {
                let report = ValidationReport::partition(kind, results);
                show_validation(page, report, checked);
            }
            Err(e) => page.toasts.report(&e, VALIDATION_TRANSPORT_FAILED),
        }
    });
}

fn show_validation(page: PageContext, report: ValidationReport, checked: Vec<String>) {
    page.modals.push(
        ModalOptions::new().class("validation-modal").style("width: 640px;"),
        move |handle| {
            let action_report = report.clone();
            let checked = checked.clone();
            let on_action = Callback::new(move |action: ValidationAction| {
                choose(page, handle, &action_report, &checked, action);
            });
            view! { <ValidationDialog report=report.clone() on_action=on_action /> }.into_any()
        },
    );
}

fn choose(
    page: PageContext,
    handle: ModalHandle,
    report: &ValidationReport,
    checked: &[String],
    action: ValidationAction,
) {
    handle.close();
    let kind = report.kind;
    match action {
        ValidationAction::Cancel => {}
        ValidationAction::HighlightInvalid => {
            highlight(page, HighlightPlan::from_invalid(kind.entity(), &report.invalid));
        }
        ValidationAction::Send | ValidationAction::SendValidOnly(_) => {
            if matches!(action, ValidationAction::SendValidOnly(_)) {
                selection::uncheck(kind.entity(), &report.ids_to_uncheck(checked));
            }
            if let Some(ids) = report.send_ids(action) {
                check_history(page, kind, ids.ids().to_vec());
            }
        }
    }
}

fn check_history(page: PageContext, kind: NotificationKind, ids: Vec<String>) {
    spawn_local(async move {
        let config = page.config();
        let gate = match api::check_history(&config, kind, ids.clone()).await {
            Ok(response) => SendGate::decide(kind, ids, response),
            Err(e) => Err(e),
        };
        match gate {
            Ok(SendGate::Proceed(selection)) => execute(page, selection),
            Ok(SendGate::ConfirmResend { selection, history }) => {
                page.pending_send.update(|p| p.hold(selection));
                page.modals.push(
                    ModalOptions::new()
                        .class("duplicate-send-modal")
                        .style("width: 560px;")
                        .guard(move || {
                            page.pending_send.update(PendingSend::cancel);
                            true
                        }),
                    move |handle| {
                        let on_confirm = Callback::new(move |_: ()| confirm_resend(page, handle));
                        let on_cancel = Callback::new(move |_: ()| {
                            page.pending_send.update(PendingSend::cancel);
                            handle.close();
                        });
                        view! {
                            <DuplicateDialog
                                kind=kind
                                history=history.clone()
                                on_confirm=on_confirm
                                on_cancel=on_cancel
                            />
                        }
                        .into_any()
                    },
                );
            }
            Err(e) => page.toasts.report(&e, HISTORY_TRANSPORT_FAILED),
        }
    });
}

fn confirm_resend(page: PageContext, handle: ModalHandle) {
    let selection = page.pending_send.try_update(PendingSend::confirm).flatten();
    handle.close();
    match selection {
        Some(selection) => execute(page, selection),
        None => log::warn!("resend confirmed without a pending selection"),
    }
}

fn execute(page: PageContext, selection: PendingSendSelection) {
    spawn_local(async move {
        let config = page.config();
        match api::send(&config, &selection).await {
            Ok(report) => {
                page.toasts.success(report.message);
                for error in report.partial_errors {
                    page.toasts.error(error);
                }
                page.schedule_reload();
            }
            Err(e) => page.toasts.report(&e, SEND_TRANSPORT_FAILED),
        }
    });
}

/// Paint the cells named by each row's errors and scroll to the first row
fn highlight(page: PageContext, plan: HighlightPlan) {
    for cell in dom::query_all(".excel-cell") {
        dom::set_style(&cell, "background-color", "");
    }
    for row in dom::query_all(&format!("tr[{}]", plan.kind.id_attribute())) {
        dom::set_style(&row, "border-left", "");
    }

    for target in &plan.rows {
        let Some(row) = selection::row_for(plan.kind, &target.id) else {
            log::warn!("row not found for {}", target.id);
            continue;
        };
        for field in &target.fields {
            if let Some(cell) = dom::query_in(&row, &format!("td{}", attr_selector("data-field", field))) {
                dom::set_style(&cell, "background-color", CELL_BACKGROUND);
                dom::set_style(&cell, "transition", "all 0.3s");
            }
        }
        dom::set_style(&row, "border-left", ROW_ACCENT);
    }

    if let Some(first) = plan.first_id().map(str::to_string) {
        let kind = plan.kind;
        spawn_local(async move {
            TimeoutFuture::new(SCROLL_DELAY_MS).await;
            if let Some(row) = selection::row_for(kind, &first) {
                dom::scroll_into_view_center(&row);
            }
        });
    }
    page.toasts.error(plan.notice());
}
