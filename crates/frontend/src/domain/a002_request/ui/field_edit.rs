use super::cells;
use crate::domain::a002_request::api;
use crate::layout::global_context::PageContext;
use crate::shared::modal_stack::{ModalHandle, ModalOptions};
use crate::shared::notify::alert;
use contracts::domain::a002_request::TRANSCRIPT_ACCEPT;
use contracts::shared::inline_edit::{field_label, FieldKind};
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

/// Open the single-field edit modal, prefilled from the cell's value span
pub fn open_field_edit(page: PageContext, request_id: &str, field: &str, field_type: &str) {
    if cells::field_cell(request_id, field).is_none() {
        log::error!("editable cell not found: {} / {}", request_id, field);
        return;
    }
    let kind = FieldKind::from_code(field_type);
    let initial = kind.editable_text(&cells::shown_value(request_id, field));
    let request_id = request_id.to_string();
    let field = field.to_string();

    page.modals.push(
        ModalOptions::new().class("field-edit-modal").style("width: 420px;"),
        move |handle| {
            view! {
                <FieldEditForm
                    page=page
                    handle=handle
                    request_id=request_id.clone()
                    field=field.clone()
                    kind=kind
                    initial=initial.clone()
                />
            }
            .into_any()
        },
    );
}

fn save(page: PageContext, handle: ModalHandle, request_id: String, field: String, kind: FieldKind, raw: String) {
    let value = match kind.validate_for_save(&raw) {
        Ok(v) => v,
        Err(e) => {
            alert(&e.user_message(""));
            return;
        }
    };
    handle.close();

    spawn_local(async move {
        let config = page.config();
        match api::save_field(&config, &request_id, &field, &value).await {
            Ok(()) => match cells::show_saved_value(&request_id, &field, &value) {
                Ok(()) => page.toasts.success("저장되었습니다."),
                Err(e) => page.toasts.report(&e, "저장 중 오류가 발생했습니다."),
            },
            Err(e) => page.toasts.report(&e, "저장 중 오류가 발생했습니다."),
        }
    });
}

#[component]
fn FieldEditForm(
    page: PageContext,
    handle: ModalHandle,
    request_id: String,
    field: String,
    kind: FieldKind,
    initial: String,
) -> impl IntoView {
    let label = field_label(&field);
    let value = RwSignal::new(initial);
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let target = StoredValue::new((request_id, field));

    let submit = move || {
        let (request_id, field) = target.get_value();
        save(page, handle, request_id, field, kind, value.get_untracked());
    };

    Effect::new(move |_| {
        spawn_local(async move {
            TimeoutFuture::new(100).await;
            if let Some(input) = input_ref.get_untracked() {
                let _ = input.focus();
            }
        });
    });

    let on_keydown = move |e: ev::KeyboardEvent| {
        let key = e.key();
        if kind.blocks_key(&key) {
            e.prevent_default();
            return;
        }
        match key.as_str() {
            "Enter" => submit(),
            "Escape" => handle.close(),
            _ => {}
        }
    };

    // Значение после вставки проверяется на следующем тике
    let on_paste = move |_: ev::ClipboardEvent| {
        spawn_local(async move {
            TimeoutFuture::new(10).await;
            let pasted = input_ref
                .get_untracked()
                .map(|input| input.value())
                .unwrap_or_else(|| value.get_untracked());
            if kind.rejects_paste(&pasted) {
                value.set(String::new());
            } else {
                value.set(pasted);
            }
        });
    };

    let (min, step) = match kind {
        FieldKind::Number => (Some("0"), Some("1")),
        FieldKind::Text => (None, None),
    };

    view! {
        <div class="modal-header">
            <h3 class="modal-title">{format!("{} 편집", label)}</h3>
        </div>
        <div class="modal-body">
            <label class="form-label">{label}</label>
            <input
                class="form-input"
                type=kind.input_type()
                min=min
                step=step
                node_ref=input_ref
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                on:keydown=on_keydown
                on:paste=on_paste
            />
        </div>
        <div class="modal-footer" style="display: flex; justify-content: flex-end; gap: 8px;">
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| handle.close()>
                "취소"
            </Button>
            <Button appearance=ButtonAppearance::Primary on_click=move |_| submit()>
                "저장"
            </Button>
        </div>
    }
}

/// Pick a transcript file through a hidden input and upload it
pub fn open_file_dialog(page: PageContext, request_id: &str, field: &str) {
    let Some(document) = crate::shared::dom::document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let input = match document
        .create_element("input")
        .map(|el| el.unchecked_into::<HtmlInputElement>())
    {
        Ok(input) => input,
        Err(e) => {
            log::error!("cannot create file input: {:?}", e);
            return;
        }
    };
    input.set_type("file");
    input.set_accept(TRANSCRIPT_ACCEPT);
    let _ = web_sys::HtmlElement::style(&input).set_property("display", "none");

    let request_id = request_id.to_string();
    let field = field.to_string();
    let picker = input.clone();
    let on_change = Closure::once(move || {
        let file = picker.files().and_then(|files| files.get(0));
        picker.remove();
        if let Some(file) = file {
            upload(page, request_id, field, file);
        }
    });
    input.set_onchange(Some(on_change.as_ref().unchecked_ref()));
    // Живёт до выбора файла
    on_change.forget();

    if body.append_child(&input).is_ok() {
        input.click();
    }
}

fn upload(page: PageContext, request_id: String, field: String, file: web_sys::File) {
    spawn_local(async move {
        let config = page.config();
        match api::upload_transcript(&config, &request_id, &field, &file).await {
            Ok(original_name) => {
                let name = original_name.unwrap_or_else(|| file.name());
                cells::show_text(&request_id, &field, &name);
                page.toasts.success("파일이 업로드되었습니다.");
            }
            Err(e) => page.toasts.report(&e, "파일 업로드 중 오류가 발생했습니다."),
        }
    });
}

/// Inline update through `update_field`; the value span shows the raw value
pub fn update_field_inline(page: PageContext, request_id: &str, field: &str, value: &str) {
    let request_id = request_id.to_string();
    let field = field.to_string();
    let value = value.to_string();
    spawn_local(async move {
        let config = page.config();
        match api::update_field(&config, &request_id, &field, &value).await {
            Ok(()) => {
                let shown = if value.is_empty() { "-" } else { value.as_str() };
                cells::show_text(&request_id, &field, shown);
                page.toasts.success("수정되었습니다.");
            }
            Err(e) => page.toasts.report(&e, "수정 중 오류가 발생했습니다."),
        }
    });
}
