use super::upload;
use super::view_model::{AddOrderViewModel, OrderForm, DRAFT_FORMATS, FINAL_OPTIONS};
use crate::shared::modal_stack::ModalHandle;
use contracts::usecases::u502_add_order::file_tabs::{tab_label, tab_width};
use contracts::usecases::u502_add_order::{FileTabEntry, FileTabSet, RecordingType, TabField};
use leptos::ev;
use leptos::prelude::*;
use thaw::*;
use web_sys::HtmlInputElement;

const LABEL_STYLE: &str =
    "display: block; margin-bottom: 8px; font-size: 14px; font-weight: 500; color: #374151;";
const INPUT_STYLE: &str = "width: 100%; padding: 12px; border: 1px solid #d1d5db; border-radius: 8px; font-size: 16px; box-sizing: border-box;";

#[component]
fn TextField(
    vm: AddOrderViewModel,
    label: &'static str,
    #[prop(optional)] required: bool,
    #[prop(optional)] input_type: Option<&'static str>,
    read: fn(&OrderForm) -> String,
    write: fn(&mut OrderForm, String),
) -> impl IntoView {
    let caption = if required { format!("{} *", label) } else { label.to_string() };
    view! {
        <div>
            <label style=LABEL_STYLE>{caption}</label>
            <input
                type=input_type.unwrap_or("text")
                style=INPUT_STYLE
                prop:value=move || vm.form.with(read)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    vm.update_form(|f| write(f, value));
                }
            />
        </div>
    }
}

#[component]
fn SelectField(
    vm: AddOrderViewModel,
    label: &'static str,
    options: &'static [(&'static str, &'static str)],
    read: fn(&OrderForm) -> String,
    write: fn(&mut OrderForm, String),
) -> impl IntoView {
    view! {
        <div>
            <label style=LABEL_STYLE>{label}</label>
            <select
                style=INPUT_STYLE
                prop:value=move || vm.form.with(read)
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    vm.update_form(|f| write(f, value));
                }
            >
                {options
                    .iter()
                    .map(|(code, name)| view! { <option value=*code>{*name}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}

fn tab_header(vm: AddOrderViewModel, index: usize, entry: &FileTabEntry, active: bool, width: u32) -> impl IntoView {
    let name = entry.file.original_name.clone();
    let label = tab_label(&name, width);
    let style = format!(
        "flex: 0 1 {width}px; min-width: 100px; max-width: 250px; padding: 12px 8px; \
         background-color: {}; color: {}; border: 2px solid #e5e7eb; border-bottom: 2px solid {}; \
         cursor: pointer; font-size: 13px; font-weight: {}; position: relative; display: flex; \
         align-items: center; margin-right: 2px; box-shadow: {}; z-index: {};",
        if active { "#ffffff" } else { "#f8f9fa" },
        if active { "#059669" } else { "#6b7280" },
        if active { "#ffffff" } else { "#e5e7eb" },
        if active { "600" } else { "500" },
        if active { "0 -2px 4px rgba(0,0,0,0.1)" } else { "none" },
        if active { "2" } else { "1" },
    );
    view! {
        <div class="file-tab" style=style on:click=move |_| vm.switch_tab(index)>
            <span
                style="flex: 1; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; padding-right: 20px;"
                title=name
            >
                {label}
            </span>
            <button
                class="tab-delete-btn"
                title="삭제"
                style="position: absolute; right: 2px; border: none; background: none; color: #dc2626; cursor: pointer; font-size: 14px; font-weight: bold;"
                on:click=move |e: ev::MouseEvent| {
                    e.stop_propagation();
                    vm.delete_tab(index);
                }
            >
                "×"
            </button>
        </div>
    }
}

/// Settings inputs of the tab at `index`
fn settings_panel(vm: AddOrderViewModel, index: usize, entry: FileTabEntry) -> impl IntoView {
    let read = move |f: fn(&FileTabEntry) -> String| {
        move || vm.tabs.with(|t| t.entries().get(index).map(f).unwrap_or_default())
    };
    let write = move |field: TabField| move |ev: ev::Event| vm.update_tab(index, field, event_target_value(&ev));
    let partial_disabled = move || {
        vm.tabs.with(|t| {
            t.entries()
                .get(index)
                .map(|e| !e.partial_range_enabled())
                .unwrap_or(true)
        })
    };
    let partial_style = move || {
        let (bg, color) = if partial_disabled() {
            ("#f3f4f6", "#9ca3af")
        } else {
            ("#ffffff", "#374151")
        };
        format!("{INPUT_STYLE} resize: vertical; background-color: {bg}; color: {color};")
    };

    view! {
        <div style="background-color: #f9fafb; padding: 16px; border-radius: 8px; margin-bottom: 16px;">
            <div style="font-weight: 600; color: #374151; margin-bottom: 8px;">
                {format!("📄 {}", entry.file.original_name)}
            </div>
            <div style="font-size: 13px; color: #6b7280;">
                "Request ID: " {read(|e| e.request_id.to_string())}
            </div>
        </div>

        <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-bottom: 16px;">
            <div>
                <label style=LABEL_STYLE>"녹취 타입"</label>
                <select
                    style=INPUT_STYLE
                    prop:value=read(|e| e.recording_type.code().to_string())
                    on:change=write(TabField::RecordingType)
                >
                    <option value=RecordingType::Full.code()>"전체"</option>
                    <option value=RecordingType::Partial.code()>"부분"</option>
                </select>
            </div>
            <div>
                <label style=LABEL_STYLE>"총 길이"</label>
                <input
                    type="text"
                    placeholder="예: 01:30:00"
                    style=INPUT_STYLE
                    prop:value=read(|e| e.total_duration.clone())
                    on:input=write(TabField::TotalDuration)
                />
            </div>
        </div>

        <div style="margin-bottom: 16px;">
            <label style=LABEL_STYLE>"부분 녹취 구간"</label>
            <textarea
                rows="2"
                placeholder="예: 00:00:00 - 00:30:00"
                style=partial_style
                prop:disabled=partial_disabled
                prop:value=read(|e| e.partial_range.clone())
                on:input=write(TabField::PartialRange)
            ></textarea>
        </div>

        <div style="display: grid; grid-template-columns: 1fr 2fr; gap: 16px; margin-bottom: 16px;">
            <div>
                <label style=LABEL_STYLE>"화자수"</label>
                <input
                    type="number"
                    min="1"
                    max="10"
                    style=INPUT_STYLE
                    prop:value=read(|e| e.speaker_count.to_string())
                    on:input=write(TabField::SpeakerCount)
                />
            </div>
            <div>
                <label style=LABEL_STYLE>"화자 이름"</label>
                <input
                    type="text"
                    placeholder="예: 홍길동,김철수"
                    style=INPUT_STYLE
                    prop:value=read(|e| e.speaker_names.clone())
                    on:input=write(TabField::SpeakerNames)
                />
            </div>
        </div>

        <div style="margin-bottom: 16px;">
            <label style=LABEL_STYLE>"녹음 일시"</label>
            <input
                type="datetime-local"
                style=format!("{INPUT_STYLE} cursor: pointer;")
                prop:value=read(|e| e.recording_date.clone())
                on:input=write(TabField::RecordingDate)
            />
        </div>

        <div style="margin-bottom: 16px;">
            <label style=LABEL_STYLE>"상세 정보"</label>
            <textarea
                rows="3"
                placeholder="추가 정보를 입력하세요"
                style=format!("{INPUT_STYLE} resize: vertical;")
                prop:value=read(|e| e.additional_info.clone())
                on:input=write(TabField::AdditionalInfo)
            ></textarea>
        </div>
    }
}

#[component]
pub fn AddOrderModal(vm: AddOrderViewModel, handle: ModalHandle) -> impl IntoView {
    // Панель пересоздаётся только при смене вкладки или их количества
    let active = Memo::new(move |_| vm.tabs.with(|t| (t.active(), t.len())));

    let on_files = move |ev: ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let files = upload::files_of(&input);
        input.set_value("");
        vm.upload(files);
    };

    let cancel = move |_| {
        if vm.confirm_close() {
            handle.close();
        }
    };

    let uploaded_list = move || {
        vm.tabs.with(|tabs| {
            (!tabs.is_empty()).then(|| {
                let rows = tabs
                    .entries()
                    .iter()
                    .map(|e| {
                        view! {
                            <p style="font-size: 13px; color: #6b7280; margin: 4px 0;">
                                {format!("• {} ({})", e.file.original_name, e.file.size_label())}
                            </p>
                        }
                    })
                    .collect_view();
                view! {
                    <div class="upload-status">
                        <p style="font-size: 14px; font-weight: 500; color: #059669; margin-bottom: 8px;">
                            "✓ 업로드 완료:"
                        </p>
                        {rows}
                    </div>
                }
            })
        })
    };

    let progress = move || {
        vm.progress
            .get()
            .into_iter()
            .map(|row| {
                view! {
                    <div style="margin-bottom: 12px;">
                        <p style="font-size: 13px; color: #374151; margin-bottom: 4px;">{row.caption()}</p>
                        <div style="background-color: #e5e7eb; border-radius: 9999px; height: 8px; overflow: hidden;">
                            <div style=format!(
                                "background-color: #059669; height: 100%; width: {}%; transition: width 0.3s;",
                                row.percent,
                            )></div>
                        </div>
                    </div>
                }
            })
            .collect_view()
    };

    let tabs = move || {
        vm.tabs.with(|tabs| {
            (!tabs.is_empty()).then(|| {
                let width = tab_width(tabs.len());
                let headers = tabs
                    .entries()
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| tab_header(vm, i, entry, i == tabs.active(), width))
                    .collect_view();
                view! { <div class="file-tabs" style="display: flex; overflow-x: auto;">{headers}</div> }
            })
        })
    };

    let panel = move || {
        let (index, _) = active.get();
        vm.tabs
            .with_untracked(|t: &FileTabSet| t.entries().get(index).cloned())
            .map(|entry| settings_panel(vm, index, entry))
    };

    let busy = move || vm.uploading.get() || vm.saving.get();
    let save_label = move || {
        if vm.uploading.get() {
            "업로드 중..."
        } else if vm.saving.get() {
            "저장 중..."
        } else {
            "저장"
        }
    };

    view! {
        <div class="modal-header">
            <h3 class="modal-title">"주문서 추가"</h3>
        </div>
        <div class="modal-body">
            <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-bottom: 16px;">
                <div>
                    <label style=LABEL_STYLE>"Order ID"</label>
                    <input
                        type="text"
                        style=INPUT_STYLE
                        prop:value=move || vm.order_id.get()
                        on:input=move |ev| vm.set_order_id(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label style=LABEL_STYLE>"Request ID"</label>
                    <input type="text" style=INPUT_STYLE readonly=true prop:value=move || vm.request_id.get() />
                </div>
            </div>

            <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-bottom: 16px;">
                <TextField vm=vm label="주문자명" required=true read=|f| f.name.clone() write=|f, v| f.name = v />
                <TextField
                    vm=vm
                    label="이메일"
                    required=true
                    input_type="email"
                    read=|f| f.email.clone()
                    write=|f, v| f.email = v
                />
                <TextField
                    vm=vm
                    label="연락처"
                    required=true
                    input_type="tel"
                    read=|f| f.phone.clone()
                    write=|f, v| f.phone = v
                />
                <TextField vm=vm label="주소" read=|f| f.address.clone() write=|f, v| f.address = v />
                <SelectField
                    vm=vm
                    label="원고 형식"
                    options=DRAFT_FORMATS
                    read=|f| f.draft_format.clone()
                    write=|f, v| f.draft_format = v
                />
                <SelectField
                    vm=vm
                    label="최종 옵션"
                    options=FINAL_OPTIONS
                    read=|f| f.final_option.clone()
                    write=|f, v| f.final_option = v
                />
                <div>
                    <label style=LABEL_STYLE>"결제 금액"</label>
                    <input
                        type="number"
                        min="0"
                        style=INPUT_STYLE
                        prop:value=move || vm.form.with(|f| f.payment_amount.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.update_form(|f| f.payment_amount = value);
                        }
                    />
                </div>
                <div style="display: flex; align-items: center; gap: 8px; padding-top: 28px;">
                    <input
                        type="checkbox"
                        prop:checked=move || vm.form.with(|f| f.payment_status)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            vm.update_form(|f| f.payment_status = checked);
                        }
                    />
                    <label style="font-size: 14px; color: #374151;">"결제 완료"</label>
                </div>
            </div>

            <div style="margin-bottom: 16px;">
                <label style=LABEL_STYLE>"메모"</label>
                <textarea
                    rows="3"
                    style=format!("{INPUT_STYLE} resize: vertical;")
                    prop:value=move || vm.form.with(|f| f.notes.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.update_form(|f| f.notes = value);
                    }
                ></textarea>
            </div>

            <div style="margin-bottom: 16px;">
                <label style=LABEL_STYLE>"파일 첨부"</label>
                <input type="file" multiple=true prop:disabled=move || vm.uploading.get() on:change=on_files />
                <div style="margin-top: 12px;">{progress}</div>
                {uploaded_list}
            </div>

            <div class="file-tabs-container">
                {tabs}
                <div class="file-settings-panel" style="padding-top: 16px;">{panel}</div>
            </div>
        </div>
        <div class="modal-footer" style="display: flex; justify-content: flex-end; gap: 8px;">
            <Button appearance=ButtonAppearance::Secondary on_click=cancel>
                "취소"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                disabled=Signal::derive(busy)
                on_click=move |_| vm.save(handle)
            >
                {save_label}
            </Button>
        </div>
    }
}
