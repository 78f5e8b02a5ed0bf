use super::upload::{self, UploadProgress};
use crate::domain::a001_order::api;
use crate::layout::global_context::PageContext;
use crate::shared::modal_stack::ModalHandle;
use crate::shared::notify::confirm;
use contracts::domain::a001_order::{clamp_amount, CreateOrderRequest};
use contracts::domain::common::OrderId;
use contracts::usecases::u502_add_order::file_tabs::LAST_TAB_MESSAGE;
use contracts::usecases::u502_add_order::{batch_notice, check_sizes, FileSettings, FileTabSet, TabField};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

pub const DRAFT_FORMATS: &[(&str, &str)] = &[("hwp", "hwp"), ("txt", "txt"), ("docx", "docx")];
pub const FINAL_OPTIONS: &[(&str, &str)] = &[
    ("file", "파일"),
    ("file_usb", "파일+우편"),
    ("file_usb_post", "파일+우편+USB"),
];

/// Customer and order fields of the form
#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub draft_format: String,
    pub final_option: String,
    pub payment_status: bool,
    pub payment_amount: String,
    pub notes: String,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            draft_format: DRAFT_FORMATS[0].0.to_string(),
            final_option: FINAL_OPTIONS[0].0.to_string(),
            payment_status: false,
            payment_amount: String::new(),
            notes: String::new(),
        }
    }
}

impl OrderForm {
    pub fn to_request(&self, files_data: Vec<FileSettings>) -> CreateOrderRequest {
        CreateOrderRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            draft_format: self.draft_format.clone(),
            final_option: self.final_option.clone(),
            payment_status: self.payment_status,
            payment_amount: clamp_amount(&self.payment_amount),
            notes: self.notes.trim().to_string(),
            files_data,
        }
    }

    /// Values passed to the presigned-url call
    pub fn customer(&self) -> (String, String) {
        (self.name.trim().to_string(), self.email.trim().to_string())
    }
}

/// State of one add-order modal session
#[derive(Clone, Copy)]
pub struct AddOrderViewModel {
    page: PageContext,
    pub form: RwSignal<OrderForm>,
    pub order_id: RwSignal<String>,
    pub request_id: RwSignal<String>,
    pub tabs: RwSignal<FileTabSet>,
    pub progress: RwSignal<Vec<UploadProgress>>,
    pub uploading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
}

impl AddOrderViewModel {
    pub fn new(page: PageContext) -> Self {
        Self {
            page,
            form: RwSignal::new(OrderForm::default()),
            order_id: RwSignal::new(String::new()),
            request_id: RwSignal::new(String::new()),
            tabs: RwSignal::new(FileTabSet::default()),
            progress: RwSignal::new(Vec::new()),
            uploading: RwSignal::new(false),
            saving: RwSignal::new(false),
        }
    }

    /// Fill order and request ids from the server
    pub fn load_ids(&self) {
        let vm = *self;
        spawn_local(async move {
            let config = vm.page.config();
            match api::generate_ids(&config).await {
                Ok(ids) => {
                    vm.set_order_id(ids.order_id.unwrap_or_default());
                    vm.request_id.set(ids.request_id.unwrap_or_default());
                }
                Err(e) => log::error!("id generation: {}", e),
            }
        });
    }

    /// Tab request ids follow the order id
    pub fn set_order_id(&self, order_id: String) {
        self.tabs
            .update(|tabs| tabs.set_order_id(OrderId::new(order_id.clone())));
        self.order_id.set(order_id);
    }

    pub fn update_form(&self, f: impl FnOnce(&mut OrderForm)) {
        self.form.update(f);
    }

    pub fn upload(&self, files: Vec<File>) {
        if files.is_empty() {
            return;
        }
        let limit = self.page.with_config(|c| c.max_upload_bytes);
        let picked: Vec<_> = files.iter().map(upload::selected).collect();
        if let Err(e) = check_sizes(&picked, limit) {
            self.page.toasts.error(e.user_message(""));
            return;
        }

        let vm = *self;
        vm.uploading.set(true);
        spawn_local(async move {
            let config = vm.page.config();
            let customer = vm.form.with_untracked(OrderForm::customer);
            let batch = upload::upload_all(&config, files, customer, vm.progress).await;

            let stored = batch.uploaded.len();
            vm.tabs.update(|tabs| tabs.append(batch.uploaded));
            vm.progress.set(Vec::new());
            vm.uploading.set(false);

            if !batch.failed.is_empty() {
                log::error!("failed uploads: {:?}", batch.failed);
                vm.page.toasts.error("파일 업로드 중 오류가 발생했습니다.");
            }
            let total = vm.tabs.with_untracked(FileTabSet::len);
            if let Some((level, message)) = batch_notice(stored, batch.failed.len(), total) {
                vm.page.toasts.show(level, message);
            }
        });
    }

    pub fn switch_tab(&self, index: usize) {
        self.tabs.update(|tabs| {
            tabs.switch_to(index);
        });
    }

    pub fn update_tab(&self, index: usize, field: TabField, value: String) {
        self.tabs.update(|tabs| tabs.update(index, field, &value));
    }

    /// Remove a tab with its stored file
    pub fn delete_tab(&self, index: usize) {
        if self.tabs.with_untracked(FileTabSet::len) <= 1 {
            self.page.toasts.error(LAST_TAB_MESSAGE);
            return;
        }
        if !confirm("이 파일을 삭제하시겠습니까?") {
            return;
        }
        let mut removed = None;
        self.tabs.update(|tabs| removed = Some(tabs.remove(index)));
        let file = match removed {
            Some(Ok(file)) => file,
            Some(Err(e)) => {
                self.page.toasts.report(&e, LAST_TAB_MESSAGE);
                return;
            }
            None => return,
        };

        let page = self.page;
        spawn_local(async move {
            let config = page.config();
            if let Err(e) = api::delete_uploaded_files(&config, vec![file.file_key]).await {
                log::error!("delete uploaded file: {}", e);
            }
        });
        self.page.toasts.success("파일이 삭제되었습니다.");
    }

    /// Close guard of the modal. Uploaded files are deleted remotely
    /// once the user confirms; `false` keeps the modal open.
    pub fn confirm_close(&self) -> bool {
        let count = self.tabs.with_untracked(FileTabSet::len);
        if count == 0 {
            return true;
        }
        let message = format!("업로드한 {}개 파일이 DB에서 삭제됩니다.\n정말 취소하시겠습니까?", count);
        if !confirm(&message) {
            return false;
        }
        let mut keys = Vec::new();
        self.tabs.update(|tabs| keys = tabs.clear());

        let page = self.page;
        spawn_local(async move {
            let config = page.config();
            match api::delete_uploaded_files(&config, keys).await {
                Ok(()) => log::debug!("uploaded files deleted"),
                Err(e) => log::error!("delete uploaded files: {}", e),
            }
        });
        true
    }

    pub fn save(&self, handle: ModalHandle) {
        if self.saving.get_untracked() {
            return;
        }
        let request = self
            .form
            .with_untracked(|form| form.to_request(self.tabs.with_untracked(FileTabSet::settings)));
        if let Err(e) = request.validate() {
            self.page.toasts.error(e.user_message(""));
            return;
        }

        let vm = *self;
        vm.saving.set(true);
        spawn_local(async move {
            let config = vm.page.config();
            match api::create_order(&config, &request).await {
                Ok(message) => {
                    vm.page
                        .toasts
                        .success(message.unwrap_or_else(|| "저장되었습니다.".to_string()));
                    handle.close();
                    vm.page.schedule_reload();
                }
                Err(e) => {
                    vm.page.toasts.report(&e, "저장 중 오류가 발생했습니다.");
                    vm.saving.set(false);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_to_request_trims_and_clamps() {
        let form = OrderForm {
            name: " 홍길동 ".into(),
            email: "h@x.kr ".into(),
            phone: "010-1234-5678".into(),
            payment_amount: "-500".into(),
            notes: "  메모 ".into(),
            ..Default::default()
        };
        let request = form.to_request(Vec::new());
        assert_eq!(request.name, "홍길동");
        assert_eq!(request.email, "h@x.kr");
        assert_eq!(request.notes, "메모");
        assert_eq!(request.payment_amount, Some(0));
        assert_eq!(request.draft_format, "hwp");
        assert_eq!(request.final_option, "file");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_blank_amount_is_none() {
        let form = OrderForm::default();
        let request = form.to_request(Vec::new());
        assert_eq!(request.payment_amount, None);
        assert!(request.validate().is_err());
    }
}
