use crate::shared::modal_stack::ModalStackService;
use crate::shared::notify::ToastService;
use contracts::config::AdminConfig;
use contracts::shared::inline_edit::DropdownSlot;
use contracts::shared::status_registry::transitions::{policy, TransitionPolicy};
use contracts::shared::table_sort::SortState;
use contracts::usecases::u501_bulk_send::PendingSend;
use leptos::prelude::*;

/// State of one attached admin page.
///
/// Everything that used to be page-global (open dropdown, sort state,
/// pending resend) lives here, one instance per attached table.
#[derive(Clone, Copy)]
pub struct PageContext {
    config: StoredValue<AdminConfig>,
    pub sort: RwSignal<SortState>,
    pub dropdown: RwSignal<DropdownSlot>,
    pub pending_send: RwSignal<PendingSend>,
    pub modals: ModalStackService,
    pub toasts: ToastService,
}

impl PageContext {
    pub fn new(config: AdminConfig) -> Self {
        let toasts = ToastService::new(config.toast_duration_ms);
        Self {
            config: StoredValue::new(config),
            sort: RwSignal::new(SortState::default()),
            dropdown: RwSignal::new(DropdownSlot::Closed),
            pending_send: RwSignal::new(PendingSend::default()),
            modals: ModalStackService::new(),
            toasts,
        }
    }

    pub fn config(&self) -> AdminConfig {
        self.config.get_value()
    }

    pub fn with_config<R>(&self, f: impl FnOnce(&AdminConfig) -> R) -> R {
        self.config.with_value(f)
    }

    pub fn transitions(&self) -> &'static dyn TransitionPolicy {
        policy(self.with_config(|c| c.enforce_transitions))
    }

    /// Reload the page after the configured delay
    pub fn schedule_reload(&self) {
        crate::shared::dom::reload_after(self.with_config(|c| c.reload_delay_ms));
    }
}

pub fn use_page() -> PageContext {
    use_context::<PageContext>().expect("PageContext not provided in context")
}
