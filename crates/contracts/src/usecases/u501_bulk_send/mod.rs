//! Bulk validation and sending of customer notifications.
//!
//! Flow: selection → validate → partition → (send all | send valid only |
//! highlight invalid) → duplicate history check → send.

pub mod highlight;
pub mod history;
pub mod notification;
pub mod selection;
pub mod send;
pub mod validation;

pub use highlight::{HighlightPlan, RowHighlight};
pub use history::{
    CheckHistoryRequest, CheckHistoryResponse, DuplicateHistoryItem, PendingSend,
    PendingSendSelection, SendGate,
};
pub use notification::NotificationKind;
pub use selection::{collect_ids, require_selection, SendIds};
pub use send::{SendReport, SendResponse};
pub use validation::{
    ValidationAction, ValidationOutcome, ValidationReport, ValidationResponse, ValidationResult,
};
