use crate::domain::a002_request::{ChangePaymentRequest, ChangeStatusRequest};
use crate::domain::common::{EntityKind, RequestId};
use crate::shared::status_registry::StatusCode;
use serde_json::Value;

/// Cell that owns a dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    OrderStatus,
    RequestStatus,
    Payment,
}

impl EditField {
    /// Status kind edited through this field, `None` for payment
    pub fn status_kind(self) -> Option<EntityKind> {
        match self {
            EditField::OrderStatus => Some(EntityKind::Order),
            EditField::RequestStatus => Some(EntityKind::Request),
            EditField::Payment => None,
        }
    }

    /// `status_type` argument passed by the template ("order" / "request")
    pub fn for_status_type(status_type: &str) -> Self {
        match EntityKind::from_code(status_type) {
            Some(EntityKind::Order) => EditField::OrderStatus,
            _ => EditField::RequestStatus,
        }
    }

    pub fn dropdown_class(self) -> &'static str {
        match self {
            EditField::Payment => "payment-dropdown",
            _ => "status-dropdown",
        }
    }

    pub fn item_class(self) -> &'static str {
        match self {
            EditField::Payment => "payment-dropdown-item",
            _ => "status-dropdown-item",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropdownKey {
    pub request_id: RequestId,
    pub field: EditField,
}

impl DropdownKey {
    pub fn new(request_id: impl Into<String>, field: EditField) -> Self {
        Self {
            request_id: RequestId::new(request_id),
            field,
        }
    }
}

/// Viewport position of an open dropdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub left: f64,
    pub top: f64,
}

impl Anchor {
    pub const GAP_PX: f64 = 4.0;

    /// Directly under a button whose bounding box has the given left and bottom
    pub fn below(left: f64, bottom: f64) -> Self {
        Self {
            left,
            top: bottom + Self::GAP_PX,
        }
    }

    pub fn style(&self) -> String {
        format!("position: fixed; left: {}px; top: {}px;", self.left, self.top)
    }
}

/// The one dropdown a page may show
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DropdownSlot {
    #[default]
    Closed,
    Open {
        key: DropdownKey,
        anchor: Anchor,
        /// Value of the cell when the dropdown opened
        current: String,
    },
}

/// Item picked in an open dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownChoice {
    Status(StatusCode),
    Payment(bool),
}

/// Update request produced by a dropdown selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    ChangeStatus {
        request_id: RequestId,
        status: StatusCode,
    },
    ChangePayment {
        request_id: RequestId,
        paid: bool,
    },
}

impl EditCommand {
    pub fn request_id(&self) -> &RequestId {
        match self {
            EditCommand::ChangeStatus { request_id, .. } => request_id,
            EditCommand::ChangePayment { request_id, .. } => request_id,
        }
    }

    /// API path of the update
    pub fn path(&self) -> String {
        match self {
            EditCommand::ChangeStatus { request_id, status } => match status.kind() {
                EntityKind::Order => format!("/api/requests/{}/change_order_status/", request_id),
                EntityKind::Request => format!("/api/requests/{}/change_status/", request_id),
            },
            EditCommand::ChangePayment { request_id, .. } => {
                format!("/api/requests/{}/change_payment/", request_id)
            }
        }
    }

    pub fn body(&self) -> Value {
        let body = match self {
            EditCommand::ChangeStatus { status, .. } => {
                serde_json::to_value(ChangeStatusRequest::silent(*status))
            }
            EditCommand::ChangePayment { paid, .. } => {
                serde_json::to_value(ChangePaymentRequest {
                    payment_status: *paid,
                })
            }
        };
        body.unwrap_or(Value::Null)
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            EditCommand::ChangeStatus { .. } => "상태가 변경되었습니다.",
            EditCommand::ChangePayment { .. } => "결제 상태가 변경되었습니다.",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            EditCommand::ChangeStatus { .. } => "상태 변경에 실패했습니다.",
            EditCommand::ChangePayment { .. } => "결제 상태 변경에 실패했습니다.",
        }
    }

    pub fn transport_message(&self) -> &'static str {
        match self {
            EditCommand::ChangeStatus { .. } => "상태 변경 중 오류가 발생했습니다.",
            EditCommand::ChangePayment { .. } => "결제 상태 변경 중 오류가 발생했습니다.",
        }
    }
}

impl DropdownSlot {
    pub fn is_open(&self) -> bool {
        matches!(self, DropdownSlot::Open { .. })
    }

    pub fn open_key(&self) -> Option<&DropdownKey> {
        match self {
            DropdownSlot::Open { key, .. } => Some(key),
            DropdownSlot::Closed => None,
        }
    }

    /// Click on an edit button. The same key toggles the dropdown closed,
    /// any other key replaces whatever was open. Returns whether it is open now.
    pub fn trigger(&mut self, key: DropdownKey, anchor: Anchor, current: impl Into<String>) -> bool {
        if self.open_key() == Some(&key) {
            *self = DropdownSlot::Closed;
            return false;
        }
        *self = DropdownSlot::Open {
            key,
            anchor,
            current: current.into(),
        };
        true
    }

    /// Click outside the dropdown's container
    pub fn dismiss(&mut self) {
        *self = DropdownSlot::Closed;
    }

    /// Pick an item. The slot is closed whatever the result; a choice that
    /// does not fit the open field yields no command.
    pub fn select(&mut self, choice: DropdownChoice) -> Option<EditCommand> {
        let previous = std::mem::take(self);
        let DropdownSlot::Open { key, .. } = previous else {
            return None;
        };
        match (key.field.status_kind(), choice) {
            (Some(kind), DropdownChoice::Status(status)) if status.kind() == kind => {
                Some(EditCommand::ChangeStatus {
                    request_id: key.request_id,
                    status,
                })
            }
            (None, DropdownChoice::Payment(paid)) => Some(EditCommand::ChangePayment {
                request_id: key.request_id,
                paid,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_order::OrderStatus;
    use crate::domain::a002_request::RequestStatus;

    fn anchor() -> Anchor {
        Anchor::below(120.0, 40.0)
    }

    #[test]
    fn anchor_sits_four_pixels_below() {
        assert_eq!(anchor().top, 44.0);
        assert_eq!(anchor().left, 120.0);
    }

    #[test]
    fn same_key_toggles_closed() {
        let mut slot = DropdownSlot::default();
        let key = DropdownKey::new("R1", EditField::RequestStatus);
        assert!(slot.trigger(key.clone(), anchor(), "received"));
        assert!(!slot.trigger(key, anchor(), "received"));
        assert_eq!(slot, DropdownSlot::Closed);
    }

    #[test]
    fn open_slot_keeps_the_value_it_opened_with() {
        let mut slot = DropdownSlot::default();
        slot.trigger(DropdownKey::new("R1", EditField::Payment), anchor(), "True");
        let DropdownSlot::Open { current, .. } = &slot else {
            panic!("dropdown should be open");
        };
        assert_eq!(current, "True");

        slot.trigger(DropdownKey::new("R2", EditField::RequestStatus), anchor(), "sent");
        let DropdownSlot::Open { key, current, .. } = &slot else {
            panic!("dropdown should be open");
        };
        assert_eq!((key.request_id.as_str(), current.as_str()), ("R2", "sent"));
    }

    #[test]
    fn other_key_replaces_open_dropdown() {
        let mut slot = DropdownSlot::default();
        slot.trigger(DropdownKey::new("R1", EditField::RequestStatus), anchor(), "received");
        assert!(slot.trigger(DropdownKey::new("R1", EditField::Payment), anchor(), "received"));
        assert_eq!(slot.open_key().map(|k| k.field), Some(EditField::Payment));
        slot.dismiss();
        assert!(!slot.is_open());
    }

    #[test]
    fn select_always_closes() {
        let mut slot = DropdownSlot::default();
        slot.trigger(DropdownKey::new("R1", EditField::OrderStatus), anchor(), "received");
        let cmd = slot
            .select(DropdownChoice::Status(StatusCode::Order(OrderStatus::Refunded)))
            .unwrap();
        assert!(!slot.is_open());
        assert_eq!(cmd.path(), "/api/requests/R1/change_order_status/");
        assert_eq!(
            cmd.body(),
            serde_json::json!({"status": "refunded", "reason": "", "skip_notification": true})
        );

        slot.trigger(DropdownKey::new("R2", EditField::Payment), anchor(), "received");
        assert_eq!(
            slot.select(DropdownChoice::Status(StatusCode::Request(RequestStatus::Sent))),
            None
        );
        assert!(!slot.is_open());
        assert_eq!(slot.select(DropdownChoice::Payment(true)), None);
    }

    #[test]
    fn payment_and_request_status_commands() {
        let mut slot = DropdownSlot::default();
        slot.trigger(DropdownKey::new("R2", EditField::Payment), anchor(), "received");
        let cmd = slot.select(DropdownChoice::Payment(true)).unwrap();
        assert_eq!(cmd.path(), "/api/requests/R2/change_payment/");
        assert_eq!(cmd.body(), serde_json::json!({"payment_status": true}));

        slot.trigger(DropdownKey::new("R3", EditField::RequestStatus), anchor(), "received");
        let cmd = slot
            .select(DropdownChoice::Status(StatusCode::Request(RequestStatus::Sent)))
            .unwrap();
        assert_eq!(cmd.path(), "/api/requests/R3/change_status/");
    }

    #[test]
    fn status_of_the_other_kind_yields_no_command() {
        let mut slot = DropdownSlot::default();
        slot.trigger(DropdownKey::new("R4", EditField::RequestStatus), anchor(), "received");
        assert_eq!(
            slot.select(DropdownChoice::Status(StatusCode::Order(OrderStatus::Refunded))),
            None
        );
        assert!(!slot.is_open());
    }

    #[test]
    fn status_type_mapping() {
        assert_eq!(EditField::for_status_type("order"), EditField::OrderStatus);
        assert_eq!(EditField::for_status_type("request"), EditField::RequestStatus);
        assert_eq!(EditField::for_status_type(""), EditField::RequestStatus);
    }
}
