use crate::shared::status_registry::StatusDescriptor;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an Order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received,
    PaymentCompleted,
    Sent,
    Impossible,
    Cancelled,
    Refunded,
}

/// Display metadata, indexed by `OrderStatus as usize`
pub static ORDER_STATUSES: [StatusDescriptor; 6] = [
    StatusDescriptor::new("received", "접수됨", "#f0f9ff", "#0c4a6e"),
    StatusDescriptor::new("payment_completed", "결제완료", "#fef3c7", "#92400e"),
    StatusDescriptor::new("sent", "발송완료", "#dcfce7", "#166534"),
    StatusDescriptor::new("impossible", "작업불가", "#fce7f3", "#9f1239"),
    StatusDescriptor::new("cancelled", "취소됨", "#fee2e2", "#991b1b"),
    StatusDescriptor::new("refunded", "환불완료", "#f3f4f6", "#374151"),
];

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Received,
        OrderStatus::PaymentCompleted,
        OrderStatus::Sent,
        OrderStatus::Impossible,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    pub fn descriptor(&self) -> &'static StatusDescriptor {
        &ORDER_STATUSES[*self as usize]
    }

    pub fn code(&self) -> &'static str {
        self.descriptor().code
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_enum() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(OrderStatus::PaymentCompleted.code(), "payment_completed");
        assert_eq!(OrderStatus::Refunded.descriptor().display_name, "환불완료");
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&OrderStatus::PaymentCompleted).unwrap();
        assert_eq!(json, "\"payment_completed\"");
    }
}
