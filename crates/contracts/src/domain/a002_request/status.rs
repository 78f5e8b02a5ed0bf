use crate::shared::status_registry::StatusDescriptor;
use serde::{Deserialize, Serialize};

/// Work status of a single Request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Received,
    InProgress,
    WorkCompleted,
    Sent,
    Impossible,
    Cancelled,
}

/// Display metadata, indexed by `RequestStatus as usize`
pub static REQUEST_STATUSES: [StatusDescriptor; 6] = [
    StatusDescriptor::new("received", "접수됨", "#f0f9ff", "#0c4a6e"),
    StatusDescriptor::new("in_progress", "작업중", "#dbeafe", "#1e40af"),
    StatusDescriptor::new("work_completed", "작업완료", "#e0e7ff", "#3730a3"),
    StatusDescriptor::new("sent", "발송완료", "#dcfce7", "#166534"),
    StatusDescriptor::new("impossible", "작업불가", "#fce7f3", "#9f1239"),
    StatusDescriptor::new("cancelled", "취소됨", "#fee2e2", "#991b1b"),
];

impl RequestStatus {
    pub const ALL: [RequestStatus; 6] = [
        RequestStatus::Received,
        RequestStatus::InProgress,
        RequestStatus::WorkCompleted,
        RequestStatus::Sent,
        RequestStatus::Impossible,
        RequestStatus::Cancelled,
    ];

    pub fn descriptor(&self) -> &'static StatusDescriptor {
        &REQUEST_STATUSES[*self as usize]
    }

    pub fn code(&self) -> &'static str {
        self.descriptor().code
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

/// Payment state of an order, replicated on every request row of that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentStatus(pub bool);

/// `[unpaid, paid]`
pub static PAYMENT_STATUSES: [StatusDescriptor; 2] = [
    StatusDescriptor::new("false", "미결제", "#fee2e2", "#991b1b"),
    StatusDescriptor::new("true", "결제 완료", "#dcfce7", "#166534"),
];

impl PaymentStatus {
    pub fn is_paid(&self) -> bool {
        self.0
    }

    pub fn descriptor(&self) -> &'static StatusDescriptor {
        &PAYMENT_STATUSES[usize::from(self.0)]
    }

    /// Value written to `data-current-payment`, matching the server template
    pub fn data_value(&self) -> &'static str {
        if self.0 {
            "True"
        } else {
            "False"
        }
    }

    /// Parse a `data-current-payment` value ("True", "true", "1", ...)
    pub fn from_data_value(value: &str) -> Self {
        let value = value.trim();
        Self(value.eq_ignore_ascii_case("true") || value == "1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_enum() {
        for status in RequestStatus::ALL {
            assert_eq!(RequestStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(RequestStatus::WorkCompleted.descriptor().display_name, "작업완료");
    }

    #[test]
    fn payment_data_value_round_trip() {
        for paid in [true, false] {
            let status = PaymentStatus(paid);
            assert_eq!(PaymentStatus::from_data_value(status.data_value()), status);
        }
        assert!(PaymentStatus::from_data_value("true").is_paid());
        assert!(!PaymentStatus::from_data_value("").is_paid());
        assert_eq!(PaymentStatus(true).descriptor().display_name, "결제 완료");
    }
}
