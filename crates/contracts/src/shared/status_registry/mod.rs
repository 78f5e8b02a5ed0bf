//! Status registry: display metadata and transition table for Order and
//! Request statuses, plus the payment badge.
//!
//! Every badge and dropdown color on the page comes from here.

pub mod badge;
pub mod transitions;

pub use badge::BadgePatch;
pub use transitions::{AllowAllTransitions, DeclaredTransitions, TransitionPolicy};

use crate::domain::a001_order::OrderStatus;
use crate::domain::a002_request::{PaymentStatus, RequestStatus};
use crate::domain::common::EntityKind;
use serde::Serialize;

/// Display metadata of one status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDescriptor {
    pub code: &'static str,
    pub display_name: &'static str,
    pub background: &'static str,
    pub text_color: &'static str,
}

impl StatusDescriptor {
    pub const fn new(
        code: &'static str,
        display_name: &'static str,
        background: &'static str,
        text_color: &'static str,
    ) -> Self {
        Self {
            code,
            display_name,
            background,
            text_color,
        }
    }

    /// Inline style for the small colored dot in dropdown items
    pub fn dot_style(&self) -> String {
        format!(
            "background: {}; border: 2px solid {};",
            self.background, self.text_color
        )
    }
}

/// A status of either kind. Serializes as its bare code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum StatusCode {
    Order(OrderStatus),
    Request(RequestStatus),
}

impl StatusCode {
    /// `None` when `code` is unknown for `kind`
    pub fn parse(kind: EntityKind, code: &str) -> Option<Self> {
        match kind {
            EntityKind::Order => OrderStatus::from_code(code).map(StatusCode::Order),
            EntityKind::Request => RequestStatus::from_code(code).map(StatusCode::Request),
        }
    }

    /// Every status of `kind`, in dropdown order
    pub fn all(kind: EntityKind) -> Vec<Self> {
        match kind {
            EntityKind::Order => OrderStatus::ALL.map(StatusCode::Order).to_vec(),
            EntityKind::Request => RequestStatus::ALL.map(StatusCode::Request).to_vec(),
        }
    }

    pub fn kind(self) -> EntityKind {
        match self {
            StatusCode::Order(_) => EntityKind::Order,
            StatusCode::Request(_) => EntityKind::Request,
        }
    }

    pub fn descriptor(self) -> &'static StatusDescriptor {
        match self {
            StatusCode::Order(s) => s.descriptor(),
            StatusCode::Request(s) => s.descriptor(),
        }
    }

    pub fn code(self) -> &'static str {
        self.descriptor().code
    }
}

/// Look up a status code. `None` means the code is unknown for that kind.
pub fn describe(kind: EntityKind, code: &str) -> Option<&'static StatusDescriptor> {
    StatusCode::parse(kind, code).map(StatusCode::descriptor)
}

/// Payment badge metadata
pub fn describe_payment(paid: bool) -> &'static StatusDescriptor {
    PaymentStatus(paid).descriptor()
}

/// Suffix appended to the option matching the current value
pub const CURRENT_MARKER: &str = " (현재)";

/// One entry of the status dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption {
    pub status: StatusCode,
    pub descriptor: &'static StatusDescriptor,
    pub is_current: bool,
    pub allowed: bool,
}

impl StatusOption {
    pub fn label(&self) -> String {
        if self.is_current {
            format!("{}{}", self.descriptor.display_name, CURRENT_MARKER)
        } else {
            self.descriptor.display_name.to_string()
        }
    }
}

/// Dropdown entries for `kind`. Every status is listed; `allowed` is decided
/// by the injected policy.
pub fn options(kind: EntityKind, current: &str, policy: &dyn TransitionPolicy) -> Vec<StatusOption> {
    StatusCode::all(kind)
        .into_iter()
        .map(|status| StatusOption {
            status,
            descriptor: status.descriptor(),
            is_current: status.code() == current,
            allowed: policy.is_allowed(current, status.code()),
        })
        .collect()
}

/// One entry of the payment dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentOption {
    pub paid: bool,
    pub descriptor: &'static StatusDescriptor,
    pub is_current: bool,
}

impl PaymentOption {
    pub fn label(&self) -> String {
        if self.is_current {
            format!("{}{}", self.descriptor.display_name, CURRENT_MARKER)
        } else {
            self.descriptor.display_name.to_string()
        }
    }
}

/// `[unpaid, paid]`
pub fn payment_options(current: bool) -> [PaymentOption; 2] {
    [false, true].map(|paid| PaymentOption {
        paid,
        descriptor: describe_payment(paid),
        is_current: paid == current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_is_referentially_stable() {
        for kind in [EntityKind::Order, EntityKind::Request] {
            for status in StatusCode::all(kind) {
                let a = describe(kind, status.code()).unwrap();
                let b = describe(kind, status.code()).unwrap();
                assert!(std::ptr::eq(a, b));
                assert!(std::ptr::eq(a, status.descriptor()));
            }
        }
    }

    #[test]
    fn kinds_are_independent() {
        assert!(describe(EntityKind::Order, "refunded").is_some());
        assert!(describe(EntityKind::Request, "refunded").is_none());
        assert!(describe(EntityKind::Order, "payment_completed").is_some());
        assert!(describe(EntityKind::Request, "payment_completed").is_none());
        assert!(describe(EntityKind::Request, "in_progress").is_some());
        assert!(describe(EntityKind::Order, "in_progress").is_none());
        assert!(describe(EntityKind::Order, "work_completed").is_none());
        assert!(describe(EntityKind::Order, "").is_none());
    }

    #[test]
    fn status_code_parses_per_kind() {
        let refunded = StatusCode::parse(EntityKind::Order, "refunded").unwrap();
        assert_eq!(refunded, StatusCode::Order(OrderStatus::Refunded));
        assert_eq!(refunded.kind(), EntityKind::Order);
        assert_eq!(StatusCode::parse(EntityKind::Request, "refunded"), None);

        let sent = StatusCode::parse(EntityKind::Request, "sent").unwrap();
        assert_eq!(sent, StatusCode::Request(RequestStatus::Sent));
        assert_eq!(serde_json::to_value(sent).unwrap(), serde_json::json!("sent"));
    }

    #[test]
    fn each_kind_has_six_codes() {
        assert_eq!(StatusCode::all(EntityKind::Order).len(), 6);
        assert_eq!(StatusCode::all(EntityKind::Request).len(), 6);
    }

    #[test]
    fn options_mark_current_and_allow_everything_by_default() {
        let opts = options(EntityKind::Request, "in_progress", &AllowAllTransitions);
        assert_eq!(opts.len(), 6);
        assert!(opts.iter().all(|o| o.allowed));
        let current: Vec<_> = opts.iter().filter(|o| o.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].label(), "작업중 (현재)");
        assert_eq!(opts[0].label(), "접수됨");
        assert_eq!(opts[1].status, StatusCode::Request(RequestStatus::InProgress));
    }

    #[test]
    fn options_follow_declared_policy() {
        let opts = options(EntityKind::Order, "received", &DeclaredTransitions);
        let allowed: Vec<_> = opts
            .iter()
            .filter(|o| o.allowed)
            .map(|o| o.descriptor.code)
            .collect();
        assert_eq!(allowed, vec!["payment_completed", "impossible", "cancelled"]);
    }

    #[test]
    fn payment_options_mark_current() {
        let opts = payment_options(true);
        assert!(!opts[0].is_current);
        assert_eq!(opts[1].label(), "결제 완료 (현재)");
        assert_eq!(opts[0].label(), "미결제");
    }
}
