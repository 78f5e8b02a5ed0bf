use super::{describe_payment, StatusCode};
use crate::domain::a002_request::PaymentStatus;

/// Everything written into a status/payment badge after a successful change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgePatch {
    pub class_name: String,
    pub text: &'static str,
    pub background: &'static str,
    pub color: &'static str,
    /// New value of the cell's `data-current-status` / `data-current-payment`
    pub data_value: String,
}

impl BadgePatch {
    pub fn status(status: StatusCode) -> Self {
        let d = status.descriptor();
        Self {
            class_name: format!("status-badge status-{}", d.code),
            text: d.display_name,
            background: d.background,
            color: d.text_color,
            data_value: d.code.to_string(),
        }
    }

    pub fn payment(paid: bool) -> Self {
        let d = describe_payment(paid);
        Self {
            class_name: format!("payment-badge payment-{}", paid),
            text: d.display_name,
            background: d.background,
            color: d.text_color,
            data_value: PaymentStatus(paid).data_value().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_order::OrderStatus;

    #[test]
    fn status_patch() {
        let patch = BadgePatch::status(StatusCode::Order(OrderStatus::Refunded));
        assert_eq!(patch.class_name, "status-badge status-refunded");
        assert_eq!(patch.text, "환불완료");
        assert_eq!(patch.data_value, "refunded");
    }

    #[test]
    fn payment_patch() {
        let paid = BadgePatch::payment(true);
        assert_eq!(paid.class_name, "payment-badge payment-true");
        assert_eq!(paid.text, "결제 완료");
        assert_eq!(paid.data_value, "True");
        assert_eq!((paid.background, paid.color), ("#dcfce7", "#166534"));
        assert_eq!(BadgePatch::payment(false).text, "미결제");
    }
}
