use crate::domain::common::EntityKind;

/// The four customer notifications sent from the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// 견적 및 입금 안내
    Quotation,
    /// 결제 완료 안내
    PaymentCompletion,
    /// 속기록 초안/수정안
    DraftGuide,
    /// 속기록 최종안
    FinalDraftGuide,
}

pub const VALIDATION_TRANSPORT_FAILED: &str = "검증 중 오류가 발생했습니다.";
pub const HISTORY_TRANSPORT_FAILED: &str = "발송 이력 확인 중 오류가 발생했습니다.";
pub const SEND_FAILED: &str = "발송에 실패했습니다.";
pub const SEND_TRANSPORT_FAILED: &str = "발송 중 오류가 발생했습니다.";

impl NotificationKind {
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::Quotation,
        NotificationKind::PaymentCompletion,
        NotificationKind::DraftGuide,
        NotificationKind::FinalDraftGuide,
    ];

    /// Kind of id the notification is addressed by
    pub fn entity(self) -> EntityKind {
        match self {
            NotificationKind::Quotation | NotificationKind::PaymentCompletion => EntityKind::Order,
            NotificationKind::DraftGuide | NotificationKind::FinalDraftGuide => EntityKind::Request,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            NotificationKind::Quotation => "quotation",
            NotificationKind::PaymentCompletion => "payment-completion",
            NotificationKind::DraftGuide => "draft-guide",
            NotificationKind::FinalDraftGuide => "final-draft-guide",
        }
    }

    pub fn validate_path(self) -> String {
        format!("/api/send/validate-{}/", self.slug())
    }

    pub fn send_path(self) -> &'static str {
        match self {
            NotificationKind::Quotation => "/api/send/quotation-guide/",
            NotificationKind::PaymentCompletion => "/api/send/payment-completion-guide/",
            NotificationKind::DraftGuide => "/api/send/draft-guide/",
            NotificationKind::FinalDraftGuide => "/api/send/final-draft-guide/",
        }
    }

    /// `email_type` of the history check
    pub fn email_type(self) -> &'static str {
        match self {
            NotificationKind::Quotation => "quotation_guide",
            NotificationKind::PaymentCompletion => "payment_completion_guide",
            NotificationKind::DraftGuide => "draft_guide",
            NotificationKind::FinalDraftGuide => "final_draft_guide",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::Quotation => "견적 및 입금 안내",
            NotificationKind::PaymentCompletion => "결제 완료 안내",
            NotificationKind::DraftGuide => "초안/수정안",
            NotificationKind::FinalDraftGuide => "최종안",
        }
    }

    pub fn is_final_draft(self) -> bool {
        self == NotificationKind::FinalDraftGuide
    }

    /// Shown when the server answers without a message
    pub fn default_success_message(self) -> String {
        format!("{}를 발송했습니다.", self.label())
    }

    pub fn resend_success_message(self) -> String {
        format!("{}를 재발송했습니다.", self.label())
    }

    /// Heading of the duplicate history modal
    pub fn duplicate_intro(self) -> String {
        match self.entity() {
            EntityKind::Order => {
                format!("다음 주문에 대해 이미 {}를 발송한 이력이 있습니다:", self.label())
            }
            EntityKind::Request => format!(
                "선택한 파일 중 다음 파일들은 이미 {}를 발송한 이력이 있습니다:",
                self.label()
            ),
        }
    }

    /// Extra note of the duplicate modal; revisions are expected to be resent
    pub fn duplicate_note(self) -> Option<&'static str> {
        match self {
            NotificationKind::DraftGuide => Some("⚠️ 수정안을 여러 번 보내는 것은 정상적인 프로세스입니다."),
            _ => None,
        }
    }

    pub fn resend_question(self) -> &'static str {
        match self.entity() {
            EntityKind::Order => "정말 다시 발송하시겠습니까?",
            EntityKind::Request => "다시 발송하시겠습니까?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let q = NotificationKind::Quotation;
        assert_eq!(q.validate_path(), "/api/send/validate-quotation/");
        assert_eq!(q.send_path(), "/api/send/quotation-guide/");
        assert_eq!(q.email_type(), "quotation_guide");

        let f = NotificationKind::FinalDraftGuide;
        assert_eq!(f.validate_path(), "/api/send/validate-final-draft-guide/");
        assert_eq!(f.send_path(), "/api/send/final-draft-guide/");
        assert_eq!(f.entity(), EntityKind::Request);
        assert!(f.is_final_draft());
    }

    #[test]
    fn messages() {
        assert_eq!(
            NotificationKind::Quotation.default_success_message(),
            "견적 및 입금 안내를 발송했습니다."
        );
        assert_eq!(
            NotificationKind::PaymentCompletion.resend_success_message(),
            "결제 완료 안내를 재발송했습니다."
        );
        assert!(NotificationKind::DraftGuide.duplicate_note().is_some());
        assert!(NotificationKind::FinalDraftGuide.duplicate_note().is_none());
    }
}
