use super::notification::NotificationKind;
use super::selection::SendIds;
use crate::domain::common::EntityKind;
use crate::error::ApiError;
use crate::shared::lenient::{format_won, opt_amount, opt_id};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/send/check-history/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckHistoryRequest {
    #[serde(flatten)]
    pub ids: SendIds,
    pub email_type: String,
}

impl CheckHistoryRequest {
    pub fn new(kind: NotificationKind, ids: Vec<String>) -> Self {
        Self {
            ids: SendIds::new(kind.entity(), ids),
            email_type: kind.email_type().to_string(),
        }
    }
}

/// A previous send of the same notification
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DuplicateHistoryItem {
    #[serde(default, deserialize_with = "opt_id")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id")]
    pub request_id: Option<String>,
    #[serde(default)]
    pub email_type_display: String,
    #[serde(default)]
    pub sent_at: String,
    #[serde(default, deserialize_with = "opt_amount")]
    pub payment_amount: Option<f64>,
    #[serde(default)]
    pub recipient_email: String,
    #[serde(default)]
    pub send_count: u32,
}

impl DuplicateHistoryItem {
    pub fn send_count_label(&self) -> String {
        format!("{}회", self.send_count)
    }

    pub fn payment_amount_label(&self) -> String {
        format_won(self.payment_amount.unwrap_or(0.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CheckHistoryResponse {
    #[serde(default)]
    pub has_duplicate: bool,
    #[serde(default)]
    pub duplicate_history: Vec<DuplicateHistoryItem>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Send waiting for the user to confirm a resend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingSendSelection {
    /// Quotation / payment completion: order ids with their endpoint
    Orders {
        endpoint: String,
        order_ids: Vec<String>,
        success_message: String,
    },
    /// Draft / final draft: request ids
    Requests {
        request_ids: Vec<String>,
        is_final_draft: bool,
    },
}

impl PendingSendSelection {
    pub fn new(kind: NotificationKind, ids: Vec<String>, resend: bool) -> Self {
        match kind.entity() {
            EntityKind::Order => PendingSendSelection::Orders {
                endpoint: kind.send_path().to_string(),
                order_ids: ids,
                success_message: if resend {
                    kind.resend_success_message()
                } else {
                    kind.default_success_message()
                },
            },
            EntityKind::Request => PendingSendSelection::Requests {
                request_ids: ids,
                is_final_draft: kind.is_final_draft(),
            },
        }
    }

    pub fn kind(&self) -> NotificationKind {
        match self {
            PendingSendSelection::Orders { endpoint, .. } => {
                if endpoint == NotificationKind::PaymentCompletion.send_path() {
                    NotificationKind::PaymentCompletion
                } else {
                    NotificationKind::Quotation
                }
            }
            PendingSendSelection::Requests { is_final_draft: true, .. } => {
                NotificationKind::FinalDraftGuide
            }
            PendingSendSelection::Requests { .. } => NotificationKind::DraftGuide,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            PendingSendSelection::Orders { endpoint, .. } => endpoint,
            PendingSendSelection::Requests { .. } => self.kind().send_path(),
        }
    }

    pub fn body(&self) -> SendIds {
        match self {
            PendingSendSelection::Orders { order_ids, .. } => SendIds::Orders {
                order_ids: order_ids.clone(),
            },
            PendingSendSelection::Requests { request_ids, .. } => SendIds::Requests {
                request_ids: request_ids.clone(),
            },
        }
    }

    /// Message used when the server does not send one
    pub fn success_message(&self) -> String {
        match self {
            PendingSendSelection::Orders { success_message, .. } => success_message.clone(),
            PendingSendSelection::Requests { .. } => self.kind().default_success_message(),
        }
    }
}

/// What happens after the history check
#[derive(Debug, Clone, PartialEq)]
pub enum SendGate {
    /// No previous sends: go ahead
    Proceed(PendingSendSelection),
    /// Previous sends exist: the user must confirm first
    ConfirmResend {
        selection: PendingSendSelection,
        history: Vec<DuplicateHistoryItem>,
    },
}

impl SendGate {
    pub fn decide(
        kind: NotificationKind,
        ids: Vec<String>,
        response: CheckHistoryResponse,
    ) -> Result<Self, ApiError> {
        if let Some(error) = response.error.filter(|e| !e.is_empty()) {
            return Err(ApiError::application(error));
        }
        if response.has_duplicate {
            Ok(SendGate::ConfirmResend {
                selection: PendingSendSelection::new(kind, ids, true),
                history: response.duplicate_history,
            })
        } else {
            Ok(SendGate::Proceed(PendingSendSelection::new(kind, ids, false)))
        }
    }
}

/// Slot holding the selection while the duplicate modal is open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSend {
    slot: Option<PendingSendSelection>,
}

impl PendingSend {
    pub fn hold(&mut self, selection: PendingSendSelection) {
        self.slot = Some(selection);
    }

    /// Confirm consumes the selection
    pub fn confirm(&mut self) -> Option<PendingSendSelection> {
        self.slot.take()
    }

    pub fn cancel(&mut self) {
        self.slot = None;
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_request_body() {
        let req = CheckHistoryRequest::new(NotificationKind::DraftGuide, vec!["R1".into()]);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"request_ids": ["R1"], "email_type": "draft_guide"})
        );
    }

    #[test]
    fn duplicate_requires_confirmation() {
        let response: CheckHistoryResponse = serde_json::from_str(
            r#"{"has_duplicate": true, "duplicate_history": [{"order_id": "O1",
                "email_type_display": "견적 및 입금 안내", "sent_at": "2024-05-01 10:00",
                "payment_amount": "55000", "recipient_email": "a@b.c", "send_count": 2}]}"#,
        )
        .unwrap();
        let gate = SendGate::decide(NotificationKind::Quotation, vec!["O1".into()], response).unwrap();
        let SendGate::ConfirmResend { selection, history } = gate else {
            panic!("expected confirmation");
        };
        assert_eq!(history[0].send_count_label(), "2회");
        assert_eq!(history[0].payment_amount_label(), "55,000원");
        assert_eq!(selection.success_message(), "견적 및 입금 안내를 재발송했습니다.");

        let mut pending = PendingSend::default();
        pending.hold(selection.clone());
        assert_eq!(pending.confirm(), Some(selection));
        assert!(!pending.is_pending());
        assert_eq!(pending.confirm(), None);
    }

    #[test]
    fn no_duplicate_proceeds() {
        let gate = SendGate::decide(
            NotificationKind::FinalDraftGuide,
            vec!["R1".into()],
            CheckHistoryResponse::default(),
        )
        .unwrap();
        let SendGate::Proceed(selection) = gate else {
            panic!("expected proceed");
        };
        assert_eq!(selection.endpoint(), "/api/send/final-draft-guide/");
        assert_eq!(selection.kind(), NotificationKind::FinalDraftGuide);
        assert_eq!(
            serde_json::to_value(selection.body()).unwrap(),
            serde_json::json!({"request_ids": ["R1"]})
        );
    }

    #[test]
    fn cancel_clears_pending() {
        let mut pending = PendingSend::default();
        pending.hold(PendingSendSelection::new(
            NotificationKind::PaymentCompletion,
            vec!["O1".into()],
            true,
        ));
        pending.cancel();
        assert_eq!(pending.confirm(), None);
    }

    #[test]
    fn order_selection_round_trips_kind() {
        for kind in NotificationKind::ALL {
            let selection = PendingSendSelection::new(kind, vec!["X".into()], false);
            assert_eq!(selection.kind(), kind);
            assert_eq!(selection.endpoint(), kind.send_path());
        }
    }
}
