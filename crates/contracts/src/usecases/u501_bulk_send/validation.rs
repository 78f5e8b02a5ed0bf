use super::notification::NotificationKind;
use super::selection::SendIds;
use crate::domain::common::EntityKind;
use crate::error::ApiError;
use crate::shared::lenient::{format_won, opt_amount, opt_id};
use serde::Deserialize;
use std::collections::HashSet;

/// One row of a validation response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValidationResult {
    #[serde(default, deserialize_with = "opt_id")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id")]
    pub request_id: Option<String>,
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub payment_amount: Option<f64>,
    #[serde(default)]
    pub transcript_file: Option<String>,
    #[serde(default)]
    pub status_display: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn id(&self, kind: EntityKind) -> Option<&str> {
        match kind {
            EntityKind::Order => self.order_id.as_deref(),
            EntityKind::Request => self.request_id.as_deref(),
        }
    }

    /// File name part of the stored transcript key
    pub fn transcript_file_name(&self) -> Option<&str> {
        self.transcript_file
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(|f| f.rsplit('/').next().unwrap_or(f))
    }

    pub fn payment_amount_label(&self) -> Option<String> {
        self.payment_amount.filter(|a| *a != 0.0).map(format_won)
    }
}

/// Body of `POST /api/send/validate-*/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValidationResponse {
    #[serde(default)]
    pub results: Vec<ValidationResult>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ValidationResponse {
    pub fn into_results(self) -> Result<Vec<ValidationResult>, ApiError> {
        match self.error {
            Some(error) if !error.is_empty() => Err(ApiError::application(error)),
            _ => Ok(self.results),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    AllValid,
    NoneValid,
    Mixed,
}

/// Buttons of the validation modal, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationAction {
    Cancel,
    Send,
    SendValidOnly(usize),
    HighlightInvalid,
}

impl ValidationAction {
    pub fn label(&self, kind: NotificationKind) -> String {
        match self {
            ValidationAction::Cancel => "취소".to_string(),
            ValidationAction::Send => "발송하기".to_string(),
            ValidationAction::SendValidOnly(n) => {
                format!("문제없는 {}개 {}만 발송", n, kind.entity().noun())
            }
            ValidationAction::HighlightInvalid => {
                format!("확인 - 문제 {} 확인하기", kind.entity().noun())
            }
        }
    }
}

/// Validation results split into valid and invalid rows
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub kind: NotificationKind,
    pub valid: Vec<ValidationResult>,
    pub invalid: Vec<ValidationResult>,
}

impl ValidationReport {
    pub fn partition(kind: NotificationKind, results: Vec<ValidationResult>) -> Self {
        let (valid, invalid) = results.into_iter().partition(|r| r.valid);
        Self {
            kind,
            valid,
            invalid,
        }
    }

    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }

    /// An empty report counts as `NoneValid`: there is nothing to send.
    pub fn outcome(&self) -> ValidationOutcome {
        match (self.valid.is_empty(), self.invalid.is_empty()) {
            (false, true) => ValidationOutcome::AllValid,
            (false, false) => ValidationOutcome::Mixed,
            (true, _) => ValidationOutcome::NoneValid,
        }
    }

    pub fn actions(&self) -> Vec<ValidationAction> {
        let mut actions = vec![ValidationAction::Cancel];
        match self.outcome() {
            ValidationOutcome::AllValid => actions.push(ValidationAction::Send),
            ValidationOutcome::Mixed => {
                actions.push(ValidationAction::SendValidOnly(self.valid.len()));
                actions.push(ValidationAction::HighlightInvalid);
            }
            ValidationOutcome::NoneValid if !self.invalid.is_empty() => {
                actions.push(ValidationAction::HighlightInvalid)
            }
            ValidationOutcome::NoneValid => {}
        }
        actions
    }

    pub fn valid_ids(&self) -> Vec<String> {
        let entity = self.kind.entity();
        self.valid
            .iter()
            .filter_map(|r| r.id(entity))
            .map(str::to_string)
            .collect()
    }

    /// Ids the send call carries after `action`; `None` for actions that do not send
    pub fn send_ids(&self, action: ValidationAction) -> Option<SendIds> {
        match action {
            ValidationAction::Send | ValidationAction::SendValidOnly(_) => {
                Some(SendIds::new(self.kind.entity(), self.valid_ids()))
            }
            ValidationAction::Cancel | ValidationAction::HighlightInvalid => None,
        }
    }

    /// Checked ids that must be unchecked before sending only the valid ones
    pub fn ids_to_uncheck<'a>(&self, checked: &'a [String]) -> Vec<&'a str> {
        let valid: HashSet<String> = self.valid_ids().into_iter().collect();
        checked
            .iter()
            .filter(|id| !valid.contains(id.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn intro(&self) -> String {
        format!(
            "다음 {}개 {}에 이메일을 발송합니다:",
            self.total(),
            self.kind.entity().noun()
        )
    }

    /// Warning under the list; `None` when every row is valid
    pub fn summary(&self) -> Option<String> {
        if self.invalid.is_empty() {
            return None;
        }
        Some(format!(
            "총 {}개 {} 중 {}개에 문제가 있습니다.",
            self.total(),
            self.kind.entity().noun(),
            self.invalid.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(order_id: &str, valid: bool, errors: &[&str]) -> ValidationResult {
        ValidationResult {
            order_id: Some(order_id.to_string()),
            valid,
            errors: errors.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn mixed_results_offer_send_valid_only() {
        let report = ValidationReport::partition(
            NotificationKind::Quotation,
            vec![
                result("O1", true, &[]),
                result("O2", false, &["결제 금액이 입력되지 않았습니다."]),
                result("O3", true, &[]),
            ],
        );
        assert_eq!(report.outcome(), ValidationOutcome::Mixed);
        assert_eq!(
            report.actions(),
            vec![
                ValidationAction::Cancel,
                ValidationAction::SendValidOnly(2),
                ValidationAction::HighlightInvalid
            ]
        );
        let ids = report.send_ids(ValidationAction::SendValidOnly(2)).unwrap();
        assert_eq!(ids.ids(), ["O1".to_string(), "O3".to_string()]);
        assert!(!ids.ids().contains(&"O2".to_string()));

        let checked = vec!["O1".to_string(), "O2".to_string(), "O3".to_string()];
        assert_eq!(report.ids_to_uncheck(&checked), vec!["O2"]);
        assert_eq!(report.summary().unwrap(), "총 3개 주문 중 1개에 문제가 있습니다.");
        assert_eq!(
            ValidationAction::SendValidOnly(2).label(NotificationKind::Quotation),
            "문제없는 2개 주문만 발송"
        );
    }

    #[test]
    fn all_and_none_valid() {
        let all = ValidationReport::partition(
            NotificationKind::PaymentCompletion,
            vec![result("O1", true, &[])],
        );
        assert_eq!(all.outcome(), ValidationOutcome::AllValid);
        assert_eq!(all.actions(), vec![ValidationAction::Cancel, ValidationAction::Send]);
        assert_eq!(all.summary(), None);

        let none = ValidationReport::partition(
            NotificationKind::Quotation,
            vec![result("O1", false, &["이메일 누락"])],
        );
        assert_eq!(none.outcome(), ValidationOutcome::NoneValid);
        assert_eq!(
            none.actions(),
            vec![ValidationAction::Cancel, ValidationAction::HighlightInvalid]
        );
        assert_eq!(none.send_ids(ValidationAction::HighlightInvalid), None);

        let empty = ValidationReport::partition(NotificationKind::Quotation, Vec::new());
        assert_eq!(empty.actions(), vec![ValidationAction::Cancel]);
    }

    #[test]
    fn response_error_is_application_failure() {
        let resp: ValidationResponse =
            serde_json::from_str(r#"{"error": "권한이 없습니다."}"#).unwrap();
        assert_eq!(
            resp.into_results().unwrap_err(),
            ApiError::application("권한이 없습니다.")
        );
    }

    #[test]
    fn request_results_parse() {
        let resp: ValidationResponse = serde_json::from_str(
            r#"{"results": [{"request_id": "2024010101", "valid": true, "customer_name": "홍길동",
                "email": "a@b.c", "transcript_file": "transcripts/2024/final.docx",
                "status_display": "작업완료", "errors": []}]}"#,
        )
        .unwrap();
        let results = resp.into_results().unwrap();
        let report = ValidationReport::partition(NotificationKind::DraftGuide, results);
        assert_eq!(report.valid_ids(), vec!["2024010101"]);
        assert_eq!(report.valid[0].transcript_file_name(), Some("final.docx"));
        assert_eq!(report.intro(), "다음 1개 요청에 이메일을 발송합니다:");
    }
}
