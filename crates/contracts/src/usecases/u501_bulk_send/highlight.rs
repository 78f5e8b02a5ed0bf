use super::validation::ValidationResult;
use crate::domain::common::EntityKind;

/// Background of a cell named by a validation error
pub const CELL_BACKGROUND: &str = "#ffb3b3";
/// Left border of a row with errors
pub const ROW_ACCENT: &str = "4px solid #dc2626";
/// Delay before the first invalid row is scrolled into view
pub const SCROLL_DELAY_MS: u32 = 100;

static KEYWORD_FIELDS: [(&str, &str); 4] = [
    ("결제 금액", "payment_amount"),
    ("이메일", "email"),
    ("상태", "status"),
    ("파일", "transcript_file"),
];

/// `data-field` values of the cells an error message points at
pub fn fields_for_error(error: &str) -> impl Iterator<Item = &'static str> + '_ {
    KEYWORD_FIELDS
        .iter()
        .filter(move |(keyword, _)| error.contains(keyword))
        .map(|(_, field)| *field)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHighlight {
    pub id: String,
    pub fields: Vec<&'static str>,
}

/// Cells and rows to mark after "highlight invalid"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightPlan {
    pub kind: EntityKind,
    pub rows: Vec<RowHighlight>,
}

impl HighlightPlan {
    pub fn from_invalid(kind: EntityKind, invalid: &[ValidationResult]) -> Self {
        let rows = invalid
            .iter()
            .filter_map(|result| {
                let id = result.id(kind)?;
                let mut fields: Vec<&'static str> = Vec::new();
                for field in result.errors.iter().flat_map(|e| fields_for_error(e)) {
                    if !fields.contains(&field) {
                        fields.push(field);
                    }
                }
                Some(RowHighlight {
                    id: id.to_string(),
                    fields,
                })
            })
            .collect();
        Self { kind, rows }
    }

    /// Row scrolled into view
    pub fn first_id(&self) -> Option<&str> {
        self.rows.first().map(|r| r.id.as_str())
    }

    pub fn notice(&self) -> String {
        format!(
            "{}개 {}에 필수 항목이 누락되었습니다. 빨간색으로 표시된 셀을 확인해주세요.",
            self.rows.len(),
            self.kind.noun()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_to_fields() {
        let fields: Vec<_> = fields_for_error("결제 금액과 이메일이 필요합니다").collect();
        assert_eq!(fields, vec!["payment_amount", "email"]);
        let fields: Vec<_> = fields_for_error("속기록 파일이 없습니다").collect();
        assert_eq!(fields, vec!["transcript_file"]);
        assert_eq!(fields_for_error("기타").count(), 0);
    }

    #[test]
    fn plan_from_invalid_rows() {
        let invalid = vec![
            ValidationResult {
                request_id: Some("R2".into()),
                errors: vec!["작업 상태가 올바르지 않습니다".into(), "상태 확인".into()],
                ..Default::default()
            },
            ValidationResult {
                request_id: None,
                errors: vec!["이메일".into()],
                ..Default::default()
            },
        ];
        let plan = HighlightPlan::from_invalid(EntityKind::Request, &invalid);
        assert_eq!(plan.rows.len(), 1);
        assert_eq!(plan.rows[0].fields, vec!["status"]);
        assert_eq!(plan.first_id(), Some("R2"));
        assert!(plan.notice().starts_with("1개 요청에"));
    }
}
