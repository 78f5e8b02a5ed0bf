use contracts::domain::common::EntityKind;
use contracts::usecases::u501_bulk_send::{
    DuplicateHistoryItem, NotificationKind, ValidationAction, ValidationReport, ValidationResult,
};
use leptos::prelude::*;
use thaw::*;

const MISSING_INPUT: &str = "미입력 ← 필수 항목";
const MISSING_UPLOAD: &str = "미업로드 ← 필수 항목";

struct Palette {
    background: &'static str,
    border: &'static str,
    mark: &'static str,
    title: &'static str,
    text: &'static str,
}

const VALID: Palette = Palette {
    background: "#f0fdf4",
    border: "#86efac",
    mark: "#16a34a",
    title: "#166534",
    text: "#15803d",
};

const VALID_PAYMENT: Palette = Palette {
    background: "#eff6ff",
    border: "#93c5fd",
    mark: "#2563eb",
    title: "#1e40af",
    text: "#1e40af",
};

const INVALID: Palette = Palette {
    background: "#fef2f2",
    border: "#fca5a5",
    mark: "#dc2626",
    title: "#991b1b",
    text: "#b91c1c",
};

/// One `• label: value` line of a validation row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
    /// Value is a required-field marker
    pub missing: bool,
}

impl DetailLine {
    fn present(label: &'static str, value: String) -> Self {
        Self { label, value, missing: false }
    }

    /// `value`, or the marker when the row failed and the value is blank
    fn required(label: &'static str, value: Option<String>, valid: bool, marker: &str) -> Self {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => Self::present(label, value),
            None if valid => Self::present(label, "-".to_string()),
            None => Self {
                label,
                value: marker.to_string(),
                missing: true,
            },
        }
    }
}

pub fn row_heading(kind: NotificationKind, result: &ValidationResult) -> String {
    let entity = kind.entity();
    let prefix = match entity {
        EntityKind::Order => "Order",
        EntityKind::Request => "Request",
    };
    let customer = result
        .customer_name
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or("정보 없음");
    format!("{} {} ({})", prefix, result.id(entity).unwrap_or("-"), customer)
}

pub fn detail_lines(kind: NotificationKind, result: &ValidationResult) -> Vec<DetailLine> {
    let email = DetailLine::required("이메일", result.email.clone(), result.valid, MISSING_INPUT);
    match kind.entity() {
        EntityKind::Order => vec![
            DetailLine::required(
                "결제 금액",
                result.payment_amount_label(),
                result.valid,
                MISSING_INPUT,
            ),
            email,
        ],
        EntityKind::Request => vec![
            DetailLine::required(
                "속기록 파일",
                result.transcript_file_name().map(str::to_string),
                result.valid,
                MISSING_UPLOAD,
            ),
            email,
            DetailLine::present(
                "상태",
                result
                    .status_display
                    .clone()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ],
    }
}

fn result_card(kind: NotificationKind, result: &ValidationResult) -> impl IntoView {
    let palette = match (result.valid, kind) {
        (false, _) => &INVALID,
        (true, NotificationKind::PaymentCompletion) => &VALID_PAYMENT,
        (true, _) => &VALID,
    };
    let mark = if result.valid { "✓" } else { "✗" };
    let lines = detail_lines(kind, result)
        .into_iter()
        .map(|line| {
            let value = if line.missing {
                view! { <span style="color: #dc2626; font-weight: 600;">{line.value}</span> }.into_any()
            } else {
                view! { <span>{line.value}</span> }.into_any()
            };
            view! { <div>{format!("• {}: ", line.label)}{value}</div> }
        })
        .collect_view();
    let errors = (!result.errors.is_empty()).then(|| {
        let items = result
            .errors
            .iter()
            .map(|e| view! { <div style="color: #dc2626;">{format!("⚠️ {}", e)}</div> })
            .collect_view();
        view! {
            <div style="margin-top: 8px; padding-top: 8px; border-top: 1px solid #fca5a5;">{items}</div>
        }
    });

    view! {
        <div style=format!(
            "padding: 12px; margin-bottom: 12px; background-color: {}; border: 1px solid {}; border-radius: 8px;",
            palette.background,
            palette.border,
        )>
            <div style="display: flex; align-items: flex-start; gap: 8px;">
                <span style=format!("color: {}; font-size: 18px;", palette.mark)>{mark}</span>
                <div style="flex: 1;">
                    <div style=format!("font-weight: 600; color: {}; margin-bottom: 4px;", palette.title)>
                        {row_heading(kind, result)}
                    </div>
                    <div style=format!("font-size: 14px; color: {};", palette.text)>{lines} {errors}</div>
                </div>
            </div>
        </div>
    }
}

/// Validation results with the actions allowed for them
#[component]
pub fn ValidationDialog(report: ValidationReport, on_action: Callback<ValidationAction>) -> impl IntoView {
    let kind = report.kind;
    let cards = report
        .valid
        .iter()
        .chain(report.invalid.iter())
        .map(|result| result_card(kind, result))
        .collect_view();
    let summary = report.summary().map(|summary| {
        view! {
            <div style="margin-top: 16px; padding: 12px; background-color: #fef3c7; border: 1px solid #fbbf24; border-radius: 8px; color: #92400e;">
                <strong>{summary}</strong>
            </div>
        }
    });
    let buttons = report
        .actions()
        .into_iter()
        .map(|action| {
            let appearance = match action {
                ValidationAction::Cancel => ButtonAppearance::Secondary,
                _ => ButtonAppearance::Primary,
            };
            view! {
                <Button appearance=appearance on_click=move |_| on_action.run(action)>
                    {action.label(kind)}
                </Button>
            }
        })
        .collect_view();

    view! {
        <div class="modal-header">
            <h3 class="modal-title">{format!("{} 발송 확인", kind.label())}</h3>
        </div>
        <div class="modal-body">
            <p style="margin-bottom: 16px; color: #6b7280;">{report.intro()}</p>
            <div style="max-height: 400px; overflow-y: auto;">{cards}</div>
            {summary}
        </div>
        <div class="modal-footer" style="display: flex; justify-content: flex-end; gap: 8px; margin-top: 16px;">
            {buttons}
        </div>
    }
}

fn history_card(kind: NotificationKind, item: &DuplicateHistoryItem) -> impl IntoView {
    let mut rows: Vec<(&'static str, String)> = Vec::with_capacity(6);
    match kind.entity() {
        EntityKind::Order => {
            rows.push(("주문번호:", item.order_id.clone().unwrap_or_default()));
            rows.push(("발송 상태:", item.email_type_display.clone()));
            rows.push(("발송 시간:", item.sent_at.clone()));
            rows.push(("안내 금액:", item.payment_amount_label()));
        }
        EntityKind::Request => {
            rows.push(("Request ID:", item.request_id.clone().unwrap_or_default()));
            rows.push(("발송 타입:", item.email_type_display.clone()));
            rows.push(("발송 시간:", item.sent_at.clone()));
        }
    }
    rows.push(("수신자:", item.recipient_email.clone()));
    let cells = rows
        .into_iter()
        .map(|(label, value)| {
            view! {
                <span style="font-weight: 600; color: #991b1b;">{label}</span>
                <span style="color: #374151;">{value}</span>
            }
        })
        .collect_view();

    view! {
        <div style="background-color: #fef2f2; border-left: 4px solid #dc2626; padding: 16px; margin-bottom: 12px; border-radius: 4px;">
            <div style="display: grid; grid-template-columns: auto 1fr; gap: 8px; font-size: 14px;">
                {cells}
                <span style="font-weight: 600; color: #991b1b;">"발송 횟수:"</span>
                <span style="color: #dc2626; font-weight: 600;">{item.send_count_label()}</span>
            </div>
        </div>
    }
}

/// Previous sends of the same notification; resending needs an explicit confirm
#[component]
pub fn DuplicateDialog(
    kind: NotificationKind,
    history: Vec<DuplicateHistoryItem>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let cards = history.iter().map(|item| history_card(kind, item)).collect_view();
    let note = kind.duplicate_note().map(|note| {
        view! {
            <p style="color: #f59e0b; font-weight: 500; margin-top: 16px; padding: 12px; background-color: #fffbeb; border-radius: 4px; border-left: 4px solid #f59e0b;">
                {note}
            </p>
        }
    });

    view! {
        <div class="modal-header">
            <h3 class="modal-title">"중복 발송 확인"</h3>
        </div>
        <div class="modal-body">
            <p style="color: #374151; margin-bottom: 16px;">{kind.duplicate_intro()}</p>
            <div style="max-height: 400px; overflow-y: auto;">{cards}</div>
            {note}
            <p style="color: #991b1b; font-weight: 500; margin-top: 16px;">{kind.resend_question()}</p>
        </div>
        <div class="modal-footer" style="display: flex; justify-content: flex-end; gap: 8px;">
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                "취소"
            </Button>
            <Button appearance=ButtonAppearance::Primary on_click=move |_| on_confirm.run(())>
                "재발송"
            </Button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_row(valid: bool) -> ValidationResult {
        ValidationResult {
            order_id: Some("A1".into()),
            valid,
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_order_marks_missing_fields() {
        let lines = detail_lines(NotificationKind::Quotation, &order_row(false));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.missing));
        assert_eq!(lines[0].value, MISSING_INPUT);
        assert_eq!(
            row_heading(NotificationKind::Quotation, &order_row(false)),
            "Order A1 (정보 없음)"
        );
    }

    #[test]
    fn test_valid_order_shows_dash_for_blank_amount() {
        let mut row = order_row(true);
        row.email = Some("h@x.kr".into());
        let lines = detail_lines(NotificationKind::PaymentCompletion, &row);
        assert_eq!(lines[0], DetailLine::present("결제 금액", "-".into()));
        assert_eq!(lines[1], DetailLine::present("이메일", "h@x.kr".into()));
    }

    #[test]
    fn test_request_lines_use_file_name() {
        let row = ValidationResult {
            request_id: Some("A1-2".into()),
            valid: true,
            customer_name: Some("홍길동".into()),
            email: Some("h@x.kr".into()),
            transcript_file: Some("transcripts/2024/final.hwp".into()),
            ..Default::default()
        };
        let lines = detail_lines(NotificationKind::DraftGuide, &row);
        assert_eq!(lines[0].value, "final.hwp");
        assert_eq!(lines[2], DetailLine::present("상태", "-".into()));
        assert_eq!(row_heading(NotificationKind::DraftGuide, &row), "Request A1-2 (홍길동)");

        let missing = ValidationResult {
            request_id: Some("A1-3".into()),
            ..Default::default()
        };
        let lines = detail_lines(NotificationKind::FinalDraftGuide, &missing);
        assert_eq!(lines[0].value, MISSING_UPLOAD);
        assert!(lines[0].missing);
    }
}
