//! Rules of the single-field edit modal and the inline `update_field` call.

use crate::error::ApiError;
use crate::shared::lenient::format_won;
use serde_json::{Map, Value};

/// Input type of an editable field (`data-field-type` / template argument)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    Text,
}

impl FieldKind {
    pub fn from_code(code: &str) -> Self {
        if code == "number" {
            FieldKind::Number
        } else {
            FieldKind::Text
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::Text => "text",
        }
    }

    /// Keys suppressed while typing
    pub fn blocks_key(self, key: &str) -> bool {
        self == FieldKind::Number && (key == "-" || key == "Subtract")
    }

    /// Whether a pasted value must be cleared
    pub fn rejects_paste(self, value: &str) -> bool {
        self == FieldKind::Number && !matches!(parse_int_prefix(value), Some(v) if v >= 0)
    }

    /// Normalize the value typed into the modal before saving.
    ///
    /// Numbers must parse to a non-negative integer; the result is its
    /// canonical decimal form.
    pub fn validate_for_save(self, raw: &str) -> Result<String, ApiError> {
        match self {
            FieldKind::Text => Ok(raw.to_string()),
            FieldKind::Number => match parse_int_prefix(raw) {
                Some(v) if v >= 0 => Ok(v.to_string()),
                _ => Err(ApiError::precondition(NEGATIVE_AMOUNT_MESSAGE)),
            },
        }
    }

    /// Text placed in the modal input from the cell's value span
    pub fn editable_text(self, shown: &str) -> String {
        let shown = shown.trim();
        if shown == "-" {
            return String::new();
        }
        if self == FieldKind::Number && shown.ends_with('원') {
            return shown.chars().filter(char::is_ascii_digit).collect();
        }
        shown.to_string()
    }
}

pub const NEGATIVE_AMOUNT_MESSAGE: &str = "결제 금액은 0 이상의 숫자만 입력 가능합니다.";

/// Modal label of a field
pub fn field_label(field: &str) -> &'static str {
    match field {
        "payment_amount" => "결제 금액",
        "refund_amount" => "환불 금액",
        "price_change_reason" => "금액 변경 사유",
        "cancel_reason" => "취소 사유",
        "notes" => "메모",
        _ => "값",
    }
}

pub fn is_amount_field(field: &str) -> bool {
    field.contains("amount")
}

/// Text shown in the cell after a save
pub fn display_value(field: &str, value: &str) -> String {
    if value.is_empty() {
        return "-".to_string();
    }
    if is_amount_field(field) {
        if let Ok(amount) = value.trim().parse::<f64>() {
            return format_won(amount);
        }
    }
    value.to_string()
}

/// Body of `PATCH /api/requests/{id}/`: `{field: value}`, blank → `null`
pub fn patch_body(field: &str, value: &str) -> Value {
    let value = if value.is_empty() {
        Value::Null
    } else {
        Value::String(value.to_string())
    };
    let mut map = Map::new();
    map.insert(field.to_string(), value);
    Value::Object(map)
}

/// Body of `POST /api/requests/{id}/update_field/`; amount fields go as integers
pub fn update_field_body(field: &str, value: &str) -> Value {
    let value = if is_amount_field(field) {
        match parse_int_prefix(value) {
            Some(v) if !value.is_empty() => Value::from(v),
            _ => Value::Null,
        }
    } else {
        Value::String(value.to_string())
    };
    let mut map = Map::new();
    map.insert(field.to_string(), value);
    Value::Object(map)
}

/// Leading integer of `s` with optional sign, the way `parseInt(s, 10)` reads it
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_prefix() {
        assert_eq!(parse_int_prefix("1234"), Some(1234));
        assert_eq!(parse_int_prefix(" 12원"), Some(12));
        assert_eq!(parse_int_prefix("-5"), Some(-5));
        assert_eq!(parse_int_prefix("1,000"), Some(1));
        assert_eq!(parse_int_prefix("원"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn number_input_guards() {
        let k = FieldKind::from_code("number");
        assert!(k.blocks_key("-"));
        assert!(k.blocks_key("Subtract"));
        assert!(!k.blocks_key("5"));
        assert!(k.rejects_paste("-300"));
        assert!(k.rejects_paste("abc"));
        assert!(!k.rejects_paste("300"));
        assert!(!FieldKind::Text.blocks_key("-"));
        assert!(!FieldKind::Text.rejects_paste("-300"));
    }

    #[test]
    fn save_validation() {
        assert_eq!(FieldKind::Number.validate_for_save("0500").unwrap(), "500");
        assert!(FieldKind::Number.validate_for_save("-1").is_err());
        assert!(FieldKind::Number.validate_for_save("").is_err());
        assert_eq!(FieldKind::Text.validate_for_save("").unwrap(), "");
    }

    #[test]
    fn editable_text_strips_currency() {
        assert_eq!(FieldKind::Number.editable_text("35,000원"), "35000");
        assert_eq!(FieldKind::Number.editable_text("-"), "");
        assert_eq!(FieldKind::Text.editable_text(" 메모 "), "메모");
    }

    #[test]
    fn display_and_labels() {
        assert_eq!(display_value("payment_amount", "1234"), "1,234원");
        assert_eq!(display_value("notes", "확인 필요"), "확인 필요");
        assert_eq!(display_value("refund_amount", ""), "-");
        assert_eq!(field_label("cancel_reason"), "취소 사유");
        assert_eq!(field_label("unknown"), "값");
    }

    #[test]
    fn bodies() {
        assert_eq!(patch_body("notes", ""), serde_json::json!({"notes": null}));
        assert_eq!(patch_body("payment_amount", "500"), serde_json::json!({"payment_amount": "500"}));
        assert_eq!(
            update_field_body("payment_amount", "500"),
            serde_json::json!({"payment_amount": 500})
        );
        assert_eq!(update_field_body("refund_amount", ""), serde_json::json!({"refund_amount": null}));
        assert_eq!(update_field_body("notes", "x"), serde_json::json!({"notes": "x"}));
    }
}
