use super::Collation;
use crate::domain::a002_request::PaymentStatus;
use std::cmp::Ordering;

/// How values of a column are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    /// Payment badge: paid label → 1, everything else → 0
    PaymentFlag,
    /// Status badge text
    Status,
    Text,
}

impl ColumnKind {
    pub fn for_column(column: &str) -> Self {
        match column {
            "order_id" | "request_id" | "estimated_price" | "payment_amount" => ColumnKind::Numeric,
            "payment_status" => ColumnKind::PaymentFlag,
            "status" => ColumnKind::Status,
            c if c.ends_with("_amount") || c.ends_with("_price") => ColumnKind::Numeric,
            _ => ColumnKind::Text,
        }
    }

    /// CSS selector of the badge whose text is the cell value, if any
    pub fn badge_selector(self) -> Option<&'static str> {
        match self {
            ColumnKind::Status => Some(".status-badge"),
            ColumnKind::PaymentFlag => Some(".payment-badge"),
            _ => None,
        }
    }

    /// Comparable value of a raw cell text
    pub fn extract(self, raw: &str) -> SortValue {
        let text = normalize_cell_text(raw);
        match self {
            ColumnKind::Numeric => SortValue::Number(parse_float_prefix(text).unwrap_or(0.0)),
            ColumnKind::PaymentFlag => {
                let paid = text == PaymentStatus(true).descriptor().display_name;
                SortValue::Flag(u8::from(paid))
            }
            ColumnKind::Status | ColumnKind::Text => SortValue::Text(text.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Flag(u8),
    Text(String),
}

impl SortValue {
    pub fn compare(&self, other: &SortValue, collation: &dyn Collation) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Flag(a), SortValue::Flag(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => collation.compare(a, b),
            // один столбец всегда даёт один вид значений
            _ => Ordering::Equal,
        }
    }
}

/// Trimmed cell text; a lone "-" placeholder counts as empty
pub fn normalize_cell_text(raw: &str) -> &str {
    let text = raw.trim();
    if text == "-" {
        ""
    } else {
        text
    }
}

/// Longest leading decimal literal of `s`, like JavaScript `parseFloat`.
///
/// `"12000원"` → 12000, `"1,234"` → 1, `"-"` → `None`.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_kinds() {
        assert_eq!(ColumnKind::for_column("order_id"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::for_column("refund_amount"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::for_column("payment_status"), ColumnKind::PaymentFlag);
        assert_eq!(ColumnKind::for_column("status"), ColumnKind::Status);
        assert_eq!(ColumnKind::for_column("customer_name"), ColumnKind::Text);
    }

    #[test]
    fn parse_float_prefix_like_js() {
        assert_eq!(parse_float_prefix("12000원"), Some(12000.0));
        assert_eq!(parse_float_prefix("  7"), Some(7.0));
        assert_eq!(parse_float_prefix("1,234"), Some(1.0));
        assert_eq!(parse_float_prefix("-3.5x"), Some(-3.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("abc"), None);
    }

    #[test]
    fn extract_values() {
        assert_eq!(ColumnKind::Numeric.extract("-"), SortValue::Number(0.0));
        assert_eq!(ColumnKind::Numeric.extract(" 10 "), SortValue::Number(10.0));
        assert_eq!(ColumnKind::PaymentFlag.extract("결제 완료"), SortValue::Flag(1));
        assert_eq!(ColumnKind::PaymentFlag.extract("미결제"), SortValue::Flag(0));
        assert_eq!(ColumnKind::Text.extract(" - "), SortValue::Text(String::new()));
        assert_eq!(ColumnKind::Status.extract(" 접수됨 "), SortValue::Text("접수됨".into()));
    }
}
