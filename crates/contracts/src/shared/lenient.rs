//! Serde helpers for loosely typed backend fields.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Amount that may arrive as a number, a numeric string, an empty string or null.
pub fn opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().replace(',', "").parse::<f64>().ok(),
        None => None,
    })
}

/// Identifier that may arrive as a string or a bare number.
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) if n.fract() == 0.0 => Some(format!("{}", n as i64)),
        Some(NumberOrText::Number(n)) => Some(n.to_string()),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => None,
        Some(NumberOrText::Text(s)) => Some(s.trim().to_string()),
        None => None,
    })
}

/// Format an amount the way the table renders it: `1,234,000원`
pub fn format_won(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}원", grouped)
    } else {
        format!("{}원", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct AmountRow {
        #[serde(default, deserialize_with = "opt_amount")]
        amount: Option<f64>,
    }

    #[derive(Deserialize)]
    struct IdRow {
        #[serde(default, deserialize_with = "opt_id")]
        id: Option<String>,
    }

    fn parse_id(json: &str) -> Option<String> {
        serde_json::from_str::<IdRow>(json).unwrap().id
    }

    fn parse_amount(json: &str) -> Option<f64> {
        serde_json::from_str::<AmountRow>(json).unwrap().amount
    }

    #[test]
    fn test_opt_amount() {
        assert_eq!(parse_amount(r#"{"amount": 30000}"#), Some(30000.0));
        assert_eq!(parse_amount(r#"{"amount": "30,000"}"#), Some(30000.0));
        assert_eq!(parse_amount(r#"{"amount": ""}"#), None);
        assert_eq!(parse_amount(r#"{"amount": null}"#), None);
        assert_eq!(parse_amount(r#"{}"#), None);
    }

    #[test]
    fn test_opt_id() {
        assert_eq!(parse_id(r#"{"id": "2024010101"}"#).as_deref(), Some("2024010101"));
        assert_eq!(parse_id(r#"{"id": 2024010101}"#).as_deref(), Some("2024010101"));
        assert_eq!(parse_id(r#"{"id": ""}"#), None);
        assert_eq!(parse_id(r#"{}"#), None);
    }

    #[test]
    fn test_format_won() {
        assert_eq!(format_won(0.0), "0원");
        assert_eq!(format_won(1234.0), "1,234원");
        assert_eq!(format_won(1234567.0), "1,234,567원");
        assert_eq!(format_won(-50000.0), "-50,000원");
    }
}
