use crate::shared::inline_edit::PaymentPropagation;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Runtime configuration of the admin page controller.
///
/// Passed by the server-rendered page when the controller is attached.
/// Every field is optional in the JSON; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Prefix for API paths. Empty means same origin.
    pub api_base: String,
    /// Cookie holding the CSRF token
    pub csrf_cookie: String,
    /// Header the token is echoed in
    pub csrf_header: String,
    /// `id` of the data table element
    pub table_id: String,
    /// Delay before reloading the page after a successful bulk mutation
    pub reload_delay_ms: u32,
    /// Lifetime of a toast notice
    pub toast_duration_ms: u32,
    /// Per-file upload limit in bytes
    pub max_upload_bytes: u64,
    /// Which rows receive a payment badge update
    pub payment_propagation: PaymentPropagation,
    /// Disable dropdown options not reachable through the declared transition table
    pub enforce_transitions: bool,
}

/// Default configuration used when the page passes nothing
const DEFAULT_CONFIG: &str = r#"{
    "api_base": "",
    "csrf_cookie": "csrftoken",
    "csrf_header": "X-CSRFToken",
    "table_id": "excel-table",
    "reload_delay_ms": 1500,
    "toast_duration_ms": 3000,
    "max_upload_bytes": 3221225472,
    "payment_propagation": "whole_order",
    "enforce_transitions": false
}"#;

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            table_id: "excel-table".to_string(),
            reload_delay_ms: 1500,
            toast_duration_ms: 3000,
            max_upload_bytes: 3 * 1024 * 1024 * 1024,
            payment_propagation: PaymentPropagation::WholeOrder,
            enforce_transitions: false,
        }
    }
}

impl AdminConfig {
    /// Parse a JSON config. Blank input yields the defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).context("invalid admin page configuration")
    }

    /// Join `api_base` with an absolute API path ("/api/...").
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_embedded_json() {
        let config = AdminConfig::from_json(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AdminConfig::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            AdminConfig::from_json(r#"{"reload_delay_ms": 500, "payment_propagation": "edited_row_only"}"#)
                .unwrap();
        assert_eq!(config.reload_delay_ms, 500);
        assert_eq!(config.payment_propagation, PaymentPropagation::EditedRowOnly);
        assert_eq!(config.csrf_cookie, "csrftoken");
        assert_eq!(config.table_id, "excel-table");
    }

    #[test]
    fn test_blank_and_invalid_input() {
        assert_eq!(AdminConfig::from_json("  ").unwrap(), AdminConfig::default());
        assert!(AdminConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_api_url() {
        let mut config = AdminConfig::default();
        assert_eq!(config.api_url("/api/send/check-history/"), "/api/send/check-history/");
        config.api_base = "https://admin.example.com/".into();
        assert_eq!(
            config.api_url("/api/send/check-history/"),
            "https://admin.example.com/api/send/check-history/"
        );
    }
}
