use crate::error::ApiError;
use crate::shared::inline_edit::parse_int_prefix;
use crate::usecases::u502_add_order::FileSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of `GET /api/database/generate-db-order-id/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeneratedIds {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One stored file of an order, as listed before deletion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFile {
    pub name: String,
    #[serde(rename = "type", default)]
    pub file_type: String,
}

impl OrderFile {
    /// Transcript files are marked differently from customer attachments
    pub fn is_transcript(&self) -> bool {
        self.file_type == "속기록"
    }
}

/// Response of `GET /api/database/get-order-file-counts/?order_ids=`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderFileCounts {
    #[serde(default)]
    pub file_counts: HashMap<String, u32>,
    #[serde(default)]
    pub file_lists: HashMap<String, Vec<OrderFile>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl OrderFileCounts {
    pub fn count(&self, order_id: &str) -> u32 {
        self.file_counts.get(order_id).copied().unwrap_or(0)
    }

    pub fn files(&self, order_id: &str) -> &[OrderFile] {
        self.file_lists
            .get(order_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Body of `POST /api/database/delete-orders/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteOrdersRequest {
    pub order_ids: Vec<String>,
}

/// Body of `POST /api/database/delete-uploaded-files/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteUploadedFilesRequest {
    pub file_keys: Vec<String>,
}

/// Body of `POST /api/database/create-db-order/`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateOrderRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub draft_format: String,
    pub final_option: String,
    pub payment_status: bool,
    pub payment_amount: Option<i64>,
    pub notes: String,
    pub files_data: Vec<FileSettings>,
}

impl CreateOrderRequest {
    /// Name, email and phone are mandatory
    pub fn validate(&self) -> Result<(), ApiError> {
        let missing = [&self.name, &self.email, &self.phone]
            .iter()
            .any(|v| v.trim().is_empty());
        if missing {
            return Err(ApiError::precondition("필수 항목을 모두 입력해주세요."));
        }
        Ok(())
    }
}

/// Amount typed into the add-order form: integer prefix, clamped at zero,
/// `None` when blank or not a number.
pub fn clamp_amount(raw: &str) -> Option<i64> {
    if raw.trim().is_empty() {
        return None;
    }
    parse_int_prefix(raw).map(|v| v.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_counts_default_to_zero() {
        let counts: OrderFileCounts = serde_json::from_str(
            r#"{"file_counts": {"A1": 2}, "file_lists": {"A1": [{"name": "a.mp3", "type": "첨부"}, {"name": "a.docx", "type": "속기록"}]}}"#,
        )
        .unwrap();
        assert_eq!(counts.count("A1"), 2);
        assert_eq!(counts.count("B2"), 0);
        assert!(counts.files("B2").is_empty());
        assert!(!counts.files("A1")[0].is_transcript());
        assert!(counts.files("A1")[1].is_transcript());
    }

    #[test]
    fn create_order_requires_contact_fields() {
        let mut req = CreateOrderRequest {
            name: "홍길동".into(),
            email: "hong@example.com".into(),
            phone: " ".into(),
            ..Default::default()
        };
        assert!(matches!(req.validate(), Err(ApiError::Precondition(_))));
        req.phone = "010-0000-0000".into();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn clamp_amount_behaviour() {
        assert_eq!(clamp_amount(""), None);
        assert_eq!(clamp_amount("abc"), None);
        assert_eq!(clamp_amount("-500"), Some(0));
        assert_eq!(clamp_amount("35000"), Some(35000));
    }
}
