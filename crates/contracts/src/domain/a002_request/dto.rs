use crate::shared::status_registry::StatusCode;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/requests/{id}/change_status/` and `.../change_order_status/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeStatusRequest {
    pub status: StatusCode,
    pub reason: String,
    pub skip_notification: bool,
}

impl ChangeStatusRequest {
    /// Status change from the inline dropdown: no reason, no customer notification
    pub fn silent(status: StatusCode) -> Self {
        Self {
            status,
            reason: String::new(),
            skip_notification: true,
        }
    }
}

/// Body of `POST /api/requests/{id}/change_payment/`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangePaymentRequest {
    pub payment_status: bool,
}

/// Response of `POST /api/requests/{id}/upload_transcript/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadTranscriptResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Extensions accepted by the transcript file picker
pub const TRANSCRIPT_ACCEPT: &str = ".pdf,.doc,.docx,.txt";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_request::RequestStatus;

    #[test]
    fn silent_status_change_body() {
        let body =
            serde_json::to_value(ChangeStatusRequest::silent(StatusCode::Request(RequestStatus::InProgress)))
                .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status": "in_progress", "reason": "", "skip_notification": true})
        );
    }

    #[test]
    fn upload_response_tolerates_missing_fields() {
        let resp: UploadTranscriptResponse =
            serde_json::from_str(r#"{"success": false, "error": "파일 형식 오류"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.original_name, None);
        assert_eq!(resp.error.as_deref(), Some("파일 형식 오류"));
    }
}
