use super::notification::SEND_FAILED;
use crate::error::ApiError;
use serde::Deserialize;

/// Body of `POST /api/send/*-guide/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Successful send; `partial_errors` are shown one by one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReport {
    pub message: String,
    pub partial_errors: Vec<String>,
}

impl SendResponse {
    pub fn into_report(self, default_message: &str) -> Result<SendReport, ApiError> {
        if self.success {
            Ok(SendReport {
                message: self
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| default_message.to_string()),
                partial_errors: self.errors,
            })
        } else {
            Err(ApiError::Application {
                message: self
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| SEND_FAILED.to_string()),
                details: self.errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_partial_errors() {
        let resp: SendResponse = serde_json::from_str(
            r#"{"success": true, "message": "2건 발송 완료", "errors": ["R3: 이메일 없음"]}"#,
        )
        .unwrap();
        let report = resp.into_report("기본").unwrap();
        assert_eq!(report.message, "2건 발송 완료");
        assert_eq!(report.partial_errors, vec!["R3: 이메일 없음"]);
    }

    #[test]
    fn success_without_message_uses_default() {
        let resp: SendResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(resp.into_report("결제 완료 안내를 발송했습니다.").unwrap().message, "결제 완료 안내를 발송했습니다.");
    }

    #[test]
    fn failure_carries_details() {
        let resp: SendResponse =
            serde_json::from_str(r#"{"success": false, "errors": ["a", "b"]}"#).unwrap();
        let err = resp.into_report("x").unwrap_err();
        assert_eq!(err.user_message("fallback"), SEND_FAILED);
        assert_eq!(err.details(), ["a".to_string(), "b".to_string()]);
    }
}
