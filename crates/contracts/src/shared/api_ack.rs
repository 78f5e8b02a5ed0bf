use crate::error::ApiError;
use serde::Deserialize;

/// Generic `{success, error?, message?, errors?}` envelope returned by the
/// mutating endpoints.
///
/// Framework-level rejections (CSRF, permissions, 404) answer `{detail}`
/// without `success`; only an explicit `success: true` counts as done.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiAck {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ApiAck {
    /// Interpret the envelope. `fallback` is used when the server reports a
    /// failure without a message.
    pub fn into_result(self, fallback: &str) -> Result<ApiAck, ApiError> {
        if self.success == Some(true) {
            return Ok(self);
        }
        Err(self.into_error(fallback))
    }

    fn into_error(self, fallback: &str) -> ApiError {
        ApiError::Application {
            message: self
                .error
                .or(self.detail)
                .unwrap_or_else(|| fallback.to_string()),
            details: self.errors,
        }
    }

    /// Error for a non-2xx answer of an endpoint that returns the record
    /// itself on success (`PATCH /api/requests/{id}/`).
    pub fn rejection(status: u16, body: &str, fallback: &str) -> ApiError {
        match serde_json::from_str::<ApiAck>(body) {
            Ok(ack) => ack.into_error(fallback),
            Err(_) => ApiError::Transport(format!("HTTP {}", status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ack(json: &str) -> ApiAck {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn failure_carries_server_error() {
        let err = ack(r#"{"success": false, "error": "권한이 없습니다."}"#)
            .into_result("상태 변경에 실패했습니다.")
            .unwrap_err();
        assert_eq!(err.user_message("x"), "권한이 없습니다.");
    }

    #[test]
    fn failure_without_error_uses_fallback() {
        let err = ack(r#"{"success": false}"#)
            .into_result("결제 상태 변경에 실패했습니다.")
            .unwrap_err();
        assert_eq!(err.user_message("x"), "결제 상태 변경에 실패했습니다.");
    }

    #[test]
    fn detail_body_without_success_is_rejected() {
        let err = ack(r#"{"detail": "CSRF Failed"}"#)
            .into_result("상태 변경에 실패했습니다.")
            .unwrap_err();
        assert_eq!(err.user_message("x"), "CSRF Failed");

        let err = ack(r#"{"id": 4, "notes": "memo"}"#).into_result("삭제 실패").unwrap_err();
        assert_eq!(err.user_message("x"), "삭제 실패");
    }

    #[test]
    fn explicit_success_keeps_message() {
        let ok = ack(r#"{"success": true, "message": "삭제되었습니다."}"#)
            .into_result("x")
            .unwrap();
        assert_eq!(ok.message.as_deref(), Some("삭제되었습니다."));
    }

    #[test]
    fn rejection_reads_json_or_falls_back_to_status() {
        let err = ApiAck::rejection(404, r#"{"detail": "Not found."}"#, "저장에 실패했습니다.");
        assert_eq!(err.user_message("x"), "Not found.");

        let err = ApiAck::rejection(403, "{}", "저장에 실패했습니다.");
        assert_eq!(err.user_message("x"), "저장에 실패했습니다.");

        let err = ApiAck::rejection(502, "<html>Bad Gateway</html>", "저장에 실패했습니다.");
        assert_eq!(err, ApiError::Transport("HTTP 502".to_string()));
    }
}
