use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a user-visible notice (toast).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    /// Toast background color
    pub fn background(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "#10b981",
            NoticeLevel::Error => "#ef4444",
            NoticeLevel::Warning => "#f59e0b",
            NoticeLevel::Info => "#3b82f6",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "notification notification-success",
            NoticeLevel::Info => "notification notification-info",
            NoticeLevel::Warning => "notification notification-warning",
            NoticeLevel::Error => "notification notification-error",
        }
    }
}

/// Failure of an admin page operation.
///
/// - `Transport`: the request never produced a usable response (network, CORS, ...)
/// - `Application`: the backend answered `success: false` (or a non-2xx with a JSON body)
/// - `Precondition`: a client-side check failed before or after the call
///   (empty selection, DOM target missing after a successful mutation)
/// - `Decode`: the body could not be parsed into the expected shape
///
/// Per-id failures that accompany a successful send are not errors; they are
/// carried by `SendReport::partial_errors`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("{message}")]
    Application {
        message: String,
        details: Vec<String>,
    },

    #[error("{0}")]
    Precondition(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn application(message: impl Into<String>) -> Self {
        ApiError::Application {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        ApiError::Precondition(message.into())
    }

    /// Preconditions are warnings (the mutation may already have happened),
    /// everything else is an error.
    pub fn level(&self) -> NoticeLevel {
        match self {
            ApiError::Precondition(_) => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        }
    }

    /// Message shown to the user.
    ///
    /// Server messages are surfaced verbatim; transport and decode failures
    /// fall back to the generic per-operation text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Application { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Precondition(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Per-id details that must be shown as separate notices.
    pub fn details(&self) -> &[String] {
        match self {
            ApiError::Application { details, .. } => details,
            _ => &[],
        }
    }
}

/// Shown when a mutation succeeded but the page could not be patched in place.
pub const RELOAD_HINT: &str = "변경되었지만 화면 갱신에 실패했습니다. 페이지를 새로고침하세요.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_message_is_verbatim() {
        let err = ApiError::application("이미 발송된 주문입니다.");
        assert_eq!(err.user_message("발송 중 오류가 발생했습니다."), "이미 발송된 주문입니다.");
        assert_eq!(err.level(), NoticeLevel::Error);
    }

    #[test]
    fn transport_uses_fallback() {
        let err = ApiError::Transport("TypeError: Failed to fetch".into());
        assert_eq!(err.user_message("저장 중 오류가 발생했습니다."), "저장 중 오류가 발생했습니다.");
    }

    #[test]
    fn empty_application_message_uses_fallback() {
        let err = ApiError::application("  ");
        assert_eq!(err.user_message("상태 변경에 실패했습니다."), "상태 변경에 실패했습니다.");
    }

    #[test]
    fn precondition_is_warning() {
        let err = ApiError::precondition(RELOAD_HINT);
        assert_eq!(err.level(), NoticeLevel::Warning);
        assert_eq!(err.user_message("x"), RELOAD_HINT);
    }
}
