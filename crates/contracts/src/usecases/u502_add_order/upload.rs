use crate::error::{ApiError, NoticeLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_UPLOAD_BYTES: u64 = 3 * 1024 * 1024 * 1024;
pub const DEFAULT_DURATION: &str = "00:00:00";

/// File picked in the add-order modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

/// The whole selection is rejected when any file is over `limit`
pub fn check_sizes(files: &[SelectedFile], limit: u64) -> Result<(), ApiError> {
    match files.iter().find(|f| f.size > limit) {
        Some(file) => Err(ApiError::precondition(format!(
            "파일 \"{}\"이(가) {}GB를 초과합니다.",
            file.name,
            limit / (1024 * 1024 * 1024)
        ))),
        None => Ok(()),
    }
}

pub fn is_media(mime_type: &str) -> bool {
    mime_type.starts_with("audio/") || mime_type.starts_with("video/")
}

/// `HH:MM:SS`; non-finite or negative input gives `00:00:00`
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return DEFAULT_DURATION.to_string();
    }
    let total = seconds.floor() as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Body of `POST /api/s3/presigned-url/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresignedUrlRequest {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub customer_name: String,
    pub customer_email: String,
}

impl PresignedUrlRequest {
    /// Customer fields fall back to placeholders while the form is still empty
    pub fn new(file: &SelectedFile, customer_name: &str, customer_email: &str) -> Self {
        let or = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            file_name: file.name.clone(),
            file_type: file.mime_type.clone(),
            file_size: file.size,
            customer_name: or(customer_name, "Unknown"),
            customer_email: or(customer_email, "unknown@example.com"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PresignedPost {
    pub url: String,
    /// Form fields sent before the file, in key order
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PresignedUrlResponse {
    pub presigned_post: PresignedPost,
    /// Storage key of the uploaded object
    pub file_name: String,
}

/// File stored during the modal session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_key: String,
    pub original_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub duration: String,
}

impl UploadedFile {
    pub fn new(file: &SelectedFile, file_key: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            file_key: file_key.into(),
            original_name: file.name.clone(),
            file_type: file.mime_type.clone(),
            file_size: file.size,
            duration: duration.into(),
        }
    }

    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.file_size as f64 / (1024.0 * 1024.0))
    }

    /// Duration for the settings tab; only media files carry one
    pub fn tab_duration(&self) -> String {
        if is_media(&self.file_type) && !self.duration.is_empty() {
            self.duration.clone()
        } else {
            DEFAULT_DURATION.to_string()
        }
    }
}

/// Notice after an upload batch. `tab_count` is the number of stored files
/// in the form afterwards. A batch with failures is never reported as a
/// plain success; a batch where nothing was stored has no notice beyond
/// the failure itself.
pub fn batch_notice(stored: usize, failed: usize, tab_count: usize) -> Option<(NoticeLevel, String)> {
    match (stored, failed) {
        (0, _) => None,
        (_, 0) => Some((NoticeLevel::Success, format!("{}개 파일 업로드 완료", tab_count))),
        (_, failed) => Some((
            NoticeLevel::Warning,
            format!("{}개 파일 업로드 완료 ({}개 실패)", tab_count, failed),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> SelectedFile {
        SelectedFile {
            name: name.into(),
            mime_type: "audio/mpeg".into(),
            size,
        }
    }

    #[test]
    fn oversize_rejects_whole_selection() {
        let files = vec![file("a.mp3", 10), file("big.mp4", MAX_UPLOAD_BYTES + 1)];
        let err = check_sizes(&files, MAX_UPLOAD_BYTES).unwrap_err();
        assert_eq!(err.user_message(""), "파일 \"big.mp4\"이(가) 3GB를 초과합니다.");
        assert!(check_sizes(&files[..1], MAX_UPLOAD_BYTES).is_ok());
        assert!(check_sizes(&[file("edge", MAX_UPLOAD_BYTES)], MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(3725.9), "01:02:05");
        assert_eq!(format_duration(f64::NAN), "00:00:00");
        assert_eq!(format_duration(f64::INFINITY), "00:00:00");
    }

    #[test]
    fn presigned_request_placeholders() {
        let req = PresignedUrlRequest::new(&file("a.mp3", 1), "", " ");
        assert_eq!(req.customer_name, "Unknown");
        assert_eq!(req.customer_email, "unknown@example.com");
        let req = PresignedUrlRequest::new(&file("a.mp3", 1), "홍길동", "h@x.kr");
        assert_eq!(req.customer_name, "홍길동");
    }

    #[test]
    fn presigned_response_parses() {
        let resp: PresignedUrlResponse = serde_json::from_str(
            r#"{"presigned_post": {"url": "https://bucket.s3.amazonaws.com/", "fields": {"key": "uploads/a.mp3", "policy": "p"}}, "file_name": "uploads/a.mp3"}"#,
        )
        .unwrap();
        assert_eq!(resp.file_name, "uploads/a.mp3");
        assert_eq!(resp.presigned_post.fields.keys().collect::<Vec<_>>(), vec!["key", "policy"]);
    }

    #[test]
    fn tab_duration_only_for_media() {
        let mut uploaded = UploadedFile::new(&file("a.mp3", 1_572_864), "k", "00:10:00");
        assert_eq!(uploaded.tab_duration(), "00:10:00");
        assert_eq!(uploaded.size_label(), "1.50 MB");
        uploaded.file_type = "application/pdf".into();
        assert_eq!(uploaded.tab_duration(), "00:00:00");
    }

    #[test]
    fn batch_notice_downgrades_partial_failures() {
        assert_eq!(
            batch_notice(2, 0, 3),
            Some((NoticeLevel::Success, "3개 파일 업로드 완료".to_string()))
        );
        assert_eq!(
            batch_notice(1, 2, 1),
            Some((NoticeLevel::Warning, "1개 파일 업로드 완료 (2개 실패)".to_string()))
        );
        assert_eq!(batch_notice(0, 2, 0), None);
        assert_eq!(batch_notice(0, 0, 4), None);
    }
}
