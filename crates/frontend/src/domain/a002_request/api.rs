use crate::shared::api_utils::{patch_checked, post_form, post_json};
use contracts::config::AdminConfig;
use contracts::domain::a002_request::UploadTranscriptResponse;
use contracts::error::ApiError;
use contracts::shared::api_ack::ApiAck;
use contracts::shared::inline_edit::{patch_body, update_field_body, EditCommand};
use web_sys::{File, FormData};

/// Status or payment change picked in a dropdown
pub async fn apply_edit(config: &AdminConfig, command: &EditCommand) -> Result<(), ApiError> {
    let ack: ApiAck = post_json(config, &command.path(), &command.body()).await?;
    ack.into_result(command.failure_message())?;
    Ok(())
}

/// `PATCH /api/requests/{id}/` with `{field: value|null}`
pub async fn save_field(
    config: &AdminConfig,
    request_id: &str,
    field: &str,
    value: &str,
) -> Result<(), ApiError> {
    let path = format!("/api/requests/{}/", request_id);
    patch_checked(config, &path, &patch_body(field, value), "저장에 실패했습니다.").await
}

/// `POST /api/requests/{id}/update_field/`; amounts go as integers
pub async fn update_field(
    config: &AdminConfig,
    request_id: &str,
    field: &str,
    value: &str,
) -> Result<(), ApiError> {
    let path = format!("/api/requests/{}/update_field/", request_id);
    let ack: ApiAck = post_json(config, &path, &update_field_body(field, value)).await?;
    ack.into_result("수정에 실패했습니다.")?;
    Ok(())
}

/// Multipart upload of a transcript file; returns the stored original name
pub async fn upload_transcript(
    config: &AdminConfig,
    request_id: &str,
    field: &str,
    file: &File,
) -> Result<Option<String>, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Transport(format!("{:?}", e)))?;
    form.append_with_blob("file", file)
        .and_then(|_| form.append_with_str("field_name", field))
        .map_err(|e| ApiError::Transport(format!("{:?}", e)))?;

    let path = format!("/api/requests/{}/upload_transcript/", request_id);
    let response: UploadTranscriptResponse = post_form(config, &path, form).await?;
    if !response.success {
        return Err(ApiError::application(
            response
                .error
                .unwrap_or_else(|| "파일 업로드에 실패했습니다.".to_string()),
        ));
    }
    Ok(response.original_name.filter(|n| !n.is_empty()))
}

/// Download link of a stored file
pub fn download_url(config: &AdminConfig, file_key: &str) -> String {
    config.api_url(&format!(
        "/api/download-file/?file_key={}",
        urlencoding::encode(file_key)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_url_encodes_key() {
        let config = AdminConfig::default();
        assert_eq!(
            download_url(&config, "orders/홍길동 1.mp3"),
            "/api/download-file/?file_key=orders%2F%ED%99%8D%EA%B8%B8%EB%8F%99%201.mp3"
        );
    }
}
