use crate::shared::api_utils::post_json;
use contracts::config::AdminConfig;
use contracts::error::ApiError;
use contracts::usecases::u501_bulk_send::{
    CheckHistoryRequest, CheckHistoryResponse, NotificationKind, PendingSendSelection, SendIds,
    SendReport, SendResponse, ValidationResponse, ValidationResult,
};

/// Per-id validation of the selection
pub async fn validate(
    config: &AdminConfig,
    kind: NotificationKind,
    ids: Vec<String>,
) -> Result<Vec<ValidationResult>, ApiError> {
    let body = SendIds::new(kind.entity(), ids);
    let response: ValidationResponse = post_json(config, &kind.validate_path(), &body).await?;
    response.into_results()
}

/// Previous sends of `kind` for `ids`
pub async fn check_history(
    config: &AdminConfig,
    kind: NotificationKind,
    ids: Vec<String>,
) -> Result<CheckHistoryResponse, ApiError> {
    post_json(
        config,
        "/api/send/check-history/",
        &CheckHistoryRequest::new(kind, ids),
    )
    .await
}

/// Send the notification; a JSON body is read even on non-2xx answers
pub async fn send(config: &AdminConfig, selection: &PendingSendSelection) -> Result<SendReport, ApiError> {
    let response: SendResponse = post_json(config, selection.endpoint(), &selection.body()).await?;
    response.into_report(&selection.success_message())
}
