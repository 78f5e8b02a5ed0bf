use crate::shared::api_utils::{get_json, post_checked, post_form_external, post_json};
use contracts::config::AdminConfig;
use contracts::domain::a001_order::{
    CreateOrderRequest, DeleteOrdersRequest, DeleteUploadedFilesRequest, GeneratedIds,
    OrderFileCounts,
};
use contracts::error::ApiError;
use contracts::shared::api_ack::ApiAck;
use contracts::usecases::u502_add_order::{PresignedUrlRequest, PresignedUrlResponse};
use web_sys::{File, FormData};

/// Fresh order and request ids for the add-order form
pub async fn generate_ids(config: &AdminConfig) -> Result<GeneratedIds, ApiError> {
    let ids: GeneratedIds = get_json(config, "/api/database/generate-db-order-id/").await?;
    if !ids.success {
        return Err(ApiError::application(
            ids.error.unwrap_or_else(|| "ID 생성에 실패했습니다.".to_string()),
        ));
    }
    Ok(ids)
}

fn file_counts_path(order_ids: &[String]) -> String {
    format!(
        "/api/database/get-order-file-counts/?order_ids={}",
        urlencoding::encode(&order_ids.join(","))
    )
}

/// Stored file counts and names per order
pub async fn file_counts(config: &AdminConfig, order_ids: &[String]) -> Result<OrderFileCounts, ApiError> {
    let counts: OrderFileCounts = get_json(config, &file_counts_path(order_ids)).await?;
    if let Some(error) = counts.error.clone() {
        return Err(ApiError::application(error));
    }
    Ok(counts)
}

/// Delete orders with their requests and stored files; returns the server message
pub async fn delete_orders(config: &AdminConfig, order_ids: Vec<String>) -> Result<Option<String>, ApiError> {
    let ack: ApiAck = post_json(
        config,
        "/api/database/delete-orders/",
        &DeleteOrdersRequest { order_ids },
    )
    .await?;
    let ack = ack.into_result("삭제 실패")?;
    Ok(ack.message)
}

/// Remove files uploaded during an abandoned add-order session
pub async fn delete_uploaded_files(config: &AdminConfig, file_keys: Vec<String>) -> Result<(), ApiError> {
    post_checked(
        config,
        "/api/database/delete-uploaded-files/",
        &DeleteUploadedFilesRequest { file_keys },
        "파일 삭제 실패",
    )
    .await
}

pub async fn presigned_url(
    config: &AdminConfig,
    request: &PresignedUrlRequest,
) -> Result<PresignedUrlResponse, ApiError> {
    post_json(config, "/api/s3/presigned-url/", request)
        .await
        .map_err(|e| match e {
            ApiError::Transport(_) | ApiError::Decode(_) => {
                ApiError::Transport(format!("Presigned URL 생성 실패: {}", e))
            }
            other => other,
        })
}

/// Upload `file` with the presigned form fields; the fields go first
pub async fn upload_to_storage(presigned: &PresignedUrlResponse, file: &File) -> Result<(), ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Transport(format!("{:?}", e)))?;
    for (key, value) in &presigned.presigned_post.fields {
        form.append_with_str(key, value)
            .map_err(|e| ApiError::Transport(format!("{:?}", e)))?;
    }
    form.append_with_blob("file", file)
        .map_err(|e| ApiError::Transport(format!("{:?}", e)))?;
    post_form_external(&presigned.presigned_post.url, form).await
}

/// Create the order; returns the server message
pub async fn create_order(config: &AdminConfig, request: &CreateOrderRequest) -> Result<Option<String>, ApiError> {
    let ack: ApiAck = post_json(config, "/api/database/create-db-order/", request).await?;
    let ack = ack.into_result("저장 실패")?;
    Ok(ack.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_counts_path_joins_ids() {
        let ids = vec!["A1".to_string(), "B 2".to_string()];
        assert_eq!(
            file_counts_path(&ids),
            "/api/database/get-order-file-counts/?order_ids=A1%2CB%202"
        );
    }
}
