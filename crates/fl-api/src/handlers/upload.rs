//! Image upload handler

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use fl_service::dto::UploadResponse;
use fl_service::{ServiceError, UploadService};

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Multipart field carrying the file
const IMAGE_FIELD: &str = "image";

/// Store the `image` field of a multipart form
///
/// POST /api/upload
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| ApiError::invalid_body(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(ApiError::from_multipart)?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(ToString::to_string);
        let file_name = field.file_name().map(ToString::to_string);
        let data = field.bytes().await.map_err(ApiError::from_multipart)?;

        let service = UploadService::new(state.service_context());
        let response = service
            .upload_image(&data, content_type.as_deref(), file_name.as_deref())
            .await?;
        return Ok(Json(response));
    }

    Err(ServiceError::validation("No se recibió ninguna imagen").into())
}
