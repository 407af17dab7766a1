use axum::Json;
use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::avatar::{AvatarInfo, AvatarPage, UploadedFile};
use crate::models::shared::PageQuery;
use crate::state::AppState;
use crate::utils::filename::{file_extension, preview_disposition};

pub fn avatar_upload_body_limit(max_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_bytes)
}

#[utoipa::path(
    post,
    path = "/{student_id}/upload",
    tag = "Avatars",
    operation_id = "uploadAvatar",
    summary = "Upload a student's avatar",
    description = "Stores the image under the avatar directory, generates a 100px wide preview \
        and creates or replaces the student's avatar. The `file` multipart field is required.",
    params(("student_id" = i32, Path, description = "Student ID")),
    request_body(content_type = "multipart/form-data", description = "Image file in the `file` field"),
    responses(
        (status = 201, description = "Avatar stored", body = AvatarInfo),
        (status = 400, description = "Empty file or missing extension (INVALID_FILE)", body = ErrorBody),
        (status = 404, description = "Student not found (STUDENT_NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage or image failure (FILE_PROCESSING_ERROR, IMAGE_PROCESSING_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart), fields(student_id))]
pub async fn upload_avatar(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file = UploadedFile {
        file_name: None,
        content_type: None,
        data: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidFile(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue; // Ignore unknown fields.
        }
        file.file_name = field.file_name().map(str::to_string);
        file.content_type = field.content_type().map(str::to_string);
        file.data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidFile(format!("Upload read error: {e}")))?
            .to_vec();
    }

    let info = state.avatars.upload(student_id, file).await?;
    Ok((StatusCode::CREATED, Json(info)))
}

#[utoipa::path(
    get,
    path = "/{student_id}/preview-info",
    tag = "Avatars",
    operation_id = "getAvatarInfo",
    summary = "Get avatar metadata",
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Avatar metadata", body = AvatarInfo),
        (status = 404, description = "Student or avatar not found (STUDENT_NOT_FOUND, AVATAR_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(student_id))]
pub async fn avatar_info(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Json<AvatarInfo>, AppError> {
    Ok(Json(state.avatars.info(student_id).await?))
}

#[utoipa::path(
    get,
    path = "/{student_id}/preview-data",
    tag = "Avatars",
    operation_id = "getAvatarPreview",
    summary = "Download the avatar preview",
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Preview image bytes", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 404, description = "Student or avatar not found (STUDENT_NOT_FOUND, AVATAR_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(student_id))]
pub async fn avatar_preview(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Response, AppError> {
    let preview = state.avatars.preview(student_id).await?;
    let ext = file_extension(&preview.file_path).unwrap_or("img");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, preview.media_type)
        .header(header::CONTENT_LENGTH, preview.data.len().to_string())
        .header(header::CONTENT_DISPOSITION, preview_disposition(ext))
        .body(Body::from(preview.data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

#[utoipa::path(
    get,
    path = "/{student_id}/full",
    tag = "Avatars",
    operation_id = "getAvatarFile",
    summary = "Stream the full-size avatar",
    description = "Reads the stored file from disk on every request.",
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Full-size image bytes", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 404, description = "Student or avatar not found (STUDENT_NOT_FOUND, AVATAR_NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Stored file unreadable (FILE_PROCESSING_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(student_id))]
pub async fn avatar_full(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Response, AppError> {
    let (info, reader, size) = state.avatars.open_full(student_id).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, info.media_type)
        .header(header::CONTENT_LENGTH, size.to_string())
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

#[utoipa::path(
    get,
    path = "/all",
    tag = "Avatars",
    operation_id = "listAvatars",
    summary = "List avatars page by page",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of avatar metadata", body = AvatarPage),
        (status = 400, description = "Page below 1 or size below 1 (BAD_REQUEST)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_avatars(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<AvatarPage>, AppError> {
    let request = query.to_request()?;
    Ok(Json(state.avatars.page(request).await?))
}
