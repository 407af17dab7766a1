use std::path::Path;
use std::sync::Arc;

use common::preview::generate_preview;
use common::storage::{BoxReader, FileStore};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::models::avatar::{AvatarInfo, AvatarPage, AvatarPreview, UploadedFile};
use crate::models::shared::PageRequest;
use crate::repository::{AvatarRepository, NewAvatar, StudentRepository};
use crate::utils::filename::{avatar_file_name, file_extension};

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Clone)]
pub struct AvatarService {
    db: DatabaseConnection,
    store: Arc<dyn FileStore>,
    preview_width: u32,
}

impl AvatarService {
    pub fn new(db: DatabaseConnection, store: Arc<dyn FileStore>, preview_width: u32) -> Self {
        Self {
            db,
            store,
            preview_width,
        }
    }

    /// Generate the preview, store the full-size file and upsert the avatar row.
    pub async fn upload(&self, student_id: i32, file: UploadedFile) -> Result<AvatarInfo, AppError> {
        info!(student_id, "Uploading avatar");

        let file_name = match file.file_name.as_deref() {
            Some(name) if !file.data.is_empty() => name,
            _ => {
                warn!(student_id, "Empty upload or missing file name");
                return Err(AppError::InvalidFile(
                    "Uploaded file is empty or invalid".into(),
                ));
            }
        };
        let ext = file_extension(file_name).ok_or_else(|| {
            warn!(student_id, file_name, "Upload without usable extension");
            AppError::InvalidFile("File extension is missing or invalid".into())
        })?;
        debug!(student_id, ext, "Upload accepted");

        let student = StudentRepository::new(&self.db)
            .find_by_id(student_id)
            .await?
            .ok_or(AppError::StudentNotFound(student_id))?;

        // Decode before writing so a bad image never replaces the stored file.
        let file_size = file.data.len() as i64;
        let (data, preview) = self.render_preview(file.data, ext).await?;

        let stored_name = avatar_file_name(student.id, &student.name, ext);
        let path = self
            .store
            .put(&stored_name, &data)
            .await
            .map_err(|e| AppError::file_processing("file transfer", e))?;
        debug!(student_id, path = %path.display(), "Full-size avatar saved");

        let media_type = file
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .or_else(|| mime_guess::from_path(file_name).first().map(|m| m.to_string()))
            .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string());

        let repo = AvatarRepository::new(&self.db);
        let previous = repo.find_by_student(student_id).await?;
        let file_path = path.to_string_lossy().into_owned();
        let saved = repo
            .upsert(NewAvatar {
                student_id,
                file_path: file_path.clone(),
                file_size,
                media_type,
                data: preview,
            })
            .await?;

        // A re-upload with another extension leaves the old file behind.
        if let Some(previous) = previous
            && previous.file_path != file_path
            && let Err(e) = self.store.remove(Path::new(&previous.file_path)).await
        {
            warn!(
                student_id,
                path = %previous.file_path,
                "Failed to remove replaced avatar file: {e}"
            );
        }

        info!(student_id, avatar_id = saved.id, "Avatar uploaded");
        Ok(saved.into())
    }

    pub async fn info(&self, student_id: i32) -> Result<AvatarInfo, AppError> {
        info!(student_id, "Fetching avatar info");
        let avatar = self.find(student_id).await?;
        Ok(avatar.into())
    }

    pub async fn preview(&self, student_id: i32) -> Result<AvatarPreview, AppError> {
        info!(student_id, "Fetching avatar preview");
        let avatar = self.find(student_id).await?;
        Ok(AvatarPreview {
            media_type: avatar.media_type,
            data: avatar.data,
            file_path: avatar.file_path,
        })
    }

    /// Open the stored full-size file. Returns the reader and its size on disk.
    pub async fn open_full(
        &self,
        student_id: i32,
    ) -> Result<(AvatarInfo, BoxReader, u64), AppError> {
        info!(student_id, "Streaming full avatar");
        let info: AvatarInfo = self.find(student_id).await?.into();
        let (reader, size) = self
            .store
            .open(Path::new(&info.file_path))
            .await
            .map_err(|e| AppError::file_processing("avatar file streaming", e))?;
        debug!(student_id, size, path = %info.file_path, "Avatar file opened");
        Ok((info, reader, size))
    }

    pub async fn page(&self, request: PageRequest) -> Result<AvatarPage, AppError> {
        info!(page = request.index + 1, size = request.size, "Listing avatars");
        let (content, total) = AvatarRepository::new(&self.db)
            .page(request.offset, request.size)
            .await?;
        debug!(count = content.len(), total, "Avatar page loaded");

        Ok(AvatarPage {
            content,
            page: request.index + 1,
            size: request.size,
            total_elements: total,
            total_pages: total.div_ceil(request.size),
        })
    }

    /// Resolve the student first so that a missing student reports as such.
    async fn find(&self, student_id: i32) -> Result<crate::entity::avatar::Model, AppError> {
        StudentRepository::new(&self.db)
            .find_by_id(student_id)
            .await?
            .ok_or(AppError::StudentNotFound(student_id))?;

        AvatarRepository::new(&self.db)
            .find_by_student(student_id)
            .await?
            .ok_or(AppError::AvatarNotFound(student_id))
    }

    /// Returns the original bytes alongside the preview.
    async fn render_preview(
        &self,
        data: Vec<u8>,
        ext: &str,
    ) -> Result<(Vec<u8>, Vec<u8>), AppError> {
        let ext = ext.to_string();
        let width = self.preview_width;
        tokio::task::spawn_blocking(move || {
            generate_preview(&data, &ext, width).map(|preview| (data, preview))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Preview task failed: {e}")))?
        .map_err(|e| AppError::image_processing("preview generation", e))
    }
}
