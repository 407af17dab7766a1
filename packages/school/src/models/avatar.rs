use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::avatar;

/// Avatar metadata without the preview bytes.
#[derive(Debug, Clone, Serialize, FromQueryResult, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvatarInfo {
    pub id: i32,
    #[schema(example = "avatars/1_harry_potter_full.png")]
    pub file_path: String,
    /// Size of the original upload in bytes.
    pub file_size: i64,
    #[schema(example = "image/png")]
    pub media_type: String,
    pub student_id: i32,
}

impl From<avatar::Model> for AvatarInfo {
    fn from(m: avatar::Model) -> Self {
        Self {
            id: m.id,
            file_path: m.file_path,
            file_size: m.file_size,
            media_type: m.media_type,
            student_id: m.student_id,
        }
    }
}

/// Preview bytes with what is needed to serve them.
pub struct AvatarPreview {
    pub media_type: String,
    pub data: Vec<u8>,
    pub file_path: String,
}

/// One page of avatars.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvatarPage {
    pub content: Vec<AvatarInfo>,
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 10)]
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

/// A file received from a multipart upload.
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}
