use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "avatar")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Location of the full-size file on disk.
    pub file_path: String,
    /// Size of the original upload in bytes.
    pub file_size: i64,
    pub media_type: String,

    /// Downscaled copy of the image, encoded in the upload's format.
    pub data: Vec<u8>,

    #[sea_orm(unique)]
    pub student_id: i32,
    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: HasOne<super::student::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
