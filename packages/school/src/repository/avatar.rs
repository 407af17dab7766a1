use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::avatar;
use crate::models::avatar::AvatarInfo;

/// Columns written on upload.
pub struct NewAvatar {
    pub student_id: i32,
    pub file_path: String,
    pub file_size: i64,
    pub media_type: String,
    pub data: Vec<u8>,
}

pub struct AvatarRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> AvatarRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_student(&self, student_id: i32) -> Result<Option<avatar::Model>, DbErr> {
        avatar::Entity::find()
            .filter(avatar::Column::StudentId.eq(student_id))
            .one(self.conn)
            .await
    }

    /// Insert the student's avatar, or overwrite the existing row in place.
    pub async fn upsert(&self, new: NewAvatar) -> Result<avatar::Model, DbErr> {
        let student_id = new.student_id;
        let model = avatar::ActiveModel {
            student_id: Set(new.student_id),
            file_path: Set(new.file_path),
            file_size: Set(new.file_size),
            media_type: Set(new.media_type),
            data: Set(new.data),
            ..Default::default()
        };

        avatar::Entity::insert(model)
            .on_conflict(
                OnConflict::column(avatar::Column::StudentId)
                    .update_columns([
                        avatar::Column::FilePath,
                        avatar::Column::FileSize,
                        avatar::Column::MediaType,
                        avatar::Column::Data,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await?;

        self.find_by_student(student_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("avatar missing after upsert".into()))
    }

    /// One page of avatar metadata ordered by id, with the total row count.
    ///
    /// `offset` counts rows, not pages.
    pub async fn page(&self, offset: u64, size: u64) -> Result<(Vec<AvatarInfo>, u64), DbErr> {
        let select = avatar::Entity::find();
        let total = select.clone().paginate(self.conn, size).num_items().await?;

        let content = select
            .select_only()
            .column(avatar::Column::Id)
            .column(avatar::Column::FilePath)
            .column(avatar::Column::FileSize)
            .column(avatar::Column::MediaType)
            .column(avatar::Column::StudentId)
            .order_by_asc(avatar::Column::Id)
            .offset(Some(offset))
            .limit(Some(size))
            .into_model::<AvatarInfo>()
            .all(self.conn)
            .await?;

        Ok((content, total))
    }

    /// Remove the student's avatar row, returning it when one existed.
    pub async fn delete_by_student(&self, student_id: i32) -> Result<Option<avatar::Model>, DbErr> {
        let Some(existing) = self.find_by_student(student_id).await? else {
            return Ok(None);
        };
        avatar::Entity::delete_by_id(existing.id)
            .exec(self.conn)
            .await?;
        Ok(Some(existing))
    }
}
