use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Condition, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entity::faculty;

pub struct FacultyRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> FacultyRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<faculty::Model>, DbErr> {
        faculty::Entity::find_by_id(id).one(self.conn).await
    }

    pub async fn find_all(&self) -> Result<Vec<faculty::Model>, DbErr> {
        faculty::Entity::find()
            .order_by_asc(faculty::Column::Id)
            .all(self.conn)
            .await
    }

    /// Exact color match, ignoring case.
    pub async fn find_by_color(&self, color: &str) -> Result<Vec<faculty::Model>, DbErr> {
        faculty::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(faculty::Column::Color)))
                    .eq(color.to_lowercase()),
            )
            .order_by_asc(faculty::Column::Id)
            .all(self.conn)
            .await
    }

    /// Faculties whose name or color equals `term`, ignoring case.
    pub async fn find_by_name_or_color(&self, term: &str) -> Result<Vec<faculty::Model>, DbErr> {
        faculty::Entity::find()
            .filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(faculty::Column::Name)))
                            .eq(term.to_lowercase()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(faculty::Column::Color)))
                            .eq(term.to_lowercase()),
                    ),
            )
            .order_by_asc(faculty::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn insert(&self, name: String, color: String) -> Result<faculty::Model, DbErr> {
        faculty::ActiveModel {
            name: Set(name),
            color: Set(color),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    pub async fn replace(
        &self,
        existing: faculty::Model,
        name: String,
        color: String,
    ) -> Result<faculty::Model, DbErr> {
        let mut active: faculty::ActiveModel = existing.into();
        active.name = Set(name);
        active.color = Set(color);
        active.update(self.conn).await
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = faculty::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected)
    }
}
