use std::collections::HashMap;

use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entity::student;

pub struct StudentRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> StudentRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<student::Model>, DbErr> {
        student::Entity::find_by_id(id).one(self.conn).await
    }

    pub async fn find_all(&self) -> Result<Vec<student::Model>, DbErr> {
        student::Entity::find()
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn find_by_age(&self, age: i32) -> Result<Vec<student::Model>, DbErr> {
        student::Entity::find()
            .filter(student::Column::Age.eq(age))
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await
    }

    /// Students with `min <= age <= max`. An inverted range matches nothing.
    pub async fn find_by_age_between(
        &self,
        min: i32,
        max: i32,
    ) -> Result<Vec<student::Model>, DbErr> {
        student::Entity::find()
            .filter(student::Column::Age.between(min, max))
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn find_by_faculty(&self, faculty_id: i32) -> Result<Vec<student::Model>, DbErr> {
        student::Entity::find()
            .filter(student::Column::FacultyId.eq(faculty_id))
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await
    }

    /// Student ids grouped by faculty, for the given faculties.
    pub async fn ids_by_faculty(
        &self,
        faculty_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<i32>>, DbErr> {
        if faculty_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, Option<i32>)> = student::Entity::find()
            .select_only()
            .column(student::Column::Id)
            .column(student::Column::FacultyId)
            .filter(student::Column::FacultyId.is_in(faculty_ids.iter().copied()))
            .order_by_asc(student::Column::Id)
            .into_tuple()
            .all(self.conn)
            .await?;

        let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
        for (id, faculty_id) in rows {
            if let Some(faculty_id) = faculty_id {
                grouped.entry(faculty_id).or_default().push(id);
            }
        }
        Ok(grouped)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        student::Entity::find().count(self.conn).await
    }

    /// Average age computed by the database. `None` when there are no students.
    pub async fn average_age(&self) -> Result<Option<f64>, DbErr> {
        let avg: Option<f64> = student::Entity::find()
            .select_only()
            .column_as(Expr::cust("CAST(AVG(age) AS DOUBLE PRECISION)"), "avg_age")
            .into_tuple::<Option<f64>>()
            .one(self.conn)
            .await?
            .flatten();
        Ok(avg)
    }

    /// The `n` most recently inserted students, newest first.
    pub async fn find_last(&self, n: u64) -> Result<Vec<student::Model>, DbErr> {
        student::Entity::find()
            .order_by_desc(student::Column::Id)
            .limit(Some(n))
            .all(self.conn)
            .await
    }

    /// All names in insertion order.
    pub async fn names(&self) -> Result<Vec<String>, DbErr> {
        student::Entity::find()
            .select_only()
            .column(student::Column::Name)
            .order_by_asc(student::Column::Id)
            .into_tuple::<String>()
            .all(self.conn)
            .await
    }

    pub async fn ages(&self) -> Result<Vec<i32>, DbErr> {
        student::Entity::find()
            .select_only()
            .column(student::Column::Age)
            .into_tuple::<i32>()
            .all(self.conn)
            .await
    }

    pub async fn insert(
        &self,
        name: String,
        age: i32,
        faculty_id: Option<i32>,
    ) -> Result<student::Model, DbErr> {
        student::ActiveModel {
            name: Set(name),
            age: Set(age),
            faculty_id: Set(faculty_id),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    /// Overwrite every mutable column of an existing student.
    pub async fn replace(
        &self,
        existing: student::Model,
        name: String,
        age: i32,
        faculty_id: Option<i32>,
    ) -> Result<student::Model, DbErr> {
        let mut active: student::ActiveModel = existing.into();
        active.name = Set(name);
        active.age = Set(age);
        active.faculty_id = Set(faculty_id);
        active.update(self.conn).await
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = student::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected)
    }

    /// Detach every student from a faculty. Returns the number of students touched.
    pub async fn clear_faculty(&self, faculty_id: i32) -> Result<u64, DbErr> {
        let result = student::Entity::update_many()
            .col_expr(student::Column::FacultyId, Expr::value(Option::<i32>::None))
            .filter(student::Column::FacultyId.eq(faculty_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}
