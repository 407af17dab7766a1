use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info};

use crate::entity::faculty;
use crate::error::AppError;
use crate::models::faculty::{FacultyInput, FacultyResponse};
use crate::models::student::StudentResponse;
use crate::repository::{FacultyRepository, StudentRepository};

#[derive(Clone)]
pub struct FacultyService {
    db: DatabaseConnection,
}

impl FacultyService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: FacultyInput) -> Result<FacultyResponse, AppError> {
        info!(name = %input.name, color = %input.color, "Creating faculty");
        let model = FacultyRepository::new(&self.db)
            .insert(input.name, input.color)
            .await?;
        debug!(id = model.id, "Faculty created");
        Ok(FacultyResponse::new(model, Vec::new()))
    }

    pub async fn get(&self, id: i32) -> Result<FacultyResponse, AppError> {
        info!(id, "Fetching faculty");
        let model = self.find(id).await?;
        self.with_students(vec![model])
            .await?
            .pop()
            .ok_or(AppError::FacultyNotFound(id))
    }

    pub async fn update(&self, id: i32, input: FacultyInput) -> Result<FacultyResponse, AppError> {
        info!(id, "Updating faculty");
        let existing = self.find(id).await?;
        let model = FacultyRepository::new(&self.db)
            .replace(existing, input.name, input.color)
            .await?;
        self.with_students(vec![model])
            .await?
            .pop()
            .ok_or(AppError::FacultyNotFound(id))
    }

    /// Detach the faculty's students, then delete it, atomically.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        info!(id, "Deleting faculty");
        let txn = self.db.begin().await?;

        FacultyRepository::new(&txn)
            .find_by_id(id)
            .await?
            .ok_or(AppError::FacultyNotFound(id))?;
        let detached = StudentRepository::new(&txn).clear_faculty(id).await?;
        FacultyRepository::new(&txn).delete(id).await?;

        txn.commit().await?;
        debug!(id, detached, "Faculty deleted");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<FacultyResponse>, AppError> {
        info!("Listing faculties");
        let models = FacultyRepository::new(&self.db).find_all().await?;
        self.with_students(models).await
    }

    pub async fn by_color(&self, color: &str) -> Result<Vec<FacultyResponse>, AppError> {
        info!(color, "Listing faculties by color");
        let models = FacultyRepository::new(&self.db)
            .find_by_color(color.trim())
            .await?;
        self.with_students(models).await
    }

    pub async fn search(&self, name_or_color: &str) -> Result<Vec<FacultyResponse>, AppError> {
        info!(name_or_color, "Searching faculties");
        let models = FacultyRepository::new(&self.db)
            .find_by_name_or_color(name_or_color.trim())
            .await?;
        self.with_students(models).await
    }

    pub async fn students_of(&self, id: i32) -> Result<Vec<StudentResponse>, AppError> {
        info!(id, "Listing students of faculty");
        self.find(id).await?;
        let models = StudentRepository::new(&self.db).find_by_faculty(id).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: i32) -> Result<faculty::Model, AppError> {
        FacultyRepository::new(&self.db)
            .find_by_id(id)
            .await?
            .ok_or(AppError::FacultyNotFound(id))
    }

    async fn with_students(
        &self,
        models: Vec<faculty::Model>,
    ) -> Result<Vec<FacultyResponse>, AppError> {
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut grouped = StudentRepository::new(&self.db)
            .ids_by_faculty(&ids)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let student_ids = grouped.remove(&m.id).unwrap_or_default();
                FacultyResponse::new(m, student_ids)
            })
            .collect())
    }
}
