use std::path::Path;
use std::sync::Arc;

use common::storage::FileStore;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::models::faculty::FacultyResponse;
use crate::models::student::{StudentInput, StudentResponse};
use crate::repository::{AvatarRepository, FacultyRepository, StudentRepository};

/// Number of students returned by `last_five`.
const LAST_STUDENTS: u64 = 5;

#[derive(Clone)]
pub struct StudentService {
    db: DatabaseConnection,
    store: Arc<dyn FileStore>,
}

impl StudentService {
    pub fn new(db: DatabaseConnection, store: Arc<dyn FileStore>) -> Self {
        Self { db, store }
    }

    pub async fn create(&self, input: StudentInput) -> Result<StudentResponse, AppError> {
        info!(name = %input.name, age = input.age, "Creating student");
        self.require_faculty(input.faculty_id).await?;

        let model = StudentRepository::new(&self.db)
            .insert(input.name, input.age, input.faculty_id)
            .await?;
        debug!(id = model.id, "Student created");
        Ok(model.into())
    }

    pub async fn get(&self, id: i32) -> Result<StudentResponse, AppError> {
        info!(id, "Fetching student");
        let model = StudentRepository::new(&self.db)
            .find_by_id(id)
            .await?
            .ok_or(AppError::StudentNotFound(id))?;
        Ok(model.into())
    }

    /// Full replace: a missing faculty id clears the assignment.
    pub async fn update(&self, id: i32, input: StudentInput) -> Result<StudentResponse, AppError> {
        info!(id, "Updating student");
        let repo = StudentRepository::new(&self.db);
        let existing = repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::StudentNotFound(id))?;
        self.require_faculty(input.faculty_id).await?;

        let model = repo
            .replace(existing, input.name, input.age, input.faculty_id)
            .await?;
        Ok(model.into())
    }

    /// Delete a student and its avatar. Returns the deleted student.
    pub async fn delete(&self, id: i32) -> Result<StudentResponse, AppError> {
        info!(id, "Deleting student");
        let txn = self.db.begin().await?;

        let student = StudentRepository::new(&txn)
            .find_by_id(id)
            .await?
            .ok_or(AppError::StudentNotFound(id))?;
        let avatar = AvatarRepository::new(&txn).delete_by_student(id).await?;
        StudentRepository::new(&txn).delete(id).await?;

        txn.commit().await?;

        if let Some(avatar) = avatar {
            debug!(id, path = %avatar.file_path, "Removing avatar file");
            // Best effort.
            if let Err(e) = self.store.remove(Path::new(&avatar.file_path)).await {
                warn!(id, path = %avatar.file_path, "Failed to remove avatar file: {e}");
            }
        }

        Ok(student.into())
    }

    pub async fn list(&self) -> Result<Vec<StudentResponse>, AppError> {
        info!("Listing students");
        let models = StudentRepository::new(&self.db).find_all().await?;
        debug!(count = models.len(), "Students loaded");
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn by_age(&self, age: i32) -> Result<Vec<StudentResponse>, AppError> {
        info!(age, "Listing students by age");
        let models = StudentRepository::new(&self.db).find_by_age(age).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn by_age_between(
        &self,
        min_age: i32,
        max_age: i32,
    ) -> Result<Vec<StudentResponse>, AppError> {
        info!(min_age, max_age, "Listing students by age range");
        let models = StudentRepository::new(&self.db)
            .find_by_age_between(min_age, max_age)
            .await?;
        debug!(count = models.len(), "Students in range");
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn faculty_of(&self, id: i32) -> Result<FacultyResponse, AppError> {
        info!(id, "Fetching faculty of student");
        let student = StudentRepository::new(&self.db)
            .find_by_id(id)
            .await?
            .ok_or(AppError::StudentNotFound(id))?;
        let faculty_id = student
            .faculty_id
            .ok_or(AppError::StudentWithoutFaculty(id))?;

        let faculty = FacultyRepository::new(&self.db)
            .find_by_id(faculty_id)
            .await?
            .ok_or(AppError::FacultyNotFound(faculty_id))?;
        let student_ids = StudentRepository::new(&self.db)
            .find_by_faculty(faculty_id)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        Ok(FacultyResponse::new(faculty, student_ids))
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        info!("Counting students");
        Ok(StudentRepository::new(&self.db).count().await?)
    }

    /// Average age as computed by the database, `0.0` without students.
    pub async fn average_age(&self) -> Result<f64, AppError> {
        info!("Computing average student age");
        let avg = StudentRepository::new(&self.db).average_age().await?;
        debug!(?avg, "Average age");
        Ok(avg.unwrap_or(0.0))
    }

    pub async fn last_five(&self) -> Result<Vec<StudentResponse>, AppError> {
        info!("Listing last five students");
        let models = StudentRepository::new(&self.db)
            .find_last(LAST_STUDENTS)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn require_faculty(&self, faculty_id: Option<i32>) -> Result<(), AppError> {
        if let Some(faculty_id) = faculty_id {
            FacultyRepository::new(&self.db)
                .find_by_id(faculty_id)
                .await?
                .ok_or_else(|| {
                    warn!(faculty_id, "Faculty does not exist");
                    AppError::FacultyNotFound(faculty_id)
                })?;
        }
        Ok(())
    }
}
