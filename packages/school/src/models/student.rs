use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::student;
use crate::error::AppError;

use super::shared::{FieldErrors, check_text};

pub const MIN_AGE: i32 = 15;
pub const MAX_AGE: i32 = 100;

/// Body of `POST /student` and `PUT /student/{id}`.
///
/// Fields are optional on the wire so that missing values surface as field
/// errors instead of a parse failure.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[schema(example = "Harry Potter")]
    pub name: Option<String>,
    #[schema(example = 17)]
    pub age: Option<i32>,
    /// Faculty to assign. Omitting it on update clears the assignment.
    pub faculty_id: Option<i32>,
}

/// A validated student payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentInput {
    pub name: String,
    pub age: i32,
    pub faculty_id: Option<i32>,
}

impl StudentRequest {
    pub fn validate(self) -> Result<StudentInput, AppError> {
        let mut errors = FieldErrors::default();

        let name = check_text(
            &mut errors,
            "name",
            self.name.as_deref(),
            (3, 50),
            "Student name is mandatory",
            "Name must be between 3 and 50 characters",
        );

        let age = self.age.unwrap_or_default();
        if age < MIN_AGE {
            errors.push("age", "Student must be at least 15 years old");
        } else if age > MAX_AGE {
            errors.push("age", "Student age must be reasonable");
        }

        errors.finish()?;
        Ok(StudentInput {
            name,
            age,
            faculty_id: self.faculty_id,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub faculty_id: Option<i32>,
}

impl From<student::Model> for StudentResponse {
    fn from(m: student::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            age: m.age,
            faculty_id: m.faculty_id,
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AgeRangeQuery {
    /// Inclusive lower bound.
    pub min_age: i32,
    /// Inclusive upper bound.
    pub max_age: i32,
}
