use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::faculty;
use crate::error::AppError;

use super::shared::{FieldErrors, check_text};

/// Body of `POST /faculty` and `PUT /faculty/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultyRequest {
    #[schema(example = "Gryffindor")]
    pub name: Option<String>,
    #[schema(example = "#FF0000")]
    pub color: Option<String>,
}

/// A validated faculty payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyInput {
    pub name: String,
    pub color: String,
}

impl FacultyRequest {
    pub fn validate(self) -> Result<FacultyInput, AppError> {
        let mut errors = FieldErrors::default();

        let name = check_text(
            &mut errors,
            "name",
            self.name.as_deref(),
            (3, 100),
            "Faculty Name is mandatory",
            "Faculty Name must be between 3 and 100 characters",
        );

        let color = self.color.as_deref().map(str::trim).unwrap_or_default();
        if color.is_empty() {
            errors.push("color", "Color is mandatory");
        } else if !is_hex_color(color) {
            errors.push("color", "Color must be a valid hex color");
        }

        errors.finish()?;
        Ok(FacultyInput {
            name,
            color: color.to_string(),
        })
    }
}

/// `#RGB` or `#RRGGBB`, hex digits in either case.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultyResponse {
    pub id: i32,
    pub name: String,
    pub color: String,
    /// Ids of the students assigned to this faculty, ascending.
    pub student_ids: Vec<i32>,
}

impl FacultyResponse {
    pub fn new(m: faculty::Model, student_ids: Vec<i32>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            color: m.color,
            student_ids,
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Matched case-insensitively against both name and color.
    pub name_or_color: String,
}
