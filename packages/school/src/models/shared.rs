use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppError;

/// Collects `"field: message"` entries for a validation failure.
#[derive(Default)]
pub struct FieldErrors(Vec<String>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(format!("{field}: {message}"));
    }

    /// `Ok` when nothing was collected.
    pub fn finish(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0))
        }
    }
}

/// Check a trimmed, mandatory text field against inclusive character bounds.
pub fn check_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    (min, max): (usize, usize),
    mandatory: &str,
    length: &str,
) -> String {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        errors.push(field, mandatory);
    } else {
        let count = value.chars().count();
        if count < min || count > max {
            errors.push(field, length);
        }
    }
    value.to_string()
}

/// 1-based page request.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number, starting at 1.
    #[param(example = 1)]
    pub page: Option<i64>,
    /// Items per page.
    #[param(example = 10)]
    pub size: Option<i64>,
}

/// Validated page request with a 0-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: u64,
    pub size: u64,
    /// Rows to skip. Fits in an `i64` so every backend can bind it.
    pub offset: u64,
}

impl PageQuery {
    pub const DEFAULT_SIZE: i64 = 10;

    pub fn to_request(&self) -> Result<PageRequest, AppError> {
        let page = self.page.unwrap_or(1);
        let size = self.size.unwrap_or(Self::DEFAULT_SIZE);
        if page < 1 {
            return Err(AppError::BadRequest(
                "Page number must be greater than 0".into(),
            ));
        }
        if size <= 0 {
            return Err(AppError::BadRequest("Page size must be greater than 0".into()));
        }
        let index = (page - 1) as u64;
        let size = size as u64;
        let offset = index
            .checked_mul(size)
            .filter(|offset| *offset <= i64::MAX as u64)
            .ok_or_else(|| AppError::BadRequest("Page number is too large".into()))?;
        Ok(PageRequest {
            index,
            size,
            offset,
        })
    }
}
