use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::analytics::LetterQuery;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/students/names-starting-with",
    tag = "Analytics",
    operation_id = "namesStartingWith",
    summary = "Upper-cased student names starting with a letter",
    description = "Case-insensitive, sorted ascending. Without `letter` the prefix is `A`; a blank `letter` matches nothing.",
    params(LetterQuery),
    responses((status = 200, description = "Matching names", body = Vec<String>)),
)]
#[instrument(skip(state, query))]
pub async fn names_starting_with(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LetterQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(
        state
            .analytics
            .names_starting_with(query.letter.as_deref())
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/students/average-age-students",
    tag = "Analytics",
    operation_id = "averageAgeInApp",
    summary = "Average student age computed by the service",
    responses((status = 200, description = "Average age, 0 without students", body = f64)),
)]
#[instrument(skip(state))]
pub async fn average_age(State(state): State<AppState>) -> Result<Json<f64>, AppError> {
    Ok(Json(state.analytics.average_age().await?))
}

#[utoipa::path(
    get,
    path = "/faculties/longest-name-faculty",
    tag = "Analytics",
    operation_id = "longestFacultyName",
    summary = "Longest faculty name",
    responses((status = 200, description = "Name, empty without faculties", body = String)),
)]
#[instrument(skip(state))]
pub async fn longest_faculty_name(State(state): State<AppState>) -> Result<Json<String>, AppError> {
    Ok(Json(state.analytics.longest_faculty_name().await?))
}

#[utoipa::path(
    get,
    path = "/compute/original-sum",
    tag = "Analytics",
    operation_id = "originalSum",
    summary = "Sum 1..=1000000 sequentially in 32-bit arithmetic",
    responses((status = 200, description = "Wrapped sum", body = i32)),
)]
#[instrument(skip(state))]
pub async fn original_sum(State(state): State<AppState>) -> Json<i32> {
    Json(state.analytics.original_sum())
}

#[utoipa::path(
    get,
    path = "/compute/optimized-sum",
    tag = "Analytics",
    operation_id = "optimizedSum",
    summary = "Sum 1..=1000000 across worker threads",
    responses(
        (status = 200, description = "Sum", body = i64),
        (status = 500, description = "Worker failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn optimized_sum(State(state): State<AppState>) -> Result<Json<i64>, AppError> {
    Ok(Json(state.analytics.optimized_sum().await?))
}

#[utoipa::path(
    get,
    path = "/compute/math-sum",
    tag = "Analytics",
    operation_id = "mathSum",
    summary = "Sum 1..=1000000 in closed form",
    responses((status = 200, description = "Sum", body = i64)),
)]
#[instrument(skip(state))]
pub async fn math_sum(State(state): State<AppState>) -> Json<i64> {
    Json(state.analytics.math_sum())
}
