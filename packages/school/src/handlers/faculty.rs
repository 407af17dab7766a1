use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::faculty::{FacultyRequest, FacultyResponse, SearchQuery};
use crate::models::student::StudentResponse;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Faculties",
    operation_id = "createFaculty",
    summary = "Create a new faculty",
    request_body = FacultyRequest,
    responses(
        (status = 201, description = "Faculty created", body = FacultyResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_faculty(
    State(state): State<AppState>,
    AppJson(payload): AppJson<FacultyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.validate()?;
    let faculty = state.faculties.create(input).await?;
    Ok((StatusCode::CREATED, Json(faculty)))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Faculties",
    operation_id = "listFaculties",
    summary = "List all faculties",
    responses((status = 200, description = "All faculties ordered by id", body = Vec<FacultyResponse>)),
)]
#[instrument(skip(state))]
pub async fn list_faculties(
    State(state): State<AppState>,
) -> Result<Json<Vec<FacultyResponse>>, AppError> {
    Ok(Json(state.faculties.list().await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Faculties",
    operation_id = "getFaculty",
    summary = "Get a faculty by ID",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty details", body = FacultyResponse),
        (status = 404, description = "Faculty not found (FACULTY_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    Ok(Json(state.faculties.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Faculties",
    operation_id = "updateFaculty",
    summary = "Replace a faculty",
    params(("id" = i32, Path, description = "Faculty ID")),
    request_body = FacultyRequest,
    responses(
        (status = 200, description = "Faculty updated", body = FacultyResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Faculty not found (FACULTY_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<FacultyRequest>,
) -> Result<Json<FacultyResponse>, AppError> {
    let input = payload.validate()?;
    Ok(Json(state.faculties.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Faculties",
    operation_id = "deleteFaculty",
    summary = "Delete a faculty",
    description = "Clears the faculty of every assigned student, then deletes the faculty. Both steps happen in one transaction.",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 204, description = "Faculty deleted"),
        (status = 404, description = "Faculty not found (FACULTY_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.faculties.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/color/{color}",
    tag = "Faculties",
    operation_id = "listFacultiesByColor",
    summary = "List faculties with a color, ignoring case",
    params(("color" = String, Path, description = "Hex color, URL-encoded (`%23FF0000`)")),
    responses((status = 200, description = "Matching faculties", body = Vec<FacultyResponse>)),
)]
#[instrument(skip(state), fields(color))]
pub async fn faculties_by_color(
    State(state): State<AppState>,
    Path(color): Path<String>,
) -> Result<Json<Vec<FacultyResponse>>, AppError> {
    Ok(Json(state.faculties.by_color(&color).await?))
}

#[utoipa::path(
    get,
    path = "/search",
    tag = "Faculties",
    operation_id = "searchFaculties",
    summary = "Find faculties by name or color",
    description = "Exact, case-insensitive match against either the name or the color.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching faculties", body = Vec<FacultyResponse>),
        (status = 400, description = "Missing parameter (plain text)"),
    ),
)]
#[instrument(skip(state, query))]
pub async fn search_faculties(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<Vec<FacultyResponse>>, AppError> {
    Ok(Json(state.faculties.search(&query.name_or_color).await?))
}

#[utoipa::path(
    get,
    path = "/{id}/students",
    tag = "Faculties",
    operation_id = "listFacultyStudents",
    summary = "List the students of a faculty",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Students of the faculty", body = Vec<StudentResponse>),
        (status = 404, description = "Faculty not found (FACULTY_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn faculty_students(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    Ok(Json(state.faculties.students_of(id).await?))
}
