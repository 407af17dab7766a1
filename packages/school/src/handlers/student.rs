use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::faculty::FacultyResponse;
use crate::models::student::{AgeRangeQuery, StudentRequest, StudentResponse};
use crate::services::printing::PrintMode;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Students",
    operation_id = "createStudent",
    summary = "Create a new student",
    description = "Creates a student. When `facultyId` is given the faculty must exist.",
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Faculty not found (FACULTY_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<StudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.validate()?;
    let student = state.students.create(input).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Students",
    operation_id = "listStudents",
    summary = "List all students",
    responses((status = 200, description = "All students ordered by id", body = Vec<StudentResponse>)),
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    Ok(Json(state.students.list().await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Students",
    operation_id = "getStudent",
    summary = "Get a student by ID",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = StudentResponse),
        (status = 404, description = "Student not found (STUDENT_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    Ok(Json(state.students.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Students",
    operation_id = "updateStudent",
    summary = "Replace a student",
    description = "Full replace. Omitting `facultyId` clears the student's faculty.",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Student or faculty not found (STUDENT_NOT_FOUND, FACULTY_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<StudentRequest>,
) -> Result<Json<StudentResponse>, AppError> {
    let input = payload.validate()?;
    Ok(Json(state.students.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Students",
    operation_id = "deleteStudent",
    summary = "Delete a student",
    description = "Deletes the student together with its avatar and returns the deleted student.",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = StudentResponse),
        (status = 404, description = "Student not found (STUDENT_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    Ok(Json(state.students.delete(id).await?))
}

#[utoipa::path(
    get,
    path = "/age/{age}",
    tag = "Students",
    operation_id = "listStudentsByAge",
    summary = "List students of an exact age",
    params(("age" = i32, Path, description = "Age to match")),
    responses((status = 200, description = "Matching students", body = Vec<StudentResponse>)),
)]
#[instrument(skip(state), fields(age))]
pub async fn students_by_age(
    State(state): State<AppState>,
    Path(age): Path<i32>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    Ok(Json(state.students.by_age(age).await?))
}

#[utoipa::path(
    get,
    path = "/age-between",
    tag = "Students",
    operation_id = "listStudentsByAgeRange",
    summary = "List students within an inclusive age range",
    description = "An inverted range (`minAge > maxAge`) yields an empty list.",
    params(AgeRangeQuery),
    responses(
        (status = 200, description = "Matching students", body = Vec<StudentResponse>),
        (status = 400, description = "Missing or malformed parameter (plain text)"),
    ),
)]
#[instrument(skip(state, query))]
pub async fn students_by_age_between(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AgeRangeQuery>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    Ok(Json(
        state
            .students
            .by_age_between(query.min_age, query.max_age)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/{id}/faculty",
    tag = "Students",
    operation_id = "getStudentFaculty",
    summary = "Get the faculty of a student",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "The student's faculty", body = FacultyResponse),
        (status = 404, description = "Student not found or without faculty (STUDENT_NOT_FOUND, FACULTY_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn student_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    Ok(Json(state.students.faculty_of(id).await?))
}

#[utoipa::path(
    get,
    path = "/count",
    tag = "Students",
    operation_id = "countStudents",
    summary = "Total number of students",
    responses((status = 200, description = "Student count", body = u64)),
)]
#[instrument(skip(state))]
pub async fn count_students(State(state): State<AppState>) -> Result<Json<u64>, AppError> {
    Ok(Json(state.students.count().await?))
}

#[utoipa::path(
    get,
    path = "/average-age",
    tag = "Students",
    operation_id = "averageStudentAge",
    summary = "Average student age computed by the database",
    responses((status = 200, description = "Average age, 0 without students", body = f64)),
)]
#[instrument(skip(state))]
pub async fn average_age(State(state): State<AppState>) -> Result<Json<f64>, AppError> {
    Ok(Json(state.students.average_age().await?))
}

#[utoipa::path(
    get,
    path = "/last-five",
    tag = "Students",
    operation_id = "lastFiveStudents",
    summary = "The five most recently created students",
    responses((status = 200, description = "Newest first", body = Vec<StudentResponse>)),
)]
#[instrument(skip(state))]
pub async fn last_five(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    Ok(Json(state.students.last_five().await?))
}

#[utoipa::path(
    get,
    path = "/print-parallel",
    tag = "Students",
    operation_id = "printStudentsParallel",
    summary = "Print six names from three tasks without coordination",
    responses(
        (status = 200, description = "Names printed", body = String),
        (status = 400, description = "Fewer than six students (INSUFFICIENT_STUDENTS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn print_parallel(State(state): State<AppState>) -> Result<String, AppError> {
    Ok(state.printing.print(PrintMode::Parallel).await?.to_string())
}

#[utoipa::path(
    get,
    path = "/print-synchronized",
    tag = "Students",
    operation_id = "printStudentsSynchronized",
    summary = "Print six names from three tasks, one whole line at a time",
    responses(
        (status = 200, description = "Names printed", body = String),
        (status = 400, description = "Fewer than six students (INSUFFICIENT_STUDENTS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn print_synchronized(State(state): State<AppState>) -> Result<String, AppError> {
    Ok(state.printing.print(PrintMode::Synchronized).await?.to_string())
}
