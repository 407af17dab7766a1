use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/student", student_routes())
        .nest("/faculty", faculty_routes())
        .nest("/avatar", avatar_routes(config.avatar.max_upload_bytes))
        .nest("/analytics", analytics_routes())
        .nest("/info", info_routes())
}

fn student_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::student::list_students,
            handlers::student::create_student
        ))
        .routes(routes!(
            handlers::student::get_student,
            handlers::student::update_student,
            handlers::student::delete_student
        ))
        .routes(routes!(handlers::student::students_by_age))
        .routes(routes!(handlers::student::students_by_age_between))
        .routes(routes!(handlers::student::student_faculty))
        .routes(routes!(handlers::student::count_students))
        .routes(routes!(handlers::student::average_age))
        .routes(routes!(handlers::student::last_five))
        .routes(routes!(handlers::student::print_parallel))
        .routes(routes!(handlers::student::print_synchronized))
}

fn faculty_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::faculty::list_faculties,
            handlers::faculty::create_faculty
        ))
        .routes(routes!(
            handlers::faculty::get_faculty,
            handlers::faculty::update_faculty,
            handlers::faculty::delete_faculty
        ))
        .routes(routes!(handlers::faculty::faculties_by_color))
        .routes(routes!(handlers::faculty::search_faculties))
        .routes(routes!(handlers::faculty::faculty_students))
}

fn avatar_routes(max_upload_bytes: usize) -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::avatar::upload_avatar))
        .layer(handlers::avatar::avatar_upload_body_limit(max_upload_bytes));

    OpenApiRouter::new()
        .routes(routes!(handlers::avatar::avatar_info))
        .routes(routes!(handlers::avatar::avatar_preview))
        .routes(routes!(handlers::avatar::avatar_full))
        .routes(routes!(handlers::avatar::list_avatars))
        .merge(upload)
}

fn analytics_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::analytics::names_starting_with))
        .routes(routes!(handlers::analytics::average_age))
        .routes(routes!(handlers::analytics::longest_faculty_name))
        .routes(routes!(handlers::analytics::original_sum))
        .routes(routes!(handlers::analytics::optimized_sum))
        .routes(routes!(handlers::analytics::math_sum))
}

fn info_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::info::port))
}
