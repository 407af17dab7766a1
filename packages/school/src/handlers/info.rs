use axum::extract::State;
use tracing::instrument;

use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/port",
    tag = "Info",
    operation_id = "getPort",
    summary = "Configured port and active profiles",
    responses((status = 200, description = "e.g. `Port: 8080 | Profile: [dev]`", body = String)),
)]
#[instrument(skip(state))]
pub async fn port(State(state): State<AppState>) -> String {
    let server = &state.config.server;
    format!(
        "Port: {} | Profile: [{}]",
        server.port,
        server.profiles.join(", ")
    )
}
