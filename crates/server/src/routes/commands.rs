use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use control::CommandLogEntry;

use crate::{error::ApiError, response::ApiResponse, state::AppState};

pub async fn get_commands(
    State(state): State<AppState>,
) -> ResponseJson<ApiResponse<Vec<CommandLogEntry>>> {
    ResponseJson(ApiResponse::success(state.center.commands().await))
}

pub async fn get_command(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<ResponseJson<ApiResponse<CommandLogEntry>>, ApiError> {
    let entry = state
        .center
        .command(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Command {} not found", id)))?;
    Ok(ResponseJson(ApiResponse::success(entry)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/commands", get(get_commands))
        .route("/commands/{id}", get(get_command))
}
