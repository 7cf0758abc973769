use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use entity::sections::Model as Section;
use platform_api::{ApiError, ApiResult};
use platform_db::sections;
use serde::Deserialize;
use tracing::debug;

use super::required;
use crate::http::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sections", get(list_sections).post(create_section))
        .route("/sections/{id}", delete(delete_section))
}

#[derive(Deserialize)]
struct NewSection {
    section_name: Option<String>,
}

async fn list_sections(State(state): State<AppState>) -> ApiResult<Json<Vec<Section>>> {
    let rows = sections::list(&state.pool)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(rows))
}

async fn create_section(
    State(state): State<AppState>,
    Json(body): Json<NewSection>,
) -> ApiResult<Json<Section>> {
    let name = required("section_name", body.section_name)?;
    debug!(section_name = %name, "creating section");
    let created = sections::create(&state.pool, name)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(created))
}

async fn delete_section(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    sections::delete(&state.pool, id)
        .await
        .map_err(ApiError::internal)?;
    Ok(StatusCode::NO_CONTENT)
}
