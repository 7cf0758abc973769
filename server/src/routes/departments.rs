use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use entity::departments::Model as Department;
use platform_api::{ApiError, ApiResult};
use platform_db::departments;
use serde::Deserialize;
use tracing::debug;

use super::required;
use crate::http::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list_departments).post(create_department))
        .route("/departments/{id}", delete(delete_department))
}

#[derive(Deserialize)]
struct NewDepartment {
    department_name: Option<String>,
}

async fn list_departments(State(state): State<AppState>) -> ApiResult<Json<Vec<Department>>> {
    let rows = departments::list(&state.pool)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(rows))
}

async fn create_department(
    State(state): State<AppState>,
    Json(body): Json<NewDepartment>,
) -> ApiResult<Json<Department>> {
    let name = required("department_name", body.department_name)?;
    debug!(department_name = %name, "creating department");
    let created = departments::create(&state.pool, name)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(created))
}

async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    departments::delete(&state.pool, id)
        .await
        .map_err(ApiError::internal)?;
    Ok(StatusCode::NO_CONTENT)
}
