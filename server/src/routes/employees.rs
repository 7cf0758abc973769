use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
};
use chrono::NaiveDate;
use entity::employees::Model as Employee;
use platform_api::{ApiError, ApiResult};
use platform_db::employees::{self, EmployeeChanges, EmployeeListing, NewEmployee};
use serde::Deserialize;
use tracing::debug;

use super::{double_option, json_or_empty, required};
use crate::http::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
}

#[derive(Deserialize)]
struct CreateEmployeeBody {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    hire_date: Option<NaiveDate>,
    department_id: Option<i32>,
    section_id: Option<i32>,
}

#[derive(Deserialize)]
struct UpdateEmployeeBody {
    first_name: Option<String>,
    last_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    hire_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    department_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    section_id: Option<Option<i32>>,
}

impl From<UpdateEmployeeBody> for EmployeeChanges {
    fn from(body: UpdateEmployeeBody) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            phone: body.phone,
            hire_date: body.hire_date,
            department_id: body.department_id,
            section_id: body.section_id,
        }
    }
}

async fn list_employees(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<EmployeeListing>>> {
    let rows = employees::list(&state.pool)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(rows))
}

async fn get_employee(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Response> {
    let found = employees::get(&state.pool, id)
        .await
        .map_err(ApiError::internal)?;
    Ok(json_or_empty(found))
}

async fn create_employee(
    State(state): State<AppState>,
    Json(body): Json<CreateEmployeeBody>,
) -> ApiResult<Json<Employee>> {
    let new = NewEmployee {
        first_name: required("first_name", body.first_name)?,
        last_name: required("last_name", body.last_name)?,
        email: body.email,
        phone: body.phone,
        hire_date: body.hire_date,
        department_id: body.department_id,
        section_id: body.section_id,
    };
    let created = employees::create(&state.pool, new)
        .await
        .map_err(ApiError::internal)?;
    debug!(employee_id = created.employee_id, "employee created");
    Ok(Json(created))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateEmployeeBody>,
) -> ApiResult<Response> {
    let updated = employees::update(&state.pool, id, body.into())
        .await
        .map_err(ApiError::internal)?;
    Ok(json_or_empty(updated))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    employees::delete(&state.pool, id)
        .await
        .map_err(ApiError::internal)?;
    Ok(StatusCode::NO_CONTENT)
}
