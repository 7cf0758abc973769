use axum::{Json, Router, extract::State, routing::post};
use platform_api::{ApiError, ApiResult};
use platform_authn::{AuthError, hash_password, issue_token, verify_password};
use platform_db::users::{self, Account};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::required;
use crate::http::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

#[derive(Deserialize)]
struct Credentials {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Serialize)]
struct TokenResponse {
    token: String,
}

async fn signup(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> ApiResult<Json<Account>> {
    let username = required("username", body.username)?;
    let password = required("password", body.password)?;
    let password_hash = off_runtime(move || hash_password(&password)).await?;
    let account = users::create(&state.pool, username, password_hash)
        .await
        .map_err(ApiError::internal)?;
    info!(user_id = account.user_id, "account created");
    Ok(Json(account))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> ApiResult<Json<TokenResponse>> {
    let username = required("username", body.username)?;
    let password = required("password", body.password)?;
    let user = users::find_by_username(&state.pool, &username)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::bad_request("User not found"))?;
    let entity::users::Model {
        user_id,
        username,
        password_hash,
    } = user;
    if !off_runtime(move || verify_password(&password, &password_hash)).await? {
        return Err(ApiError::bad_request("Wrong password"));
    }
    let token = issue_token(user_id, &username, &state.config.auth)?;
    info!(user_id, "login succeeded");
    Ok(Json(TokenResponse { token }))
}

/// Argon2 is CPU-bound; keep it on the blocking pool.
async fn off_runtime<T, F>(work: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::from)
}
