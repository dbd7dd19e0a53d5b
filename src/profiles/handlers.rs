use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::ApiError,
    profiles::{dto::ProfileInput, repo_types::Profile, services::build_fields},
    state::AppState,
    validation::ValidJson,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/profile/me", get(my_profile).post(my_profile))
        .route("/profile/user/:user_id", get(profile_by_user))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/profile", get(list_profiles).post(upsert_profile))
}

#[instrument(skip(state))]
pub async fn my_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, ApiError> {
    let profile = state
        .profiles
        .find_by_user(user_id)
        .await?
        .ok_or(ApiError::NotFound("There is no profile for this user"))?;
    Ok(Json(profile))
}

#[instrument(skip(state, payload))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(payload): ValidJson<ProfileInput>,
) -> Result<Json<Profile>, ApiError> {
    let fields = build_fields(payload, &state.config.profile)?;
    let profile = state.profiles.upsert(user_id, fields).await?;
    info!(user_id = %user_id, profile_id = %profile.id, "profile saved");
    Ok(Json(profile))
}

#[instrument(skip(state))]
pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, ApiError> {
    Ok(Json(state.profiles.list().await?))
}

#[instrument(skip(state))]
pub async fn profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    const NOT_FOUND: &str = "Profile not found";
    let user_id = Uuid::parse_str(&user_id).map_err(|_| ApiError::NotFound(NOT_FOUND))?;
    let profile = state
        .profiles
        .find_by_user(user_id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;
    Ok(Json(profile))
}
