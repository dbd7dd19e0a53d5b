use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest, TokenResponse},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{check_login, hash_password},
        repo_types::{NewUser, User},
    },
    error::ApiError,
    state::AppState,
    validation::{echo, is_valid_email, Rules, ValidJson},
};

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth", get(current_user).post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(register))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[instrument(skip(state))]
pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = payload
        .email
        .as_deref()
        .map(normalize_email)
        .unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let mut rules = Rules::new();
    rules
        .check(
            is_valid_email(&email),
            "email",
            echo(&payload.email),
            "Please include a valid email",
        )
        .check(!password.is_empty(), "password", None, "Password is required");
    rules.finish()?;

    let user = state.users.find_by_email(&email).await?;
    let matched = check_login(&password, user.as_ref().map(|u| u.password_hash.as_str()))?;
    let user = match user {
        Some(user) if matched => user,
        Some(user) => {
            warn!(user_id = %user.id, "login invalid password");
            return Err(ApiError::InvalidCredentials);
        }
        None => {
            warn!(email = %email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = JwtKeys::from_ref(&state).sign(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let name = payload.name.as_deref().map(str::trim).unwrap_or_default().to_string();
    let email = payload
        .email
        .as_deref()
        .map(normalize_email)
        .unwrap_or_default();
    let password = payload.password.clone().unwrap_or_default();

    let mut rules = Rules::new();
    rules
        .check(!name.is_empty(), "name", echo(&payload.name), "Name is required")
        .check(
            is_valid_email(&email),
            "email",
            echo(&payload.email),
            "Please include a valid email",
        )
        .check(
            password.chars().count() >= MIN_PASSWORD_LEN,
            "password",
            None,
            "Please enter a password with 6 or more characters",
        );
    rules.finish()?;

    let password_hash = hash_password(&password)?;
    let new_user = NewUser {
        name,
        email,
        password_hash,
        avatar: payload.avatar.unwrap_or_default(),
    };

    let Some(user) = state.users.create(new_user).await? else {
        warn!("registration for existing email");
        return Err(ApiError::UserExists);
    };

    let token = JwtKeys::from_ref(&state).sign(user.id)?;
    info!(user_id = %user.id, "user registered");
    Ok(Json(TokenResponse { token }))
}
