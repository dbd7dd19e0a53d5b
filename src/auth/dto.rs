use serde::{Deserialize, Serialize};

/// Request body for login. Fields are optional so a missing one turns into a
/// field error instead of a body rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for user registration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

/// Returned after login and registration.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
