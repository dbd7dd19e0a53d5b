use argon2::{
    password_hash::{Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::ApiError;

/// Verified when no account matches the email, so an unknown email costs the
/// same argon2 run as a wrong password. Never matches any input.
const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| argon2_failure("hash", e))
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(hash).map_err(|e| argon2_failure("parse", e))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(argon2_failure("verify", e)),
    }
}

/// Checks a login attempt against the account's hash, or against the decoy
/// when the email matched no account.
pub fn check_login(plain: &str, stored_hash: Option<&str>) -> Result<bool, ApiError> {
    match stored_hash {
        Some(hash) => verify_password(plain, hash),
        None => verify_password(plain, DECOY_HASH).map(|_| false),
    }
}

fn argon2_failure(stage: &'static str, e: HashError) -> ApiError {
    error!(error = %e, stage, "argon2 failure");
    ApiError::Server(anyhow::anyhow!("argon2 {stage}: {e}"))
}
