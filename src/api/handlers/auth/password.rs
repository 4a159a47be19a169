//! bcrypt hashing, run off the async executor.

use thiserror::Error;
use tokio::task::{self, JoinError};

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing task failed: {0}")]
    Join(#[from] JoinError),
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Hash `password` with a fresh salt at `cost`.
pub(super) async fn hash(password: String, cost: u32) -> Result<String, PasswordError> {
    Ok(task::spawn_blocking(move || bcrypt::hash(password, cost)).await??)
}

/// Check `password` against a stored bcrypt hash.
///
/// A malformed hash is an error, not a mismatch.
pub(super) async fn verify(password: String, hash: String) -> Result<bool, PasswordError> {
    Ok(task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??)
}
