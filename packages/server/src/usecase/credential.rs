//! パスワードのハッシュ化・検証をブロッキングスレッドで実行するヘルパー

use std::sync::Arc;

use crate::domain::{CredentialHasher, RawPassword};

use super::error::AuthError;

pub(crate) async fn hash_password(
    hasher: &Arc<dyn CredentialHasher>,
    password: &RawPassword,
) -> Result<String, AuthError> {
    let hasher = Arc::clone(hasher);
    let password = password.clone();
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AuthError::TaskFailed(e.to_string()))?
        .map_err(AuthError::from)
}

pub(crate) async fn verify_password(
    hasher: &Arc<dyn CredentialHasher>,
    password: &RawPassword,
    hash: &str,
) -> Result<bool, AuthError> {
    let hasher = Arc::clone(hasher);
    let password = password.clone();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| AuthError::TaskFailed(e.to_string()))?
        .map_err(AuthError::from)
}
