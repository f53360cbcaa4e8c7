use async_trait::async_trait;
use thiserror::Error;

use super::entity::{UserActivity, UsersActivity};
use crate::error::{ClientError, InternalError};

pub(super) const ERROR_PREFIX: &str = "[ACTIVITY]";

pub type ActivityResult<T> = Result<T, ActivityError>;

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("{ERROR_PREFIX} client error: {0}")]
    ClientError(#[from] ClientError),

    #[error("{ERROR_PREFIX} internal error: {0}")]
    InternalError(#[from] InternalError),
}

impl ActivityError {
    pub fn client_error(err_msg: &str) -> Self {
        ActivityError::ClientError(ClientError::from_msg(err_msg))
    }

    pub fn internal_error(err_msg: &str) -> Self {
        ActivityError::InternalError(InternalError::from_msg(err_msg))
    }

    pub fn detail(&self) -> String {
        match self {
            ActivityError::ClientError(err) => format!("{} \n  Caused by: {:#}", self, err.0),
            ActivityError::InternalError(err) => {
                format!("{} \n  Caused by: {}", self, err.detail())
            }
        }
    }
}

/// Storage of user activity records.
/// Opened once at startup, shared by every request, closed at shutdown.
#[async_trait]
pub trait ActivityStorage {
    /// insert the record, or overwrite the existing one with the same user id.
    /// returns the persisted record.
    async fn upsert(&self, record: &UserActivity) -> ActivityResult<UserActivity>;

    /// all records keyed by user id.
    async fn get_all(&self) -> ActivityResult<UsersActivity>;

    /// release resources held by the storage.
    async fn close(&self) -> ActivityResult<()>;
}
