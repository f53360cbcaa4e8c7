use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    entity::{UserActivity, UsersActivity},
    interface::{ActivityError, ActivityResult, ActivityStorage},
};

/// in-memory storage keeping records in a map.
#[derive(Clone, Default)]
pub(crate) struct ActivityStorageSuccessMock {
    pub(crate) records: Arc<Mutex<UsersActivity>>,
}

#[async_trait]
impl ActivityStorage for ActivityStorageSuccessMock {
    async fn upsert(&self, record: &UserActivity) -> ActivityResult<UserActivity> {
        let (user_id, activity) = record.clone().into_entry();
        self.records.lock().await.insert(user_id, activity);
        Ok(record.clone())
    }

    async fn get_all(&self) -> ActivityResult<UsersActivity> {
        Ok(self.records.lock().await.clone())
    }

    async fn close(&self) -> ActivityResult<()> {
        Ok(())
    }
}

/// storage whose every operation fails.
pub(crate) struct ActivityStorageFailureMock;

#[async_trait]
impl ActivityStorage for ActivityStorageFailureMock {
    async fn upsert(&self, _record: &UserActivity) -> ActivityResult<UserActivity> {
        Err(ActivityError::internal_error("mock storage upsert failed"))
    }

    async fn get_all(&self) -> ActivityResult<UsersActivity> {
        Err(ActivityError::internal_error("mock storage get all failed"))
    }

    async fn close(&self) -> ActivityResult<()> {
        Ok(())
    }
}
