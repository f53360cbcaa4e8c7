// file_storage.rs keeps every record inside a single JSON object on disk.
// Each read parses the whole file, each write serializes the whole object back.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use lastseen_utils::fs_util;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::instrument;

use crate::activity::{
    entity::{UserActivity, UsersActivity},
    interface::{ActivityResult, ActivityStorage},
};
use crate::error::AsInternalError;
use crate::global::{self, StorageFS, STORAGE_FS_FILE_PERMISSION};

const ERROR_PREFIX: &str = "[ACTIVITY][file_storage]";

#[derive(Clone)]
pub struct FileStorage {
    fs: StorageFS,
}

impl FileStorage {
    pub fn new(fs: StorageFS) -> Self {
        Self { fs }
    }

    /// open the data file at `data_file`, creating `{}` when absent.
    pub fn open(data_file: &Path) -> Result<Self, anyhow::Error> {
        let fs = global::init_storage_fs(data_file)?;
        Ok(Self::new(fs))
    }

    /// load the whole dataset. Unreadable or corrupt file is logged and read as empty.
    async fn read_all(&self) -> UsersActivity {
        let fs_read = self.fs.read().await;
        let data_file = fs_read.data_file();

        let content = match fs::read_to_string(data_file).await {
            Ok(content) => content,
            Err(err) => {
                tracing::error!(
                    "{} failed reading data file {:?}: {}",
                    ERROR_PREFIX,
                    data_file,
                    err
                );
                return UsersActivity::new();
            }
        };

        match serde_json::from_str::<UsersActivity>(&content) {
            Ok(users) => users,
            Err(err) => {
                tracing::error!(
                    "{} failed parsing data file {:?}: {}",
                    ERROR_PREFIX,
                    data_file,
                    err
                );
                UsersActivity::new()
            }
        }
    }

    async fn write_all(&self, users: &UsersActivity) -> ActivityResult<()> {
        let json_string = serde_json::to_string_pretty(users)
            .context("file storage parse users into json string")
            .as_internal_err()?;

        let fs_write = self.fs.write().await;
        let data_file = fs_write.data_file();

        let mut file = File::create(data_file)
            .await
            .context("file storage create data file")
            .as_internal_err()?;
        file.write_all(json_string.as_bytes())
            .await
            .context("file storage write data file")
            .as_internal_err()?;
        file.flush()
            .await
            .context("file storage flush data file")
            .as_internal_err()?;

        fs_util::set_permission_async(data_file, STORAGE_FS_FILE_PERMISSION)
            .await
            .context("file storage setting permission")
            .as_internal_err()?;

        Ok(())
    }
}

#[async_trait]
impl ActivityStorage for FileStorage {
    // read then write without holding the lock across both: concurrent pings
    // may lose one update, last write wins.
    // A failed write is logged and dropped, the ping still succeeds.
    #[instrument(skip(self))]
    async fn upsert(&self, record: &UserActivity) -> ActivityResult<UserActivity> {
        let mut users = self.read_all().await;

        let (user_id, activity) = record.clone().into_entry();
        users.insert(user_id, activity);

        if let Err(err) = self.write_all(&users).await {
            tracing::error!("{} failed writing data file: {}", ERROR_PREFIX, err.detail());
        }

        Ok(record.clone())
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> ActivityResult<UsersActivity> {
        Ok(self.read_all().await)
    }

    async fn close(&self) -> ActivityResult<()> {
        // every write is flushed already, nothing is kept open between requests.
        tracing::debug!("{} closed", ERROR_PREFIX);
        Ok(())
    }
}
