use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use lastseen_utils::fs_util;

pub(crate) const STORAGE_FS_DIR_PERMISSION: u32 = 0o750;
pub(crate) const STORAGE_FS_FILE_PERMISSION: u32 = 0o640;

/// content of a data file holding no record.
const EMPTY_DATA: &str = "{}";

/// Alias for ServerFS. The lock guards single reads and writes of the data file.
pub type StorageFS = Arc<RwLock<ServerFS>>;

#[derive(Debug, Clone)]
pub struct ServerFS {
    data_file: PathBuf,
}

impl ServerFS {
    pub(crate) fn data_file(&self) -> &PathBuf {
        &self.data_file
    }
}

/// Prepare the data file at `data_file`: parent directories are created and
/// a missing file is initialized to an empty JSON object.
pub fn init_storage_fs(data_file: &Path) -> Result<StorageFS, anyhow::Error> {
    if let Some(dir) = data_file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs_util::ensure_dir(dir, STORAGE_FS_DIR_PERMISSION)
            .context("global: failed initializing storage fs dir")?;
    }

    if !data_file
        .try_exists()
        .context("global: failed checking storage fs data file")?
    {
        std::fs::write(data_file, EMPTY_DATA)
            .context("global: failed initializing storage fs data file")?;
        fs_util::set_permission(data_file, STORAGE_FS_FILE_PERMISSION)
            .context("global: failed setting storage fs data file permission")?;
    }

    let storage_fs = Arc::new(RwLock::new(ServerFS {
        data_file: data_file.to_path_buf(),
    }));

    Ok(storage_fs)
}
