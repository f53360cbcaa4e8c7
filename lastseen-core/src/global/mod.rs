mod config;
pub use config::{load_config, Config, StorageBackend};

mod storage_fs;
pub(crate) use storage_fs::STORAGE_FS_FILE_PERMISSION;
pub use storage_fs::{init_storage_fs, ServerFS, StorageFS};
