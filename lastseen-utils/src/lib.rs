pub mod config_util;
pub mod fs_util;
pub mod graceful_util;
pub mod tracing_util;
