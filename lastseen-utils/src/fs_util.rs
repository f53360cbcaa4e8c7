use std::fs;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// create the directory (and its parents) if missing, then apply permission on unix.
pub fn ensure_dir(dir: &Path, permission: u32) -> Result<(), anyhow::Error> {
    if !dir.try_exists()? {
        fs::create_dir_all(dir)?;
        set_permission(dir, permission)?;
    }

    Ok(())
}

pub fn set_permission(path: &Path, permission: u32) -> Result<(), anyhow::Error> {
    #[cfg(unix)]
    {
        let mut permissions = fs::metadata(path)?.permissions();
        permissions.set_mode(permission);
        fs::set_permissions(path, permissions)?;
    }

    #[cfg(not(unix))]
    {
        let _ = (path, permission);
    }

    Ok(())
}

/// [`set_permission`] off the async runtime threads.
pub async fn set_permission_async(path: &Path, permission: u32) -> Result<(), anyhow::Error> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || set_permission(&path, permission)).await?
}
