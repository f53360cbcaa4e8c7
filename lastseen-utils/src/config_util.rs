use configrs::config::Config as configrs;
use serde::Deserialize;
use std::{
    fmt::Debug,
    path::{Path, PathBuf},
};

use anyhow::anyhow;

const ERROR_PREFIX: &str = "[utils]";

/// .env file for local development, placed in workspace root.
const DEV_ENV_FILE_NAME: &str = ".env";

/// get config from env variables with the given prefix.
/// On debug builds, a .env file in workspace root (if any) overwrites the env.
pub fn get_config<CFG>(prefix: &'static str) -> Result<CFG, anyhow::Error>
where
    CFG: for<'de> Deserialize<'de> + Debug + Clone,
{
    let cfg = configrs::new().with_env_prefix(prefix);

    let dev_config_file = if cfg!(debug_assertions) {
        find_workspace_root()
            .ok()
            .map(|dir| dir.join(DEV_ENV_FILE_NAME))
            .filter(|file| file.is_file())
    } else {
        None
    };

    if let Some(dev_config_file) = dev_config_file {
        return cfg
            .with_overwrite()
            .with_env(&dev_config_file)
            .build::<CFG>()
            .map_err(|err| {
                anyhow!(
                    "{} failed reading local config at {:?}: {}",
                    ERROR_PREFIX,
                    dev_config_file.as_path(),
                    err
                )
            });
    }

    cfg.build::<CFG>()
        .map_err(|err| anyhow!("{} failed parsing env: {}", ERROR_PREFIX, err))
}

pub fn find_workspace_root() -> Result<PathBuf, anyhow::Error> {
    let current_dir = std::env::current_dir()?;
    find_workspace_root_from(current_dir)
}

fn find_workspace_root_from(mut current_dir: PathBuf) -> Result<PathBuf, anyhow::Error> {
    loop {
        if is_workspace_root(&current_dir) {
            return Ok(current_dir);
        }

        if !current_dir.pop() {
            return Err(anyhow!("{} root workspace not found", ERROR_PREFIX));
        }
    }
}

fn is_workspace_root(dir: &Path) -> bool {
    if dir.join(".git").is_dir() {
        return true;
    }

    let cargo_toml = dir.join("Cargo.toml");
    if cargo_toml.is_file() {
        if let Ok(contents) = std::fs::read_to_string(cargo_toml) {
            if contents.contains("[workspace]") {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod config_util_tests {
    use super::*;

    #[test]
    fn test_find_workspace_root_from_member() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        std::fs::write(
            root.join("Cargo.toml"),
            "[workspace]\nmembers = [\"member\"]\n",
        )
        .unwrap();
        let member = root.join("member").join("src");
        std::fs::create_dir_all(&member).unwrap();
        std::fs::write(
            root.join("member").join("Cargo.toml"),
            "[package]\nname = \"member\"\n",
        )
        .unwrap();

        let found = find_workspace_root_from(member).unwrap();

        assert_eq!(found, root);
    }

    #[test]
    fn test_is_workspace_root_plain_package() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"x\"\n").unwrap();

        assert!(!is_workspace_root(dir.path()));
    }
}
