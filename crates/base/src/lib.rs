pub mod consts;
pub mod paths;

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use directories::ProjectDirs;

pub const PROJECT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PROJECT_NAME: &str = "limabar";
pub const PROJECT_NAME_WITH_INITIAL_CAPITAL: &str = "Limabar";
pub const NOTIFICATION_TITLE: &str = "Lima";

pub const CLI_PROGRAM_NAME: &str = "limabar";
pub const CLI_CONFIG_NAME: &str = "config.yaml";

/// Platform configuration directory, e.g. `~/Library/Application
/// Support/limabar` on macOS. `None` when no home directory can be found.
pub static PROJECT_CONFIG_DIR: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    ProjectDirs::from("", PROJECT_NAME, PROJECT_NAME).map(|dirs| dirs.config_dir().to_path_buf())
});

#[must_use]
pub fn fallback_project_config_directories() -> Vec<PathBuf> {
    let Some(user_dirs) = directories::UserDirs::new() else {
        return Vec::new();
    };
    vec![
        [user_dirs.home_dir(), Path::new(".config"), Path::new(PROJECT_NAME)].iter().collect(),
        [user_dirs.home_dir(), Path::new(&format!(".{PROJECT_NAME}"))].iter().collect(),
    ]
}
