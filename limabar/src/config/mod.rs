mod error;
mod menu;
mod tools;

use std::path::{Path, PathBuf};

use limabar_base::consts::DEFAULT_SYSTEM_SEARCH_PATHS;
use limabar_cli::config::LogConfig;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub use self::{error::Error, menu::MenuConfig, tools::ToolsConfig};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub menu: MenuConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    /// Directories appended to `PATH` when they exist, before the
    /// home-relative ones (`~/bin`, `~/.local/bin`).
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<PathBuf>,

    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            menu: MenuConfig::default(),
            tools: ToolsConfig::default(),
            search_paths: default_search_paths(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    pub fn search_config_file_path() -> PathBuf {
        let paths = Self::default_path()
            .into_iter()
            .chain(limabar_base::fallback_project_config_directories().into_iter().map(
                |mut path| {
                    path.push(limabar_base::CLI_CONFIG_NAME);
                    path
                },
            ))
            .collect::<Vec<_>>();
        for path in &paths {
            let Ok(exists) = path.try_exists() else {
                continue;
            };
            if exists {
                return path.clone();
            }
        }
        paths.into_iter().next().unwrap_or_else(|| PathBuf::from(limabar_base::CLI_CONFIG_NAME))
    }

    #[inline]
    pub fn default_path() -> Option<PathBuf> {
        limabar_base::PROJECT_CONFIG_DIR
            .as_ref()
            .map(|dir| dir.join(limabar_base::CLI_CONFIG_NAME))
    }

    /// Reads the configuration at `path`. A file that does not exist is not
    /// an error: the plugin must work without any configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path
            .as_ref()
            .try_resolve()
            .map(|path| path.to_path_buf())
            .with_context(|_| error::ResolveFilePathSnafu {
                file_path: path.as_ref().to_path_buf(),
            })?;

        if !path.try_exists().context(error::OpenConfigSnafu { filename: path.clone() })? {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let data = std::fs::read(&path).context(error::OpenConfigSnafu { filename: path.clone() })?;
        let mut config: Self =
            serde_yaml::from_slice(&data).context(error::ParseConfigSnafu { filename: path })?;

        config.log.file_path = match config.log.file_path.map(|path| {
            path.try_resolve()
                .map(|path| path.to_path_buf())
                .with_context(|_| error::ResolveFilePathSnafu { file_path: path.clone() })
        }) {
            Some(Ok(path)) => Some(path),
            Some(Err(err)) => return Err(err),
            None => None,
        };

        Ok(config)
    }
}

fn default_search_paths() -> Vec<PathBuf> {
    DEFAULT_SYSTEM_SEARCH_PATHS.iter().map(PathBuf::from).collect()
}
