use limabar_base::consts::{
    DEFAULT_CONTAINER_RUNTIME_PROGRAM, DEFAULT_LIMA_PROGRAM, DEFAULT_LIMACTL_PROGRAM,
    DEFAULT_OSASCRIPT_PROGRAM,
};
use serde::{Deserialize, Serialize};

/// Names of the external programs the plugin drives. Bare names are looked
/// up on the prepared `PATH`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsConfig {
    #[serde(default = "ToolsConfig::default_limactl")]
    pub limactl: String,

    #[serde(default = "ToolsConfig::default_lima")]
    pub lima: String,

    /// Container runtime invoked inside the instance through `lima`.
    #[serde(default = "ToolsConfig::default_container_runtime")]
    pub container_runtime: String,

    #[serde(default = "ToolsConfig::default_osascript")]
    pub osascript: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            limactl: Self::default_limactl(),
            lima: Self::default_lima(),
            container_runtime: Self::default_container_runtime(),
            osascript: Self::default_osascript(),
        }
    }
}

impl ToolsConfig {
    fn default_limactl() -> String { DEFAULT_LIMACTL_PROGRAM.to_string() }

    fn default_lima() -> String { DEFAULT_LIMA_PROGRAM.to_string() }

    fn default_container_runtime() -> String { DEFAULT_CONTAINER_RUNTIME_PROGRAM.to_string() }

    fn default_osascript() -> String { DEFAULT_OSASCRIPT_PROGRAM.to_string() }

    /// `limactl <args>`
    pub fn limactl_command<I, S>(&self, args: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        std::iter::once(self.limactl.clone()).chain(args.into_iter().map(Into::into)).collect()
    }

    /// `lima <args>`, which runs `args` in the instance named by
    /// `LIMA_INSTANCE`.
    pub fn lima_command<I, S>(&self, args: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        std::iter::once(self.lima.clone()).chain(args.into_iter().map(Into::into)).collect()
    }

    /// `lima nerdctl <args>`
    pub fn container_runtime_command<I, S>(&self, args: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lima_command(
            std::iter::once(self.container_runtime.clone()).chain(args.into_iter().map(Into::into)),
        )
    }
}
