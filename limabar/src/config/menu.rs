use limabar_base::consts::{
    DEFAULT_HOMEPAGE, DEFAULT_RUNNING_COLOR, DEFAULT_RUNNING_ICON, DEFAULT_STOPPED_COLOR,
    DEFAULT_STOPPED_ICON,
};
use serde::{Deserialize, Serialize};

/// Appearance of the rendered menu.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
    #[serde(default = "MenuConfig::default_running_color")]
    pub running_color: String,

    #[serde(default = "MenuConfig::default_stopped_color")]
    pub stopped_color: String,

    /// Shown in the menu bar while at least one VM is running.
    #[serde(default = "MenuConfig::default_running_icon")]
    pub running_icon: String,

    #[serde(default = "MenuConfig::default_stopped_icon")]
    pub stopped_icon: String,

    /// Target of the `Homepage` entry in the about block.
    #[serde(default = "MenuConfig::default_homepage")]
    pub homepage: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            running_color: Self::default_running_color(),
            stopped_color: Self::default_stopped_color(),
            running_icon: Self::default_running_icon(),
            stopped_icon: Self::default_stopped_icon(),
            homepage: Self::default_homepage(),
        }
    }
}

impl MenuConfig {
    fn default_running_color() -> String { DEFAULT_RUNNING_COLOR.to_string() }

    fn default_stopped_color() -> String { DEFAULT_STOPPED_COLOR.to_string() }

    fn default_running_icon() -> String { DEFAULT_RUNNING_ICON.to_string() }

    fn default_stopped_icon() -> String { DEFAULT_STOPPED_ICON.to_string() }

    fn default_homepage() -> String { DEFAULT_HOMEPAGE.to_string() }

    /// Color for something that is, or is not, running.
    pub fn status_color(&self, running: bool) -> &str {
        if running { self.running_color.as_str() } else { self.stopped_color.as_str() }
    }
}
