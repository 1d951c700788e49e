/// Name of the instance Lima targets when `LIMA_INSTANCE` is unset.
pub const DEFAULT_INSTANCE: &str = "default";

/// Environment variable read by `lima` to pick the instance to talk to.
pub const INSTANCE_SELECTOR_VARIABLE: &str = "LIMA_INSTANCE";

pub const SEARCH_PATH_VARIABLE: &str = "PATH";

/// Status `limactl list --json` reports for a booted instance.
pub const VM_STATUS_RUNNING: &str = "Running";

/// Prefix of the `Status` column for a running container.
pub const CONTAINER_STATUS_UP_PREFIX: &str = "Up";

/// Marker in the `Status` column of a paused container.
pub const CONTAINER_STATUS_PAUSED_MARKER: &str = "Paused";

/// Substituted for a missing repository or tag when building image keys.
pub const MISSING_FIELD_PLACEHOLDER: &str = "ERROR";

pub const DEFAULT_RUNNING_COLOR: &str = "green";
pub const DEFAULT_STOPPED_COLOR: &str = "red";
pub const DEFAULT_RUNNING_ICON: &str = "\u{1f411}";
pub const DEFAULT_STOPPED_ICON: &str = "\u{1f4a4}";
pub const DEFAULT_HOMEPAGE: &str = "https://github.com/lima-vm/lima";

pub const DEFAULT_LIMACTL_PROGRAM: &str = "limactl";
pub const DEFAULT_LIMA_PROGRAM: &str = "lima";
pub const DEFAULT_CONTAINER_RUNTIME_PROGRAM: &str = "nerdctl";
pub const DEFAULT_OSASCRIPT_PROGRAM: &str = "osascript";

pub const DEFAULT_SYSTEM_SEARCH_PATHS: [&str; 3] =
    ["/usr/local/bin", "/opt/homebrew/bin", "/opt/local/bin"];

/// Directories below the home directory that may hold `limactl` and friends.
pub const HOME_SEARCH_PATHS: [&str; 2] = ["bin", ".local/bin"];
