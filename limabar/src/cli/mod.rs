//! Command-line entry point.
//!
//! The menu-bar host runs the plugin without arguments to draw the menu, and
//! with the flags of an [`Action`] when an entry is clicked. The menu is
//! rendered on every run; the action, if any, runs afterwards.
//!
//! ```bash
//! # Render the menu
//! limabar
//!
//! # Stop the `docker` instance
//! limabar --vm-action stop --vm docker
//!
//! # Remove a container from the default instance
//! limabar --container-action rm --target web
//! ```

pub mod error;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use limabar_base::{CLI_PROGRAM_NAME, consts::DEFAULT_INSTANCE};
use snafu::{OptionExt, ResultExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::level_filters::LevelFilter;

pub use self::error::Error;
use crate::{
    action::{Action, ContainerAction, Dispatcher, ImageAction, VmAction},
    command::{CommandRunner, SystemCommandRunner},
    config::Config,
    desktop::{AppleScript, Desktop},
    environment::{Environment, EnvironmentPreparer},
    inventory::Inventory,
    menu::{self, MenuRenderer, MenuState},
    shadow,
};

#[derive(Parser)]
#[command(
    name = CLI_PROGRAM_NAME,
    author,
    version,
    long_version = shadow::CLAP_LONG_VERSION,
    about = "Lima menu-bar plugin: shows Lima VMs, their containers and images, and acts on them.",
    long_about = "Prints a menu for xbar/SwiftBar describing the local Lima virtual machines \
                  and the nerdctl containers and images inside each running one. Menu entries \
                  re-run this program with one of the action flags below."
)]
pub struct Cli {
    #[arg(long = "debug", help = "Log at DEBUG level regardless of --log-level.")]
    debug: bool,

    #[arg(
        long = "log-level",
        value_enum,
        ignore_case = true,
        help = "Set the logging level. Defaults to the configuration file, or CRITICAL."
    )]
    log_level: Option<LogLevel>,

    #[arg(
        long = "vm",
        visible_alias = "virtual-machine",
        default_value = DEFAULT_INSTANCE,
        help = "Lima instance the action applies to."
    )]
    vm: String,

    #[arg(long = "target", help = "Container, image or command the action applies to.")]
    target: Option<String>,

    #[arg(long = "container-action", value_enum, help = "Act on the --target container.")]
    container_action: Option<ContainerAction>,

    #[arg(long = "image-action", value_enum, help = "Act on the --target image.")]
    image_action: Option<ImageAction>,

    #[arg(long = "pull-new-image", help = "Ask for an image reference and pull it.")]
    pull_new_image: bool,

    #[arg(long = "vm-action", value_enum, help = "Act on the --vm instance.")]
    vm_action: Option<VmAction>,

    #[arg(
        long = "config",
        short = 'c',
        env = "LIMABAR_CONFIG_FILE_PATH",
        help = "Specify a configuration file. Defaults to the platform config directory, \
                ~/.config/limabar/config.yaml or LIMABAR_CONFIG_FILE_PATH env var."
    )]
    config_file: Option<PathBuf>,
}

/// Level names accepted by `--log-level`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "INFO")]
    Info,
    #[value(name = "ERROR")]
    Error,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "CRITICAL")]
    Critical,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warning => Self::WARN,
            // tracing has nothing above ERROR
            LogLevel::Error | LogLevel::Critical => Self::ERROR,
        }
    }
}

impl Default for Cli {
    fn default() -> Self { Self::parse() }
}

impl Cli {
    fn load_config(&self) -> Result<Config, Error> {
        let mut config =
            Config::load(self.config_file.clone().unwrap_or_else(Config::search_config_file_path))?;

        if let Some(log_level) = self.log_level {
            config.log.level = log_level.into();
        }
        if self.debug {
            config.log.level = LevelFilter::DEBUG;
        }

        Ok(config)
    }

    /// The single action requested by the flags. When several action flags
    /// are given, the first of container, image, VM and pull-new-image wins.
    fn requested_action(&self) -> Result<Option<Action>, Error> {
        let Self { vm, target, container_action, image_action, vm_action, pull_new_image, .. } =
            self;
        let vm = vm.clone();

        let action = if let Some(action) = *container_action {
            let target = target.clone().context(error::MissingTargetSnafu {
                flag: "--container-action",
            })?;
            Some(Action::Container { vm, target, action })
        } else if let Some(action) = *image_action {
            let target =
                target.clone().context(error::MissingTargetSnafu { flag: "--image-action" })?;
            Some(Action::Image { vm, target, action })
        } else if let Some(action) = *vm_action {
            Some(Action::Vm { vm, action })
        } else if *pull_new_image {
            Some(Action::PullNewImage { vm })
        } else {
            None
        };
        Ok(action)
    }

    /// Writes the menu to `out`, then dispatches the requested action, if
    /// any, exactly once.
    async fn execute<R, D, W>(
        &self,
        config: &Config,
        runner: &R,
        desktop: &D,
        preparer: &EnvironmentPreparer,
        program: &str,
        out: &mut W,
    ) -> Result<i32, Error>
    where
        R: CommandRunner,
        D: Desktop,
        W: AsyncWrite + Unpin,
    {
        let state = MenuState::gather(&Inventory::new(runner, preparer, &config.tools)).await?;
        let lines = MenuRenderer::new(&config.menu, program).render(&state);
        out.write_all(menu::to_markup(&lines).as_bytes()).await.context(error::WriteStdoutSnafu)?;
        out.flush().await.context(error::WriteStdoutSnafu)?;

        if let Some(action) = self.requested_action()? {
            Dispatcher::new(runner, desktop, preparer, &config.tools).dispatch(&action).await?;
        }

        Ok(0)
    }

    /// Renders the menu to standard output, then performs the requested
    /// action, if any.
    ///
    /// # Errors
    ///
    /// Returns an `Error` if the configuration cannot be loaded, an external
    /// program cannot be started, or standard output cannot be written.
    pub fn run(self) -> Result<i32, Error> {
        let config = self.load_config()?;
        config.log.registry();

        let program = std::env::current_exe().context(error::ResolveProgramPathSnafu)?;
        let program = program.to_string_lossy();

        let fut = async {
            let runner = SystemCommandRunner;
            let preparer = EnvironmentPreparer::with_search_paths(
                Environment::from_process(),
                &config.search_paths,
                limabar_base::paths::home_dir().as_deref(),
            );
            let desktop_env = preparer.prepare(DEFAULT_INSTANCE);
            let desktop = AppleScript::new(&runner, &config.tools.osascript, desktop_env);
            let mut stdout = tokio::io::stdout();

            self.execute(&config, &runner, &desktop, &preparer, &program, &mut stdout).await
        };

        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context(error::InitializeTokioRuntimeSnafu)?
            .block_on(fut)
    }
}
