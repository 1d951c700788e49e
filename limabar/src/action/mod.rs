//! Actions the user can trigger from the menu.
//!
//! An [`Action`] is what a menu entry does when clicked. The menu-bar host
//! cannot call back into a running process, so every action is serialized
//! into the command-line flags of a fresh invocation of this program
//! ([`Action::to_params`]) and parsed back from them by the CLI.

mod dispatcher;

use std::fmt;

use clap::ValueEnum;

pub use self::dispatcher::Dispatcher;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum VmAction {
    Start,
    Stop,
    /// Prompt for a command and run it inside the instance.
    Lima,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ContainerAction {
    Start,
    Stop,
    Rm,
    Pause,
    Unpause,
    /// Offered by the menu for running containers but not accepted by
    /// `--container-action`.
    #[value(skip)]
    Kill,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ImageAction {
    Pull,
    Rm,
}

impl VmAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Lima => "lima",
        }
    }
}

impl ContainerAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Rm => "rm",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::Kill => "kill",
        }
    }
}

impl ImageAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pull => "pull",
            Self::Rm => "rm",
        }
    }
}

impl fmt::Display for VmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl fmt::Display for ContainerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl fmt::Display for ImageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Vm { vm: String, action: VmAction },
    Container { vm: String, target: String, action: ContainerAction },
    Image { vm: String, target: String, action: ImageAction },
    PullNewImage { vm: String },
}

impl Action {
    /// The flags that make a new invocation perform this action.
    pub fn to_params(&self) -> Vec<String> {
        let params: Vec<&str> = match self {
            Self::Vm { vm, action } => vec!["--vm-action", action.as_str(), "--vm", vm.as_str()],
            Self::Container { vm, target, action } => {
                vec![
                    "--container-action",
                    action.as_str(),
                    "--target",
                    target.as_str(),
                    "--vm",
                    vm.as_str(),
                ]
            }
            Self::Image { vm, target, action } => {
                vec![
                    "--image-action",
                    action.as_str(),
                    "--target",
                    target.as_str(),
                    "--vm",
                    vm.as_str(),
                ]
            }
            Self::PullNewImage { vm } => vec!["--pull-new-image", "--vm", vm.as_str()],
        };
        params.into_iter().map(ToString::to_string).collect()
    }
}
