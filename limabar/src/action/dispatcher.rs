use limabar_base::NOTIFICATION_TITLE;

use super::{Action, ContainerAction, ImageAction, VmAction};
use crate::{
    command::{self, CommandRunner, Error},
    config::ToolsConfig,
    desktop::Desktop,
    environment::EnvironmentPreparer,
};

/// Performs a single [`Action`], telling the user about it through desktop
/// notifications before and after the command runs.
///
/// Every call blocks until the command has finished; there is no timeout.
pub struct Dispatcher<'a, R, D> {
    runner: &'a R,
    desktop: &'a D,
    preparer: &'a EnvironmentPreparer,
    tools: &'a ToolsConfig,
}

impl<'a, R, D> Dispatcher<'a, R, D>
where
    R: CommandRunner,
    D: Desktop,
{
    pub const fn new(
        runner: &'a R,
        desktop: &'a D,
        preparer: &'a EnvironmentPreparer,
        tools: &'a ToolsConfig,
    ) -> Self {
        Self { runner, desktop, preparer, tools }
    }

    pub async fn dispatch(&self, action: &Action) -> Result<(), Error> {
        tracing::info!("Dispatching {action:?}");
        match action {
            Action::Vm { vm, action } => self.vm_action(vm, *action).await,
            Action::Container { vm, target, action } => {
                self.container_action(vm, target, *action).await
            }
            Action::Image { vm, target, action } => self.image_action(vm, target, *action).await,
            Action::PullNewImage { vm } => self.pull_new_image(vm).await,
        }
    }

    async fn vm_action(&self, vm: &str, action: VmAction) -> Result<(), Error> {
        match action {
            VmAction::Start => {
                let command = self.tools.limactl_command(["start", vm]);
                let (before, after) = (format!("Starting {vm}"), format!("{vm} started"));
                self.run_with_notifications(vm, &command, before, after).await
            }
            VmAction::Stop => {
                let command = self.tools.limactl_command(["stop", vm]);
                let (before, after) = (format!("Stopping {vm}"), format!("{vm} stopped"));
                self.run_with_notifications(vm, &command, before, after).await
            }
            VmAction::Lima => {
                let question = format!("Command to run in {vm}:");
                let Some(user_command) = self.desktop.prompt(NOTIFICATION_TITLE, &question).await?
                else {
                    tracing::warn!("No command given for {vm}, nothing to run");
                    return self.desktop.alert(NOTIFICATION_TITLE, "No command specified").await;
                };
                let command = self.tools.lima_command(["sh", "-c", user_command.as_str()]);
                self.run_with_notifications(
                    vm,
                    &command,
                    format!("Running `{user_command}` in {vm}"),
                    format!("Finished `{user_command}` in {vm}"),
                )
                .await
            }
        }
    }

    async fn container_action(
        &self,
        vm: &str,
        target: &str,
        action: ContainerAction,
    ) -> Result<(), Error> {
        let command = self.tools.container_runtime_command(["container", action.as_str(), target]);
        self.run_with_notifications(
            vm,
            &command,
            format!("Running container {action} {target} in {vm}"),
            format!("Finished container {action} {target} in {vm}"),
        )
        .await
    }

    async fn image_action(&self, vm: &str, target: &str, action: ImageAction) -> Result<(), Error> {
        let command = self.tools.container_runtime_command(["image", action.as_str(), target]);
        self.run_with_notifications(
            vm,
            &command,
            format!("Running image {action} {target} in {vm}"),
            format!("Finished image {action} {target} in {vm}"),
        )
        .await
    }

    async fn pull_new_image(&self, vm: &str) -> Result<(), Error> {
        let question = format!("Image to pull into {vm}:");
        let Some(image) = self.desktop.prompt(NOTIFICATION_TITLE, &question).await? else {
            tracing::warn!("No image given for {vm}, nothing to pull");
            return self.desktop.alert(NOTIFICATION_TITLE, "No image specified").await;
        };
        let command = self.tools.container_runtime_command(["image", "pull", image.as_str()]);
        self.run_with_notifications(
            vm,
            &command,
            format!("Pulling {image} into {vm}"),
            format!("Pulled {image} into {vm}"),
        )
        .await
    }

    async fn run_with_notifications(
        &self,
        vm: &str,
        command: &[String],
        before: String,
        after: String,
    ) -> Result<(), Error> {
        self.desktop.notify(NOTIFICATION_TITLE, &before).await?;
        let output = self.runner.run_command(command, &self.preparer.prepare(vm)).await?;
        tracing::info!(
            "`{}` finished, output: {}",
            command::display_command(command),
            output.trim()
        );
        self.desktop.notify(NOTIFICATION_TITLE, &after).await
    }
}
