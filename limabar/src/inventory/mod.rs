//! Read-only queries against Lima and the container runtime inside each
//! instance.
//!
//! Every query runs a fresh command; nothing is cached between calls. Records
//! that cannot be understood are logged and dropped so that one odd line never
//! empties a whole submenu. When two records derive the same key the later
//! one wins.

mod record;

use std::collections::BTreeMap;

use limabar_base::consts::DEFAULT_INSTANCE;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use self::record::{ContainerRecord, ContainerState, ImageRecord, VmRecord};
use crate::{
    command::{CommandRunner, Error},
    config::ToolsConfig,
    environment::EnvironmentPreparer,
};

pub type Vms = BTreeMap<String, VmRecord>;
pub type Containers = BTreeMap<String, ContainerRecord>;
pub type Images = BTreeMap<String, ImageRecord>;

pub struct Inventory<'a, R> {
    runner: &'a R,
    preparer: &'a EnvironmentPreparer,
    tools: &'a ToolsConfig,
}

impl<'a, R> Inventory<'a, R>
where
    R: CommandRunner,
{
    pub const fn new(
        runner: &'a R,
        preparer: &'a EnvironmentPreparer,
        tools: &'a ToolsConfig,
    ) -> Self {
        Self { runner, preparer, tools }
    }

    /// All instances known to `limactl`, keyed by name.
    pub async fn list_vms(&self) -> Result<Vms, Error> {
        let command = self.tools.limactl_command(["list", "--json"]);
        let values =
            self.runner.json_command(&command, &self.preparer.prepare(DEFAULT_INSTANCE)).await?;

        let vms = decode_records::<VmRecord>(values, "VM")
            .map(|vm| (vm.name.clone(), vm))
            .collect::<Vms>();
        tracing::debug!("Found {} VM(s)", vms.len());
        Ok(vms)
    }

    /// Every container in `vm`, stopped ones included, keyed by name or ID.
    pub async fn list_containers(&self, vm: &str) -> Result<Containers, Error> {
        let command = self.tools.container_runtime_command([
            "container",
            "ls",
            "-a",
            "--format",
            "{{json .}}",
        ]);
        let values = self.runner.json_command(&command, &self.preparer.prepare(vm)).await?;

        let mut containers = Containers::new();
        for container in decode_records::<ContainerRecord>(values, "container") {
            let Some(key) = container.key().map(ToString::to_string) else {
                tracing::warn!("Dropping container without name or ID in {vm}: {container:?}");
                continue;
            };
            let _previous = containers.insert(key, container);
        }
        Ok(containers)
    }

    /// Every image in `vm`, keyed by `repository:tag`.
    pub async fn list_images(&self, vm: &str) -> Result<Images, Error> {
        let command =
            self.tools.container_runtime_command(["image", "ls", "--format", "{{json .}}"]);
        let values = self.runner.json_command(&command, &self.preparer.prepare(vm)).await?;

        let mut images = Images::new();
        for image in decode_records::<ImageRecord>(values, "image") {
            let identity = image.identity();
            for field in &identity.missing {
                tracing::warn!("Image in {vm} has no {field}, listing it as {}", identity.key);
            }
            let _previous = images.insert(identity.key, image);
        }
        Ok(images)
    }

    /// Human readable version of the installed Lima, e.g. `Lima 1.0.3`.
    pub async fn lima_version(&self) -> Result<String, Error> {
        let command = self.tools.limactl_command(["--version"]);
        let output =
            self.runner.run_command(&command, &self.preparer.prepare(DEFAULT_INSTANCE)).await?;
        Ok(format_lima_version(&output))
    }
}

/// `limactl --version` prints `limactl version 1.0.3`.
fn format_lima_version(output: &str) -> String {
    let output = output.trim();
    let Some(token) = output.split_whitespace().next_back() else {
        return "Lima version unknown".to_string();
    };
    match semver::Version::parse(token.trim_start_matches('v')) {
        Ok(version) => format!("Lima {version}"),
        Err(err) => {
            tracing::debug!("Could not parse Lima version from `{output}`, error: {err}");
            output.to_string()
        }
    }
}

fn decode_records<T>(values: Vec<Value>, kind: &'static str) -> impl Iterator<Item = T>
where
    T: DeserializeOwned,
{
    values.into_iter().filter_map(move |value| match serde_json::from_value::<T>(value.clone()) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::warn!("Dropping malformed {kind} record {value}, error: {err}");
            None
        }
    })
}
