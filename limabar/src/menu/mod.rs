//! Rendering the menu shown by the menu-bar host.
//!
//! [`MenuState::gather`] asks the inventory for everything the menu shows;
//! [`MenuRenderer::render`] turns that state into markup lines without doing
//! any I/O. Every entry that does something encodes a complete invocation of
//! this program, see [`MenuLine::action`].

mod line;

use limabar_base::{PROJECT_NAME_WITH_INITIAL_CAPITAL, PROJECT_VERSION};

pub use self::line::{MenuLine, SEPARATOR};
use crate::{
    action::{Action, ContainerAction, ImageAction, VmAction},
    command::{CommandRunner, Error},
    config::MenuConfig,
    inventory::{ContainerRecord, ContainerState, Containers, Images, Inventory, VmRecord},
};

/// A VM together with its containers and images. Both are empty for VMs
/// that are not running.
#[derive(Clone, Debug)]
pub struct VmState {
    pub record: VmRecord,
    pub containers: Containers,
    pub images: Images,
}

#[derive(Clone, Debug, Default)]
pub struct MenuState {
    pub lima_version: String,
    pub vms: Vec<VmState>,
}

impl MenuState {
    pub async fn gather<R: CommandRunner>(inventory: &Inventory<'_, R>) -> Result<Self, Error> {
        let lima_version = inventory.lima_version().await?;

        let mut vms = Vec::new();
        for (name, record) in inventory.list_vms().await? {
            let (containers, images) = if record.is_running() {
                (inventory.list_containers(&name).await?, inventory.list_images(&name).await?)
            } else {
                (Containers::new(), Images::new())
            };
            vms.push(VmState { record, containers, images });
        }

        Ok(Self { lima_version, vms })
    }

    /// Whether any VM reports exactly `Running`.
    pub fn any_running(&self) -> bool {
        self.vms.iter().any(|vm| vm.record.is_running())
    }
}

pub struct MenuRenderer<'a> {
    config: &'a MenuConfig,
    program: &'a str,
}

impl<'a> MenuRenderer<'a> {
    /// `program` is the path the menu-bar host runs when an entry is clicked.
    pub const fn new(config: &'a MenuConfig, program: &'a str) -> Self { Self { config, program } }

    pub fn render(&self, state: &MenuState) -> Vec<MenuLine> {
        let running = state.any_running();
        let icon = if running { &self.config.running_icon } else { &self.config.stopped_icon };

        let mut lines = vec![
            MenuLine::new(0, icon.as_str()).color(self.config.status_color(running)),
            MenuLine::new(0, SEPARATOR),
            MenuLine::new(0, "About"),
            MenuLine::new(1, format!("{PROJECT_NAME_WITH_INITIAL_CAPITAL} {PROJECT_VERSION}")),
            MenuLine::new(1, state.lima_version.as_str()),
            MenuLine::new(1, "Homepage").href(&self.config.homepage),
            MenuLine::new(1, "Rescan").refresh(),
            MenuLine::new(0, SEPARATOR),
        ];

        if state.vms.is_empty() {
            lines.push(MenuLine::new(0, "No VMs found"));
        }
        for vm in &state.vms {
            self.render_vm(&mut lines, vm);
        }
        lines
    }

    fn render_vm(&self, lines: &mut Vec<MenuLine>, state: &VmState) {
        let VmState { record, containers, images } = state;
        let vm = record.name.as_str();
        let running = record.is_running();
        lines.push(MenuLine::new(0, vm).color(self.config.status_color(running)));

        if !running {
            lines.push(self.vm_action_line("Start VM", vm, VmAction::Start));
            return;
        }
        lines.push(self.vm_action_line("Stop VM", vm, VmAction::Stop));
        lines.push(self.vm_action_line("Run command...", vm, VmAction::Lima));

        lines.push(MenuLine::new(1, "Containers"));
        if containers.is_empty() {
            lines.push(MenuLine::new(2, "No containers"));
        }
        for (name, container) in containers {
            self.render_container(lines, vm, name, container);
        }

        lines.push(MenuLine::new(1, "Images"));
        lines.push(
            MenuLine::new(2, "Pull new image")
                .action(self.program, &Action::PullNewImage { vm: vm.to_string() }),
        );
        for image in images.keys() {
            lines.push(MenuLine::new(2, image.as_str()));
            for action in [ImageAction::Pull, ImageAction::Rm] {
                let descriptor =
                    Action::Image { vm: vm.to_string(), target: image.clone(), action };
                lines.push(MenuLine::new(3, action.as_str()).action(self.program, &descriptor));
            }
        }
    }

    fn render_container(
        &self,
        lines: &mut Vec<MenuLine>,
        vm: &str,
        name: &str,
        container: &ContainerRecord,
    ) {
        lines.push(MenuLine::new(2, name).color(self.config.status_color(container.is_up())));

        let actions: &[ContainerAction] = match container.state() {
            ContainerState::Running => {
                &[ContainerAction::Stop, ContainerAction::Kill, ContainerAction::Pause]
            }
            ContainerState::Paused => &[ContainerAction::Unpause],
            ContainerState::Stopped => &[ContainerAction::Start, ContainerAction::Rm],
        };
        for &action in actions {
            let descriptor =
                Action::Container { vm: vm.to_string(), target: name.to_string(), action };
            lines.push(MenuLine::new(3, action.as_str()).action(self.program, &descriptor));
        }
    }

    fn vm_action_line(&self, title: &str, vm: &str, action: VmAction) -> MenuLine {
        MenuLine::new(1, title).action(self.program, &Action::Vm { vm: vm.to_string(), action })
    }
}

/// Joins rendered lines into the text written to standard output.
pub fn to_markup(lines: &[MenuLine]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        command::testing::ScriptedRunner, config::ToolsConfig,
        environment::{Environment, EnvironmentPreparer},
        inventory::ImageRecord,
    };

    const PROGRAM: &str = "/plugins/lima.sh";

    fn vm(name: &str, status: &str) -> VmState {
        VmState {
            record: VmRecord { name: name.to_string(), status: status.to_string() },
            containers: Containers::new(),
            images: Images::new(),
        }
    }

    fn container(value: serde_json::Value) -> ContainerRecord {
        serde_json::from_value(value).unwrap()
    }

    fn render(state: &MenuState) -> String {
        to_markup(&MenuRenderer::new(&MenuConfig::default(), PROGRAM).render(state))
    }

    #[test]
    fn test_icon_line_is_running_when_any_vm_runs() {
        let state = MenuState {
            lima_version: "Lima 1.0.3".to_string(),
            vms: vec![vm("a", "Stopped"), vm("b", "Running")],
        };

        let markup = render(&state);

        assert_eq!(markup.lines().next(), Some("\u{1f411} | color=green"));
    }

    #[test]
    fn test_icon_line_is_stopped_without_running_vm() {
        let state = MenuState {
            lima_version: "Lima 1.0.3".to_string(),
            vms: vec![vm("a", "Stopped"), vm("b", "running")],
        };

        assert_eq!(render(&state).lines().next(), Some("\u{1f4a4} | color=red"));
        assert_eq!(render(&MenuState::default()).lines().next(), Some("\u{1f4a4} | color=red"));
    }

    #[test]
    fn test_stopped_vm_block() {
        let state = MenuState {
            lima_version: "Lima 1.0.3".to_string(),
            vms: vec![vm("default", "Stopped")],
        };

        let expected = format!(
            "\u{1f4a4} | color=red\n---\nAbout\n--Limabar {PROJECT_VERSION}\n--Lima 1.0.3\n\
             --Homepage | href=https://github.com/lima-vm/lima\n--Rescan | refresh=true\n---\n\
             default | color=red\n\
             --Start VM | bash=/plugins/lima.sh param1=--vm-action param2=start param3=--vm \
             param4=default terminal=false refresh=true\n"
        );
        assert_eq!(render(&state), expected);
    }

    #[test]
    fn test_running_vm_block() {
        let containers = [(
            "abc".to_string(),
            container(json!({"Names": "", "ID": "abc", "Status": "Up"})),
        )]
        .into_iter()
        .collect();
        let images = [("nginx:latest".to_string(), ImageRecord {
            repository: Some("nginx".to_string()),
            tag: Some("latest".to_string()),
        })]
        .into_iter()
        .collect();
        let state = MenuState {
            lima_version: "Lima 1.0.3".to_string(),
            vms: vec![VmState { containers, images, ..vm("docker", "Running") }],
        };

        let markup = render(&state);
        let block = markup.split("---\n").last().unwrap();

        let expected = "docker | color=green\n\
             --Stop VM | bash=/plugins/lima.sh param1=--vm-action param2=stop param3=--vm \
             param4=docker terminal=false refresh=true\n\
             --Run command... | bash=/plugins/lima.sh param1=--vm-action param2=lima param3=--vm \
             param4=docker terminal=false refresh=true\n\
             --Containers\n\
             ----abc | color=green\n\
             ------stop | bash=/plugins/lima.sh param1=--container-action param2=stop \
             param3=--target param4=abc param5=--vm param6=docker terminal=false refresh=true\n\
             ------kill | bash=/plugins/lima.sh param1=--container-action param2=kill \
             param3=--target param4=abc param5=--vm param6=docker terminal=false refresh=true\n\
             ------pause | bash=/plugins/lima.sh param1=--container-action param2=pause \
             param3=--target param4=abc param5=--vm param6=docker terminal=false refresh=true\n\
             --Images\n\
             ----Pull new image | bash=/plugins/lima.sh param1=--pull-new-image param2=--vm \
             param3=docker terminal=false refresh=true\n\
             ----nginx:latest\n\
             ------pull | bash=/plugins/lima.sh param1=--image-action param2=pull \
             param3=--target param4=nginx:latest param5=--vm param6=docker terminal=false \
             refresh=true\n\
             ------rm | bash=/plugins/lima.sh param1=--image-action param2=rm \
             param3=--target param4=nginx:latest param5=--vm param6=docker terminal=false \
             refresh=true\n";
        assert_eq!(block, expected);
    }

    #[test]
    fn test_stopped_and_paused_container_actions() {
        let containers = [
            ("db".to_string(), container(json!({"Names": "db", "Status": "Paused"}))),
            ("web".to_string(), container(json!({"Names": "web", "Status": "Exited (0)"}))),
        ]
        .into_iter()
        .collect();
        let state = MenuState {
            lima_version: String::new(),
            vms: vec![VmState { containers, ..vm("default", "Running") }],
        };

        let titles = render(&state)
            .lines()
            .filter(|line| line.starts_with("----"))
            .map(|line| line.split(" | ").next().unwrap_or_default().to_string())
            .collect::<Vec<_>>();

        assert_eq!(titles, [
            "----db",
            "------unpause",
            "----web",
            "------start",
            "------rm",
            "----Pull new image"
        ]);
    }

    #[tokio::test]
    async fn test_gather_skips_stopped_vm_inventory() {
        let runner = ScriptedRunner::default()
            .with_output(&["limactl", "--version"], "limactl version 1.0.3\n")
            .with_output(
                &["limactl", "list", "--json"],
                concat!(
                    "{\"name\":\"default\",\"status\":\"Running\"}\n",
                    "{\"name\":\"docker\",\"status\":\"Stopped\"}\n",
                ),
            )
            .with_output(
                &["lima", "nerdctl", "container", "ls", "-a", "--format", "{{json .}}"],
                "{\"Names\":\"web\",\"ID\":\"1\",\"Status\":\"Up\"}\n",
            );
        let preparer = EnvironmentPreparer::new(Environment::default(), Vec::new());
        let tools = ToolsConfig::default();

        let state = MenuState::gather(&Inventory::new(&runner, &preparer, &tools)).await.unwrap();

        assert_eq!(state.lima_version, "Lima 1.0.3");
        assert!(state.any_running());
        assert_eq!(state.vms.len(), 2);
        assert_eq!(state.vms[0].containers.len(), 1);
        assert!(state.vms[1].containers.is_empty());
        assert_eq!(runner.calls().len(), 4);
    }
}
