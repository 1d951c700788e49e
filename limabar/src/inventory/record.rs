use limabar_base::consts::{
    CONTAINER_STATUS_PAUSED_MARKER, CONTAINER_STATUS_UP_PREFIX, MISSING_FIELD_PLACEHOLDER,
    VM_STATUS_RUNNING,
};
use serde::Deserialize;

/// One line of `limactl list --json`. Fields other than these are ignored.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct VmRecord {
    pub name: String,
    pub status: String,
}

impl VmRecord {
    /// Only the exact status `Running` counts; every other status is treated
    /// as stopped.
    pub fn is_running(&self) -> bool { self.status == VM_STATUS_RUNNING }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContainerState {
    Running,
    Paused,
    Stopped,
}

/// One line of `nerdctl container ls -a --format '{{json .}}'`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ContainerRecord {
    #[serde(rename = "Names")]
    pub names: Option<String>,

    #[serde(rename = "ID")]
    pub id: Option<String>,

    #[serde(rename = "Status")]
    pub status: String,
}

impl ContainerRecord {
    /// The container name, or its ID for unnamed containers.
    pub fn key(&self) -> Option<&str> {
        self.names
            .as_deref()
            .filter(|names| !names.is_empty())
            .or_else(|| self.id.as_deref().filter(|id| !id.is_empty()))
    }

    pub fn is_up(&self) -> bool { self.status.starts_with(CONTAINER_STATUS_UP_PREFIX) }

    pub fn state(&self) -> ContainerState {
        if self.status.contains(CONTAINER_STATUS_PAUSED_MARKER) {
            ContainerState::Paused
        } else if self.is_up() {
            ContainerState::Running
        } else {
            ContainerState::Stopped
        }
    }
}

/// One line of `nerdctl image ls --format '{{json .}}'`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ImageRecord {
    #[serde(rename = "Repository")]
    pub repository: Option<String>,

    #[serde(rename = "Tag")]
    pub tag: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageIdentity {
    /// `repository:tag`
    pub key: String,

    /// Names of the fields that were absent and replaced by `ERROR`.
    pub missing: Vec<&'static str>,
}

impl ImageRecord {
    pub fn identity(&self) -> ImageIdentity {
        let mut missing = Vec::new();
        let repository = self.repository.as_deref().unwrap_or_else(|| {
            missing.push("Repository");
            MISSING_FIELD_PLACEHOLDER
        });
        let tag = self.tag.as_deref().unwrap_or_else(|| {
            missing.push("Tag");
            MISSING_FIELD_PLACEHOLDER
        });
        ImageIdentity { key: format!("{repository}:{tag}"), missing }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unnamed_container_is_keyed_by_id() {
        let record: ContainerRecord =
            serde_json::from_value(json!({"Names": "", "ID": "abc", "Status": "Up"})).unwrap();

        assert_eq!(record.key(), Some("abc"));
        assert!(record.is_up());
        assert_eq!(record.state(), ContainerState::Running);
    }

    #[test]
    fn test_named_container_prefers_name() {
        let record: ContainerRecord = serde_json::from_value(
            json!({"Names": "web", "ID": "abc", "Status": "Exited (0) 3 minutes ago"}),
        )
        .unwrap();

        assert_eq!(record.key(), Some("web"));
        assert_eq!(record.state(), ContainerState::Stopped);
    }

    #[test]
    fn test_container_without_identity_has_no_key() {
        let record: ContainerRecord =
            serde_json::from_value(json!({"Names": "", "Status": "Created"})).unwrap();

        assert_eq!(record.key(), None);
    }

    #[test]
    fn test_paused_container_state() {
        let record: ContainerRecord =
            serde_json::from_value(json!({"Names": "db", "Status": "Paused"})).unwrap();

        assert_eq!(record.state(), ContainerState::Paused);
        assert!(!record.is_up());
    }

    #[test]
    fn test_image_identity() {
        let complete: ImageRecord =
            serde_json::from_value(json!({"Repository": "nginx", "Tag": "latest"})).unwrap();
        let untagged: ImageRecord = serde_json::from_value(json!({"Tag": "latest"})).unwrap();

        assert_eq!(
            complete.identity(),
            ImageIdentity { key: "nginx:latest".to_string(), missing: Vec::new() }
        );
        assert_eq!(
            untagged.identity(),
            ImageIdentity { key: "ERROR:latest".to_string(), missing: vec!["Repository"] }
        );
    }

    #[test]
    fn test_vm_running_requires_exact_status() {
        let running = VmRecord { name: "default".to_string(), status: "Running".to_string() };
        let stopped = VmRecord { name: "default".to_string(), status: "Stopped".to_string() };
        let odd = VmRecord { name: "default".to_string(), status: "running".to_string() };

        assert!(running.is_running());
        assert!(!stopped.is_running());
        assert!(!odd.is_running());
    }
}
