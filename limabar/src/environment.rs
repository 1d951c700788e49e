//! Environment handed to every external command.
//!
//! `limactl` and `lima` usually live in a Homebrew prefix that the menu-bar
//! host does not put on `PATH`, and `lima` picks its instance from
//! `LIMA_INSTANCE`. [`EnvironmentPreparer`] builds a fresh [`Environment`]
//! with both fixed up for each invocation; the process environment itself is
//! never touched.

use std::{
    collections::BTreeMap,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use limabar_base::consts::{DEFAULT_INSTANCE, INSTANCE_SELECTOR_VARIABLE, SEARCH_PATH_VARIABLE};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Environment {
    variables: BTreeMap<OsString, OsString>,
}

impl Environment {
    /// Snapshot of the current process environment.
    pub fn from_process() -> Self { std::env::vars_os().collect() }

    pub fn get<K: AsRef<OsStr>>(&self, key: K) -> Option<&OsStr> {
        self.variables.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let _previous = self.variables.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsString, &OsString)> { self.variables.iter() }

    /// Appends `dir` to the end of `PATH`, creating the variable if needed.
    fn append_search_path(&mut self, dir: &Path) {
        let value = match self.get(SEARCH_PATH_VARIABLE) {
            Some(current) if !current.is_empty() => {
                let mut value = current.to_os_string();
                value.push(":");
                value.push(dir);
                value
            }
            _ => dir.as_os_str().to_os_string(),
        };
        self.set(SEARCH_PATH_VARIABLE, value);
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { variables: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

#[derive(Clone, Debug)]
pub struct EnvironmentPreparer {
    base: Environment,
    candidates: Vec<PathBuf>,
}

impl EnvironmentPreparer {
    /// `candidates` are appended to `PATH` in order, each only if it is an
    /// existing directory at the time [`prepare`](Self::prepare) runs.
    pub const fn new(base: Environment, candidates: Vec<PathBuf>) -> Self {
        Self { base, candidates }
    }

    /// Candidates are the system directories followed by the home-relative
    /// ones under `home_dir`.
    pub fn with_search_paths(
        base: Environment,
        system_paths: &[PathBuf],
        home_dir: Option<&Path>,
    ) -> Self {
        let candidates = system_paths
            .iter()
            .cloned()
            .chain(home_dir.map(limabar_base::paths::home_search_paths).unwrap_or_default())
            .collect();
        Self::new(base, candidates)
    }

    /// Builds the environment for commands aimed at `instance`.
    pub fn prepare(&self, instance: &str) -> Environment {
        let mut env = self.base.clone();

        for dir in self.candidates.iter().filter(|dir| dir.is_dir()) {
            env.append_search_path(dir);
        }

        if instance != DEFAULT_INSTANCE {
            env.set(INSTANCE_SELECTOR_VARIABLE, instance);
        }

        tracing::debug!(
            "Prepared environment for {instance}, PATH={:?}",
            env.get(SEARCH_PATH_VARIABLE).unwrap_or_default()
        );
        env
    }
}
