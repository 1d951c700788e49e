use std::path::{Path, PathBuf};

use crate::consts::HOME_SEARCH_PATHS;

/// Returns the home-relative directories that are candidates for the search
/// path, in the order they should be appended.
#[must_use]
pub fn home_search_paths<P: AsRef<Path>>(home_dir: P) -> Vec<PathBuf> {
    HOME_SEARCH_PATHS.iter().map(|dir| home_dir.as_ref().join(dir)).collect()
}

/// The current user's home directory, if one can be determined.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_search_paths_keep_order() {
        let home = tempfile::tempdir().unwrap();
        let paths = home_search_paths(home.path());

        assert_eq!(paths, vec![home.path().join("bin"), home.path().join(".local/bin")]);
    }
}
