use std::path::{Path, PathBuf};

/// Port for inspecting the host's executables.
pub trait ExecutableProbe {
    /// Search the executable search path for `name`.
    fn find_in_path(&self, name: &str) -> Option<PathBuf>;

    /// Whether `path` exists and may be executed.
    fn is_executable(&self, path: &Path) -> bool;
}
