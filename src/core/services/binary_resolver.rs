use std::path::PathBuf;

use crate::core::traits::probe::ExecutableProbe;

/// Preferred tool name. Always wins when it is on the search path.
pub const PRIMARY_BINARY: &str = "gpg";

/// Alternate tool name used by some distributions.
pub const SECONDARY_BINARY: &str = "gpg2";

/// Absolute locations probed on macOS, in order: Homebrew on Apple
/// Silicon, Homebrew on Intel, then GPG Suite.
pub const MACOS_FALLBACK_PATHS: [&str; 3] = [
    "/opt/homebrew/bin/gpg",
    "/usr/local/bin/gpg",
    "/usr/local/MacGPG2/bin/gpg2",
];

/// Host platform family, as far as binary lookup is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Package managers install outside the default search path.
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }

    fn fallback_paths(self) -> &'static [&'static str] {
        match self {
            Self::MacOs => &MACOS_FALLBACK_PATHS,
            Self::Other => &[],
        }
    }
}

/// Locates the GnuPG executable.
///
/// Resolution never fails: when nothing is found it degrades to the bare
/// primary name and lets the eventual invocation report `ToolNotFound`.
pub struct BinaryResolver<P: ExecutableProbe> {
    probe: P,
    platform: Platform,
}

impl<P: ExecutableProbe> BinaryResolver<P> {
    pub fn new(probe: P, platform: Platform) -> Self {
        Self { probe, platform }
    }

    /// First match wins: primary on PATH, secondary on PATH, then the
    /// platform's fixed fallback paths, then the bare primary name.
    pub fn resolve(&self) -> PathBuf {
        for name in [PRIMARY_BINARY, SECONDARY_BINARY] {
            if let Some(found) = self.probe.find_in_path(name) {
                tracing::debug!(binary = %found.display(), "found gpg on PATH");
                return found;
            }
        }

        for candidate in self.platform.fallback_paths() {
            let path = PathBuf::from(candidate);
            if self.probe.is_executable(&path) {
                tracing::debug!(binary = %path.display(), "found gpg at fallback path");
                return path;
            }
        }

        tracing::debug!("no gpg binary found, falling back to '{PRIMARY_BINARY}'");
        PathBuf::from(PRIMARY_BINARY)
    }
}
