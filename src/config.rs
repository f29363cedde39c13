//! Assembler configuration.
//!
//! Everything the assembler would otherwise pull from its process environment
//! is explicit here: the working directory source subtrees resolve against,
//! the host platform driving artifact naming, the rule-catalog directory, and
//! where the graph file lands. Generation is therefore a pure function of the
//! configuration and the filesystem, and tests can simulate any host.

use crate::platform::HostPlatform;
use camino::Utf8PathBuf;
use std::io;

/// Name of the emitted graph file under the working directory.
pub const GRAPH_FILE_NAME: &str = "build.ninja";

/// Directory created under the working directory for build outputs.
const BUILD_DIR_NAME: &str = "build";

/// Explicit inputs for one generation pass.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Directory source subtrees are resolved against.
    pub working_dir: Utf8PathBuf,
    /// Host platform driving final-artifact naming.
    pub platform: HostPlatform,
    /// Directory of rule fragments included verbatim into the graph.
    pub rules_dir: Utf8PathBuf,
    /// Override for the graph file location; defaults to
    /// [`GRAPH_FILE_NAME`] under `working_dir`.
    pub graph_path: Option<Utf8PathBuf>,
}

impl AssemblerConfig {
    /// Configuration for the detected host platform.
    #[must_use]
    pub fn host(working_dir: impl Into<Utf8PathBuf>, rules_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            platform: HostPlatform::detect(),
            rules_dir: rules_dir.into(),
            graph_path: None,
        }
    }

    /// Where the graph file is written.
    #[must_use]
    pub fn graph_path(&self) -> Utf8PathBuf {
        self.graph_path
            .clone()
            .unwrap_or_else(|| self.working_dir.join(GRAPH_FILE_NAME))
    }

    /// The build-output root under the working directory.
    #[must_use]
    pub fn build_root(&self) -> Utf8PathBuf {
        self.working_dir.join(BUILD_DIR_NAME)
    }
}

/// Locate the `rules` catalog installed beside the running binary.
///
/// Installations ship rule fragments as a sibling directory of the
/// executable; callers that keep the catalog elsewhere set
/// [`AssemblerConfig::rules_dir`] directly instead.
///
/// # Errors
///
/// Returns an error when the executable path cannot be resolved or is not
/// valid UTF-8.
pub fn rules_dir_beside_exe() -> io::Result<Utf8PathBuf> {
    let exe = std::env::current_exe()?;
    let exe_path = Utf8PathBuf::try_from(exe)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(exe_path
        .parent()
        .map_or_else(|| Utf8PathBuf::from("rules"), |dir| dir.join("rules")))
}

#[cfg(test)]
mod tests {
    use super::{AssemblerConfig, GRAPH_FILE_NAME, rules_dir_beside_exe};
    use camino::Utf8Path;

    #[test]
    fn graph_path_defaults_under_working_dir() {
        let config = AssemblerConfig::host("/work", "/opt/kumiki/rules");
        assert_eq!(
            config.graph_path(),
            Utf8Path::new("/work").join(GRAPH_FILE_NAME)
        );
        assert_eq!(config.build_root(), Utf8Path::new("/work/build"));
    }

    #[test]
    fn graph_path_override_wins() {
        let mut config = AssemblerConfig::host("/work", "/opt/kumiki/rules");
        config.graph_path = Some("/elsewhere/graph.ninja".into());
        assert_eq!(config.graph_path(), Utf8Path::new("/elsewhere/graph.ninja"));
    }

    #[test]
    fn sibling_rules_dir_ends_with_rules() {
        let rules = rules_dir_beside_exe().expect("resolve rules dir");
        assert_eq!(rules.file_name(), Some("rules"));
    }
}
