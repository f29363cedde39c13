//! Shared helpers for integration tests.
//!
//! Integration tests under `tests/` compile as independent crates. This
//! module is included via `mod common;` in individual test files to share a
//! scratch project fixture: a temporary working directory with a rule
//! catalog, plus an assembler writing into memory for easy assertions.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use kumiki::{AssemblerConfig, GraphAssembler, HostPlatform, NinjaWriter};
use std::fs;

/// A temporary project tree with a populated rule catalog.
pub struct Project {
    /// Keeps the temporary directory alive for the test's duration.
    pub _guard: tempfile::TempDir,
    /// UTF-8 path of the working directory.
    pub working_dir: Utf8PathBuf,
    /// Assembler configuration pinned to the default (Unix) naming row.
    pub config: AssemblerConfig,
}

/// Create a working directory holding a `rules/` catalog with one fragment.
pub fn scratch_project() -> Result<Project> {
    let guard = tempfile::tempdir().context("create temp working dir")?;
    let working_dir = Utf8PathBuf::try_from(guard.path().to_path_buf())
        .context("temp dir path is not UTF-8")?;
    let rules_dir = working_dir.join("rules");
    fs::create_dir(&rules_dir).context("create rules dir")?;
    fs::write(
        rules_dir.join("cc.ninja"),
        "rule cc\n  command = cc -c $in -o $out $flags\n",
    )
    .context("write rule fragment")?;
    let mut config = AssemblerConfig::host(working_dir.clone(), rules_dir);
    config.platform = HostPlatform::Unix;
    Ok(Project {
        _guard: guard,
        working_dir,
        config,
    })
}

/// Initialize an assembler over an in-memory writer for `project`.
pub fn assembler(project: &Project) -> Result<GraphAssembler<NinjaWriter<Vec<u8>>>> {
    GraphAssembler::with_writer(&project.config, NinjaWriter::new(Vec::new()))
        .context("initialize assembler")
}

/// Tear down `assembler` and return the graph text it emitted.
pub fn emitted(assembler: GraphAssembler<NinjaWriter<Vec<u8>>>) -> Result<String> {
    String::from_utf8(assembler.into_writer().into_inner()).context("graph output is not UTF-8")
}

/// Create `files` (relative to the working dir) as empty fixtures.
pub fn touch_sources(project: &Project, files: &[&str]) -> Result<()> {
    for file in files {
        let path = project.working_dir.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dirs for {path}"))?;
        }
        fs::write(&path, "").with_context(|| format!("write fixture {path}"))?;
    }
    Ok(())
}
