//! Build-graph assembly.
//!
//! [`GraphAssembler`] owns the output graph, the build-output root, and the
//! include pass over the rule catalog. Callers drive it: discover sources,
//! register compile edges, then register link edges, threading the returned
//! [`TargetDescriptor`]s into later `depends_on` lists to express transitive
//! library dependencies.

use crate::config::AssemblerConfig;
use crate::discovery::{self, DiscoveryError, SourcePair};
use crate::naming;
use crate::platform::HostPlatform;
use crate::target::{TargetDescriptor, TargetKind};
use crate::writer::{GraphWriter, NinjaWriter};
use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use std::fs::{self, File};
use std::io;
use std::slice;
use thiserror::Error;
use tracing::{debug, info};

/// Rule identifier for compile edges. The rule catalog must declare it.
const COMPILE_RULE: &str = "cc";

/// Rule identifier for shader-compile edges.
const SHADER_RULE: &str = "shader";

/// Suffix matched when including rule fragments from the catalog.
const RULE_FRAGMENT_GLOB: &str = "**/*.ninja";

/// Failures while assembling the build graph.
///
/// Precondition failures (build root, rules directory) are fatal to the run;
/// there is no partial-graph recovery. [`ExecutableDependency`] flags a
/// defective build description and is raised before the offending edge is
/// registered.
///
/// [`ExecutableDependency`]: AssemblerError::ExecutableDependency
#[derive(Debug, Error)]
pub enum AssemblerError {
    /// The graph output file could not be created.
    #[error("cannot create graph file {path}")]
    CreateGraphFile {
        /// Intended graph file location.
        path: Utf8PathBuf,
        /// Underlying filesystem failure.
        #[source]
        source: io::Error,
    },
    /// The build-output root could not be created.
    #[error("cannot create build directory {path}")]
    CreateBuildRoot {
        /// Intended build root.
        path: Utf8PathBuf,
        /// Underlying filesystem failure.
        #[source]
        source: io::Error,
    },
    /// Something that is not a directory occupies the build-root path.
    #[error("build path {0} exists but is not a directory")]
    BuildRootNotDir(Utf8PathBuf),
    /// The rule catalog directory is absent.
    #[error("rules directory {0} is missing")]
    RulesDirMissing(Utf8PathBuf),
    /// Writing a declaration into the graph failed.
    #[error("write to graph file failed")]
    Write(#[from] io::Error),
    /// A discovery pass failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    /// An executable was passed as a link dependency.
    #[error("target {name:?} cannot depend on executable {dependency:?}")]
    ExecutableDependency {
        /// Target being linked.
        name: String,
        /// Offending dependency's logical name.
        dependency: String,
    },
}

/// Assembles compile and link edges into a single emitted build graph.
///
/// Generic over the writer so tests can capture the graph in memory;
/// production use goes through [`GraphAssembler::open`], which writes
/// `build.ninja` under the configured working directory. The writer (and any
/// file handle it owns) is released exactly once, when the assembler drops or
/// [`into_writer`] hands it back.
///
/// [`into_writer`]: GraphAssembler::into_writer
#[derive(Debug)]
pub struct GraphAssembler<W> {
    writer: W,
    working_dir: Utf8PathBuf,
    build_root: Utf8PathBuf,
    platform: HostPlatform,
}

impl GraphAssembler<NinjaWriter<File>> {
    /// Open the graph file and initialize the assembler.
    ///
    /// The file is created before the build root is checked, so it is closed
    /// on every failure path, including a failed initialization.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblerError::CreateGraphFile`] when the graph file cannot
    /// be created, plus every failure mode of
    /// [`GraphAssembler::with_writer`].
    pub fn open(config: &AssemblerConfig) -> Result<Self, AssemblerError> {
        let path = config.graph_path();
        let file = File::create(&path)
            .map_err(|source| AssemblerError::CreateGraphFile { path, source })?;
        Self::with_writer(config, NinjaWriter::new(file))
    }
}

impl<W: GraphWriter> GraphAssembler<W> {
    /// Initialize over an existing writer: create the build root, emit the
    /// generated-file header, and include every rule fragment the catalog
    /// holds.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblerError::CreateBuildRoot`] or
    /// [`AssemblerError::BuildRootNotDir`] when the build root cannot be
    /// established, [`AssemblerError::RulesDirMissing`] when the catalog is
    /// absent, and write errors from the header and include pass.
    pub fn with_writer(config: &AssemblerConfig, writer: W) -> Result<Self, AssemblerError> {
        let build_root = config.build_root();
        init_build_root(&build_root)?;
        let mut assembler = Self {
            writer,
            working_dir: config.working_dir.clone(),
            build_root,
            platform: config.platform,
        };
        assembler.write_header()?;
        assembler.include_rules(&config.rules_dir)?;
        Ok(assembler)
    }

    /// The configured build-output root.
    #[must_use]
    pub fn build_root(&self) -> &Utf8Path {
        &self.build_root
    }

    /// Consume the assembler, handing back the writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_header(&mut self) -> Result<(), AssemblerError> {
        self.writer.comment("** AUTOGENERATED **")?;
        self.writer.newline()?;
        Ok(())
    }

    /// Include every `*.ninja` fragment under `rules_dir`, recursively, in
    /// filesystem iteration order.
    fn include_rules(&mut self, rules_dir: &Utf8Path) -> Result<(), AssemblerError> {
        if !rules_dir.is_dir() {
            return Err(AssemblerError::RulesDirMissing(rules_dir.to_owned()));
        }
        let fragments = discovery::matching_files(&rules_dir.join(RULE_FRAGMENT_GLOB))?;
        for fragment in &fragments {
            debug!(fragment = %fragment, "including rule fragment");
            self.writer.include(fragment)?;
        }
        info!(count = fragments.len(), rules_dir = %rules_dir, "included rule catalog");
        Ok(())
    }

    /// Discover sources under `subtree` and pair each with the output path
    /// `namer` derives from its base name (extension stripped).
    ///
    /// Re-invoke to re-scan; nothing is retained between passes.
    ///
    /// # Errors
    ///
    /// Propagates [`DiscoveryError`] from the underlying glob pass.
    pub fn glob_sources<F>(
        &self,
        subtree: &str,
        ext: &str,
        recurse: bool,
        namer: F,
    ) -> Result<Vec<SourcePair>, AssemblerError>
    where
        F: Fn(&str) -> Utf8PathBuf,
    {
        Ok(discovery::glob_sources(
            &self.working_dir,
            subtree,
            ext,
            recurse,
            namer,
        )?)
    }

    /// Register one `cc` compile edge per source with extension `ext` under
    /// `subtree`, each producing `obj/<stem>.o` under the build root.
    ///
    /// Returns the object paths in discovery order so the caller can
    /// aggregate them into a link step. `flags` is attached as the edge
    /// variable `flags` only when at least one flag is non-empty, keeping
    /// the emitted graph minimal. No matching sources is not an error.
    ///
    /// # Errors
    ///
    /// Propagates discovery and graph-write failures.
    pub fn make_objs(
        &mut self,
        subtree: &str,
        ext: &str,
        recurse: bool,
        flags: &[String],
    ) -> Result<Vec<Utf8PathBuf>, AssemblerError> {
        let root = self.build_root.clone();
        let sources = self.glob_sources(subtree, ext, recurse, |stem| naming::obj_path(&root, stem))?;
        let variables = flag_variables(flags);
        let mut objs = Vec::with_capacity(sources.len());
        for (source, obj) in sources {
            debug!(source = %source, object = %obj, "registering compile edge");
            self.writer
                .build(&obj, COMPILE_RULE, slice::from_ref(&source), &[], &variables)?;
            objs.push(obj);
        }
        Ok(objs)
    }

    /// Register `shader` edges for every `.frag` and `.vert` source under
    /// `subtree`, producing SPIR-V artifacts under `bin/shaders/`.
    ///
    /// Two independent discovery passes run over the same subtree; the
    /// returned artifact list holds fragment shaders first, then vertex
    /// shaders, each group in discovery order.
    ///
    /// # Errors
    ///
    /// Propagates discovery and graph-write failures.
    pub fn make_shaders(
        &mut self,
        subtree: &str,
        recurse: bool,
    ) -> Result<Vec<Utf8PathBuf>, AssemblerError> {
        let root = self.build_root.clone();
        let frag =
            self.glob_sources(subtree, "frag", recurse, |stem| naming::frag_shader_path(&root, stem))?;
        let vert =
            self.glob_sources(subtree, "vert", recurse, |stem| naming::vert_shader_path(&root, stem))?;
        let mut shaders = Vec::with_capacity(frag.len() + vert.len());
        for (source, artifact) in frag.into_iter().chain(vert) {
            self.writer
                .build(&artifact, SHADER_RULE, slice::from_ref(&source), &[], &[])?;
            shaders.push(artifact);
        }
        Ok(shaders)
    }

    /// Register the link edge for `name` and return its descriptor.
    ///
    /// Static-library dependencies join the direct inputs, so the link step
    /// sees their archives positionally. Dynamic-library dependencies become
    /// implicit inputs (ordering the build without reaching the command
    /// line) and contribute one `-l<name>` flag each plus a single `-L` flag
    /// for the shared binary directory, appended after any caller-supplied
    /// flags. The returned descriptor feeds `depends_on` of later calls, so
    /// link graphs can stack: static lib into dynamic lib into executable.
    ///
    /// An empty `objs` list is accepted; Ninja tolerates input-less edges.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblerError::ExecutableDependency`] when an executable
    /// appears in `depends_on`, before any edge is registered. Otherwise
    /// failures are graph-write errors.
    pub fn as_target(
        &mut self,
        kind: TargetKind,
        name: &str,
        objs: Vec<Utf8PathBuf>,
        depends_on: &[TargetDescriptor],
        flags: &[String],
    ) -> Result<TargetDescriptor, AssemblerError> {
        let target = kind.artifact_path(&self.build_root, self.platform, name);
        let mut inputs = objs;
        let mut implicits = Vec::new();
        let mut dylibs = Vec::new();

        for dependency in depends_on {
            match dependency.kind {
                TargetKind::StaticLibrary => inputs.push(dependency.path.clone()),
                TargetKind::DynamicLibrary => {
                    implicits.push(dependency.path.clone());
                    dylibs.push(dependency.name.clone());
                }
                TargetKind::Executable => {
                    return Err(AssemblerError::ExecutableDependency {
                        name: name.to_owned(),
                        dependency: dependency.name.clone(),
                    });
                }
            }
        }

        let mut link_flags = flags.to_vec();
        if !dylibs.is_empty() {
            link_flags.extend(dylibs.iter().map(|dylib| format!("-l{dylib}")));
            link_flags.push(format!("-L{}", naming::bin_dir(&self.build_root)));
        }
        let variables = flag_variables(&link_flags);

        self.writer
            .build(&target, kind.rule_name(), &inputs, &implicits, &variables)?;
        info!(target = %target, rule = kind.rule_name(), "registered link edge");

        Ok(TargetDescriptor {
            kind,
            path: target,
            name: name.to_owned(),
        })
    }

    /// Name a final executable for the configured platform.
    #[must_use]
    pub fn make_exe_name(&self, name: &str) -> Utf8PathBuf {
        naming::exe_path(&self.build_root, self.platform, name)
    }

    /// Name a dynamic library for the configured platform.
    #[must_use]
    pub fn make_dylib_name(&self, name: &str) -> Utf8PathBuf {
        naming::dylib_path(&self.build_root, self.platform, name)
    }

    /// Name a static library for the configured platform.
    #[must_use]
    pub fn make_lib_name(&self, name: &str) -> Utf8PathBuf {
        naming::lib_path(&self.build_root, self.platform, name)
    }

    /// Name an intermediate object file under the build root.
    #[must_use]
    pub fn make_obj_name(&self, stem: &str) -> Utf8PathBuf {
        naming::obj_path(&self.build_root, stem)
    }

    /// Name a compiled fragment shader under the build root.
    #[must_use]
    pub fn make_frag_shader_name(&self, stem: &str) -> Utf8PathBuf {
        naming::frag_shader_path(&self.build_root, stem)
    }

    /// Name a compiled vertex shader under the build root.
    #[must_use]
    pub fn make_vert_shader_name(&self, stem: &str) -> Utf8PathBuf {
        naming::vert_shader_path(&self.build_root, stem)
    }
}

/// Create the build root when absent and require it to be a directory.
fn init_build_root(build_root: &Utf8Path) -> Result<(), AssemblerError> {
    if !build_root.exists() {
        fs::create_dir_all(build_root).map_err(|source| AssemblerError::CreateBuildRoot {
            path: build_root.to_owned(),
            source,
        })?;
    }
    if build_root.is_dir() {
        Ok(())
    } else {
        Err(AssemblerError::BuildRootNotDir(build_root.to_owned()))
    }
}

/// Build the edge-variable list for a flag set.
///
/// Mirrors the minimal-emission policy: a list holding only empty strings
/// counts as absent, and empty entries never reach the emitted value.
fn flag_variables(flags: &[String]) -> Vec<(String, String)> {
    if flags.iter().any(|flag| !flag.is_empty()) {
        let joined = flags.iter().filter(|flag| !flag.is_empty()).join(" ");
        vec![("flags".to_owned(), joined)]
    } else {
        Vec::new()
    }
}
