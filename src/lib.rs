//! Kumiki core library.
//!
//! Kumiki assembles a Ninja build graph from a caller-driven description of a
//! project's source trees: discover sources by pattern, derive artifact paths
//! per platform, and wire compile and link edges into a single emitted graph
//! file. It only generates the graph; executing it belongs to Ninja.

pub mod assembler;
pub mod config;
pub mod discovery;
pub mod escape;
pub mod naming;
pub mod platform;
pub mod target;
pub mod writer;

pub use assembler::{AssemblerError, GraphAssembler};
pub use config::AssemblerConfig;
pub use discovery::DiscoveryError;
pub use escape::escape_path;
pub use platform::HostPlatform;
pub use target::{TargetDescriptor, TargetKind, UnknownTargetKind};
pub use writer::{GraphWriter, NinjaWriter};
