//! Target kinds and descriptors for link edges.

use crate::naming;
use crate::platform::HostPlatform;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// The kind of linked artifact a target produces.
///
/// Each kind doubles as the identifier of the link rule the rule catalog
/// declares, so the set is closed: a build description naming any other kind
/// fails to parse before an edge can be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// A final executable; linked by the `exe` rule.
    Executable,
    /// A shared library loaded at run time; linked by the `dylib` rule.
    DynamicLibrary,
    /// A static archive linked into its consumers; built by the `lib` rule.
    StaticLibrary,
}

impl TargetKind {
    /// The rule identifier registered for this kind in the rule catalog.
    #[must_use]
    pub const fn rule_name(self) -> &'static str {
        match self {
            Self::Executable => "exe",
            Self::DynamicLibrary => "dylib",
            Self::StaticLibrary => "lib",
        }
    }

    /// Resolve the final artifact path for a target of this kind.
    #[must_use]
    pub fn artifact_path(
        self,
        build_root: &Utf8Path,
        platform: HostPlatform,
        name: &str,
    ) -> Utf8PathBuf {
        match self {
            Self::Executable => naming::exe_path(build_root, platform, name),
            Self::DynamicLibrary => naming::dylib_path(build_root, platform, name),
            Self::StaticLibrary => naming::lib_path(build_root, platform, name),
        }
    }
}

impl Display for TargetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule_name())
    }
}

/// Error returned when a textual kind tag is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown target kind {0:?}; expected one of exe, dylib, lib")]
pub struct UnknownTargetKind(pub String);

impl FromStr for TargetKind {
    type Err = UnknownTargetKind;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "exe" => Ok(Self::Executable),
            "dylib" => Ok(Self::DynamicLibrary),
            "lib" => Ok(Self::StaticLibrary),
            other => Err(UnknownTargetKind(other.to_owned())),
        }
    }
}

/// Handle to a registered link target.
///
/// Returned by [`crate::GraphAssembler::as_target`] and threaded by the
/// caller into later `depends_on` lists; the assembler itself keeps no
/// back-references, so multi-level link graphs are built purely by passing
/// descriptors forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// What the link edge produced.
    pub kind: TargetKind,
    /// Artifact path of the linked output.
    pub path: Utf8PathBuf,
    /// Logical name; used for `-l` flags when depended on as a dylib.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::{TargetKind, UnknownTargetKind};
    use rstest::rstest;

    #[rstest]
    #[case("exe", TargetKind::Executable)]
    #[case("dylib", TargetKind::DynamicLibrary)]
    #[case("lib", TargetKind::StaticLibrary)]
    fn parses_known_tags(#[case] tag: &str, #[case] kind: TargetKind) {
        assert_eq!(tag.parse::<TargetKind>(), Ok(kind));
        assert_eq!(kind.rule_name(), tag);
    }

    #[rstest]
    #[case("framework")]
    #[case("")]
    #[case("EXE")]
    fn rejects_unknown_tags(#[case] tag: &str) {
        assert_eq!(
            tag.parse::<TargetKind>(),
            Err(UnknownTargetKind(tag.to_owned()))
        );
    }
}
