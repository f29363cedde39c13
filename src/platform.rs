//! Host platform identification for artifact naming.

/// The host platform a graph is generated on.
///
/// Artifact naming is keyed by the generating host, not a cross-compilation
/// target. Native Windows and POSIX-emulation hosts (Cygwin, MSYS) are
/// indistinguishable for naming purposes and share the `Windows` variant;
/// anything outside the table falls back to `Unix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostPlatform {
    /// Windows-family hosts, native or POSIX-emulated.
    Windows,
    /// macOS hosts.
    MacOs,
    /// Every other host; carries the default naming row.
    Unix,
}

impl HostPlatform {
    /// Identify the platform this library was compiled for.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Unix
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HostPlatform;

    #[test]
    fn detect_matches_compile_target() {
        let platform = HostPlatform::detect();
        if cfg!(windows) {
            assert_eq!(platform, HostPlatform::Windows);
        } else if cfg!(target_os = "macos") {
            assert_eq!(platform, HostPlatform::MacOs);
        } else {
            assert_eq!(platform, HostPlatform::Unix);
        }
    }
}
