//! Platform-dependent artifact naming.
//!
//! Pure functions from `(build_root, platform, name)` to output paths. The
//! assembler's naming helpers delegate here; keying by an explicit
//! [`HostPlatform`] keeps naming deterministic under test on any host.
//!
//! Layout under the build root is fixed: `obj/` for intermediate objects,
//! `bin/` for linked artifacts, and `bin/shaders/` for compiled shaders.

use crate::platform::HostPlatform;
use camino::{Utf8Path, Utf8PathBuf};

/// The directory linked artifacts land in.
#[must_use]
pub fn bin_dir(build_root: &Utf8Path) -> Utf8PathBuf {
    build_root.join("bin")
}

/// Name a final executable for `platform`.
#[must_use]
pub fn exe_path(build_root: &Utf8Path, platform: HostPlatform, name: &str) -> Utf8PathBuf {
    let file = match platform {
        HostPlatform::Windows => format!("{name}.exe"),
        HostPlatform::MacOs | HostPlatform::Unix => name.to_owned(),
    };
    bin_dir(build_root).join(file)
}

/// Name a dynamic library for `platform`.
#[must_use]
pub fn dylib_path(build_root: &Utf8Path, platform: HostPlatform, name: &str) -> Utf8PathBuf {
    let file = match platform {
        HostPlatform::Windows => format!("{name}.dll"),
        HostPlatform::MacOs => format!("{name}.dylib"),
        HostPlatform::Unix => format!("{name}.so"),
    };
    bin_dir(build_root).join(file)
}

/// Name a static library for `platform`.
#[must_use]
pub fn lib_path(build_root: &Utf8Path, platform: HostPlatform, name: &str) -> Utf8PathBuf {
    let file = match platform {
        HostPlatform::Windows => format!("{name}.lib"),
        HostPlatform::MacOs | HostPlatform::Unix => format!("{name}.a"),
    };
    bin_dir(build_root).join(file)
}

/// Name an intermediate object file. Objects always take a `.o` suffix,
/// whatever the source extension compiled into them.
#[must_use]
pub fn obj_path(build_root: &Utf8Path, stem: &str) -> Utf8PathBuf {
    build_root.join("obj").join(format!("{stem}.o"))
}

/// Name a compiled fragment shader.
#[must_use]
pub fn frag_shader_path(build_root: &Utf8Path, stem: &str) -> Utf8PathBuf {
    bin_dir(build_root).join("shaders").join(format!("{stem}.frag.spv"))
}

/// Name a compiled vertex shader.
#[must_use]
pub fn vert_shader_path(build_root: &Utf8Path, stem: &str) -> Utf8PathBuf {
    bin_dir(build_root).join("shaders").join(format!("{stem}.vert.spv"))
}
