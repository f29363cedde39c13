//! Tests for the platform artifact-naming table.
//!
//! Naming is a pure function of an explicit [`HostPlatform`], so every row
//! of the table is checked here without touching the process environment.

use camino::Utf8Path;
use kumiki::HostPlatform;
use kumiki::naming::{dylib_path, exe_path, frag_shader_path, lib_path, obj_path, vert_shader_path};
use rstest::rstest;

const ROOT: &str = "/work/build";

#[rstest]
#[case(HostPlatform::Unix, "/work/build/bin/app")]
#[case(HostPlatform::Windows, "/work/build/bin/app.exe")]
#[case(HostPlatform::MacOs, "/work/build/bin/app")]
fn executable_naming(#[case] platform: HostPlatform, #[case] expected: &str) {
    assert_eq!(exe_path(Utf8Path::new(ROOT), platform, "app"), expected);
}

#[rstest]
#[case(HostPlatform::Unix, "/work/build/bin/app.so")]
#[case(HostPlatform::Windows, "/work/build/bin/app.dll")]
#[case(HostPlatform::MacOs, "/work/build/bin/app.dylib")]
fn dynamic_library_naming(#[case] platform: HostPlatform, #[case] expected: &str) {
    assert_eq!(dylib_path(Utf8Path::new(ROOT), platform, "app"), expected);
}

#[rstest]
#[case(HostPlatform::Unix, "/work/build/bin/app.a")]
#[case(HostPlatform::Windows, "/work/build/bin/app.lib")]
#[case(HostPlatform::MacOs, "/work/build/bin/app.a")]
fn static_library_naming(#[case] platform: HostPlatform, #[case] expected: &str) {
    assert_eq!(lib_path(Utf8Path::new(ROOT), platform, "app"), expected);
}

#[rstest]
fn intermediate_artifact_naming_is_platform_independent() {
    let root = Utf8Path::new(ROOT);
    assert_eq!(obj_path(root, "main"), "/work/build/obj/main.o");
    assert_eq!(
        frag_shader_path(root, "ui"),
        "/work/build/bin/shaders/ui.frag.spv"
    );
    assert_eq!(
        vert_shader_path(root, "ui"),
        "/work/build/bin/shaders/ui.vert.spv"
    );
}
