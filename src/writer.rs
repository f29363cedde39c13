//! Graph-file writers.
//!
//! The assembler is generic over [`GraphWriter`] so tests can assemble into
//! memory; [`NinjaWriter`] is the shipped implementation emitting Ninja
//! syntax. Every path interpolated into the output is escaped with
//! [`escape_path`] so spaces and colons do not corrupt the graph.

use crate::escape::escape_path;
use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use std::io::{self, Write};

/// Sink for graph declarations: comments, include directives, and build
/// edges. Rule declarations themselves arrive through included catalog
/// fragments, so the writer never emits `rule` blocks of its own.
pub trait GraphWriter {
    /// Emit a `# comment` line.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sink.
    fn comment(&mut self, text: &str) -> io::Result<()>;

    /// Emit a blank line.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sink.
    fn newline(&mut self) -> io::Result<()>;

    /// Emit an `include` directive referencing a rule fragment.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sink.
    fn include(&mut self, path: &Utf8Path) -> io::Result<()>;

    /// Emit one build edge: `inputs` feed `rule` to produce `output`, with
    /// `implicit` entries ordering the edge without reaching the command
    /// line, and `variables` scoped to this edge only.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sink.
    fn build(
        &mut self,
        output: &Utf8Path,
        rule: &str,
        inputs: &[Utf8PathBuf],
        implicit: &[Utf8PathBuf],
        variables: &[(String, String)],
    ) -> io::Result<()>;
}

/// [`GraphWriter`] streaming Ninja syntax into any [`io::Write`].
///
/// The writer owns its sink; dropping the writer releases the sink exactly
/// once, so a file-backed graph is closed on every exit path.
#[derive(Debug)]
pub struct NinjaWriter<W: Write> {
    out: W,
}

impl<W: Write> NinjaWriter<W> {
    /// Wrap a sink in a Ninja syntax writer.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the writer, handing back the underlying sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> GraphWriter for NinjaWriter<W> {
    fn comment(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "# {text}")
    }

    fn newline(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    fn include(&mut self, path: &Utf8Path) -> io::Result<()> {
        writeln!(self.out, "include {}", escape_path(path.as_str()))
    }

    fn build(
        &mut self,
        output: &Utf8Path,
        rule: &str,
        inputs: &[Utf8PathBuf],
        implicit: &[Utf8PathBuf],
        variables: &[(String, String)],
    ) -> io::Result<()> {
        write!(self.out, "build {}: {rule}", escape_path(output.as_str()))?;
        if !inputs.is_empty() {
            write!(self.out, " {}", join(inputs))?;
        }
        if !implicit.is_empty() {
            write!(self.out, " | {}", join(implicit))?;
        }
        writeln!(self.out)?;
        for (key, value) in variables {
            writeln!(self.out, "  {key} = {value}")?;
        }
        Ok(())
    }
}

/// Join paths with single spaces, escaping each for Ninja syntax.
fn join(paths: &[Utf8PathBuf]) -> String {
    paths.iter().map(|p| escape_path(p.as_str())).join(" ")
}

#[cfg(test)]
mod tests {
    use super::{GraphWriter, NinjaWriter};
    use camino::{Utf8Path, Utf8PathBuf};

    fn drain(writer: NinjaWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner()).expect("writer output is UTF-8")
    }

    #[test]
    fn include_escapes_path() {
        let mut writer = NinjaWriter::new(Vec::new());
        writer
            .include(Utf8Path::new("rules/my rules.ninja"))
            .expect("write include");
        assert_eq!(drain(writer), "include rules/my$ rules.ninja\n");
    }

    #[test]
    fn build_edge_with_implicit_and_variables() {
        let mut writer = NinjaWriter::new(Vec::new());
        writer
            .build(
                Utf8Path::new("build/bin/app"),
                "exe",
                &[Utf8PathBuf::from("build/obj/main.o")],
                &[Utf8PathBuf::from("build/bin/core.so")],
                &[("flags".to_owned(), "-lcore -L./build/bin".to_owned())],
            )
            .expect("write edge");
        let expected = concat!(
            "build build/bin/app: exe build/obj/main.o | build/bin/core.so\n",
            "  flags = -lcore -L./build/bin\n",
        );
        assert_eq!(drain(writer), expected);
    }

    #[test]
    fn build_edge_without_inputs_stays_minimal() {
        let mut writer = NinjaWriter::new(Vec::new());
        writer
            .build(Utf8Path::new("out"), "touch", &[], &[], &[])
            .expect("write edge");
        assert_eq!(drain(writer), "build out: touch\n");
    }
}
