//! Source discovery by glob pattern.
//!
//! Discovery resolves a slash-separated subtree against the configured
//! working directory and matches files by extension, optionally recursing.
//! Matching is strict about separators: a non-recursive pass never picks up
//! nested files, even when nested matches exist.

use camino::{Utf8Path, Utf8PathBuf};
use glob::{MatchOptions, glob_with};
use thiserror::Error;
use tracing::warn;

/// A discovered source path paired with its derived output artifact path.
pub type SourcePair = (Utf8PathBuf, Utf8PathBuf);

/// Failure during a discovery pass.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The assembled pattern was not valid glob syntax.
    #[error("invalid glob pattern {pattern:?}")]
    Pattern {
        /// The pattern that failed to parse.
        pattern: String,
        /// Parser failure detail.
        #[source]
        source: glob::PatternError,
    },
    /// A matched directory entry could not be read.
    #[error("unreadable entry during discovery")]
    Read(#[from] glob::GlobError),
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Match `*.{ext}` (or `**/*.{ext}` when `recurse`) under
/// `<working_dir>/<subtree>` and derive each match's output path from its
/// base name with the extension stripped.
///
/// `subtree` is slash-separated and resolves against `working_dir`, never
/// against this library's own location. Only regular files are returned, in
/// filesystem iteration order; matches that are not valid UTF-8 are skipped
/// with a warning. An empty match set yields an empty vector, not an error.
///
/// # Errors
///
/// Returns [`DiscoveryError::Pattern`] when the assembled pattern is
/// rejected by the glob parser and [`DiscoveryError::Read`] when a matched
/// entry cannot be read.
pub fn glob_sources<F>(
    working_dir: &Utf8Path,
    subtree: &str,
    ext: &str,
    recurse: bool,
    namer: F,
) -> Result<Vec<SourcePair>, DiscoveryError>
where
    F: Fn(&str) -> Utf8PathBuf,
{
    let root = subtree
        .split('/')
        .fold(working_dir.to_owned(), |dir, part| dir.join(part));
    let predicate = if recurse { "**/*." } else { "*." };
    let pattern = root.join(format!("{predicate}{ext}"));

    let mut pairs = Vec::new();
    for source in matching_files(&pattern)? {
        let output = namer(source.file_stem().unwrap_or_default());
        pairs.push((source, output));
    }
    Ok(pairs)
}

/// Expand `pattern` to the regular files it matches, as UTF-8 paths.
pub(crate) fn matching_files(pattern: &Utf8Path) -> Result<Vec<Utf8PathBuf>, DiscoveryError> {
    let entries =
        glob_with(pattern.as_str(), MATCH_OPTIONS).map_err(|source| DiscoveryError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?;
        if !path.is_file() {
            continue;
        }
        match Utf8PathBuf::try_from(path) {
            Ok(file) => files.push(file),
            Err(err) => warn!(error = %err, "skipping non-UTF-8 match"),
        }
    }
    Ok(files)
}
