//! Path escaping for Ninja graph syntax.
//!
//! Ninja treats `$`, space, and `:` as syntax inside `build` and `include`
//! lines, so every path interpolated into the graph must be rewritten first.

/// Escape a path so it can be interpolated verbatim into Ninja syntax.
///
/// Three substitutions run in a fixed order: literal `"$ "` becomes `"$$ "`,
/// remaining spaces become `"$ "`, and `":"` becomes `"$:"`. The dollar
/// rewrite must run before the space rewrite so an already dollar-prefixed
/// space is not escaped twice. Reversing the substitutions in reverse order
/// recovers the original path byte for byte.
///
/// # Examples
///
/// ```
/// use kumiki::escape_path;
///
/// assert_eq!(escape_path("a b:c"), "a$ b$:c");
/// assert_eq!(escape_path("lib$ x"), "lib$$$ x");
/// ```
#[must_use]
pub fn escape_path(path: &str) -> String {
    path.replace("$ ", "$$ ")
        .replace(' ', "$ ")
        .replace(':', "$:")
}

#[cfg(test)]
mod tests {
    use super::escape_path;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("a b", "a$ b")]
    #[case("a:b", "a$:b")]
    #[case("a$ b", "a$$$ b")]
    #[case("C:/x y/z", "C$:/x$ y/z")]
    fn escapes_reserved_characters(#[case] raw: &str, #[case] escaped: &str) {
        assert_eq!(escape_path(raw), escaped);
    }

    #[test]
    fn leaves_bare_dollars_alone() {
        assert_eq!(escape_path("a$b"), "a$b");
    }
}
