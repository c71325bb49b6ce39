use std::sync::LazyLock;

use regex::Regex;

static APOSTROPHES: LazyLock<Regex> = LazyLock::new(|| compile(r"['’]"));
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| compile(r"[?()/.,:\s]"));
static HYPHEN_RUNS: LazyLock<Regex> = LazyLock::new(|| compile(r"--+"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid slug pattern {pattern:?}: {err}"))
}

/// Turn a chapter title into the id used in front matter and the sidebar.
///
/// Leading hyphens are kept: `"(foo)"` becomes `"-foo"`.
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let without_apostrophes = APOSTROPHES.replace_all(&lower, "");
    let hyphenated = SEPARATORS.replace_all(&without_apostrophes, "-");
    let collapsed = HYPHEN_RUNS.replace_all(&hyphenated, "-");
    match collapsed.strip_suffix('-') {
        Some(trimmed) => trimmed.to_owned(),
        None => collapsed.into_owned(),
    }
}
