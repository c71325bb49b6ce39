//! HTML-to-Markdown conversion for extracted chapter bodies.
//!
//! The conversion is a fixed list of regex rewrites applied in order. Each
//! rewrite sees the output of the ones before it, so reordering changes the
//! result. Nothing here can fail: text a rule does not match passes through.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::formats::ChapterSpec;
use crate::slug::slugify;

/// Fence language for `<PRE>` blocks; every listing in the book is Lisp.
pub const CODE_FENCE_LANGUAGE: &str = "lisp";

const ENTITIES: [(&str, &str); 4] = [
    ("&quot;", "\""),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Everywhere,
    OutsidePre,
}

struct Rewrite {
    pattern: Regex,
    replacement: String,
    scope: Scope,
}

impl Rewrite {
    fn new(pattern: &str, replacement: impl Into<String>, scope: Scope) -> Self {
        Self {
            pattern: Regex::new(pattern)
                .unwrap_or_else(|err| panic!("invalid rewrite pattern {pattern:?}: {err}")),
            replacement: replacement.into(),
            scope,
        }
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.scope {
            Scope::Everywhere => self.pattern.replace_all(text, self.replacement.as_str()),
            Scope::OutsidePre => self.apply_outside_pre(text),
        }
    }

    fn apply_outside_pre<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if !PRE_BLOCK.is_match(text) {
            return self.pattern.replace_all(text, self.replacement.as_str());
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for block in PRE_BLOCK.find_iter(text) {
            let gap = &text[last..block.start()];
            out.push_str(&self.pattern.replace_all(gap, self.replacement.as_str()));
            out.push_str(block.as_str());
            last = block.end();
        }
        out.push_str(&self.pattern.replace_all(&text[last..], self.replacement.as_str()));
        Cow::Owned(out)
    }
}

static PRE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<PRE>[\s\S]+?</PRE>").unwrap_or_else(|err| panic!("{err}")));

static REWRITES: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    vec![
        Rewrite::new(r"<P>([\s\S]+?)</P>", "\n\n${1}\n\n", Scope::Everywhere),
        Rewrite::new(r"<B>([\s\S]+?)</B>", "${1}", Scope::OutsidePre),
        Rewrite::new(r"<I>([\s\S]+?)</I>", "${1}", Scope::OutsidePre),
        Rewrite::new(r"<CODE>([\s\S]+?)</CODE>", "`${1}`", Scope::OutsidePre),
        Rewrite::new(
            r"<PRE>([\s\S]+?)</PRE>",
            format!("\n```{CODE_FENCE_LANGUAGE}\n${{1}}\n```\n"),
            Scope::Everywhere,
        ),
        Rewrite::new(
            r"<A[^>]+><H2>([\s\S]+?)</H2></A>",
            "\n## ${1}\n",
            Scope::Everywhere,
        ),
        Rewrite::new(r"<DIV(?:\s[^>]*)?>", "", Scope::Everywhere),
    ]
});

/// Convert an extracted article region into a Markdown body.
pub fn rewrite_body(article: &str) -> String {
    let mut text = article.to_owned();
    for rewrite in REWRITES.iter() {
        text = rewrite.apply(&text).into_owned();
    }
    unescape_entities(&text)
}

/// Replace the four entities the book pages use. `&amp;` is handled before
/// `&lt;`/`&gt;`, so `&amp;lt;` ends up as `<`.
pub fn unescape_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_owned(), |acc, &(entity, plain)| acc.replace(entity, plain))
}

pub fn front_matter(spec: &ChapterSpec) -> String {
    let title = spec.title.replace('\\', "\\\\").replace('"', "\\\"");
    format!("---\nid: {}\ntitle: \"{title}\"\n---", slugify(&spec.title))
}

/// Front matter followed directly by the converted body.
pub fn render_chapter(spec: &ChapterSpec, article: &str) -> String {
    let mut out = front_matter(spec);
    out.push_str(&rewrite_body(article));
    out
}
