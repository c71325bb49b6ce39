use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context as _;
use regex::Regex;
use url::Url;

use crate::formats::{ChapterSpec, NavEntry};
use crate::slug::slugify;

pub const DEFAULT_BASE_URL: &str = "http://www.gigamonkeys.com/book/";

/// Table of contents of Practical Common Lisp, in reading order.
pub const BOOK_NAV: &str = r#"<ol>
  <li><a href='introduction-why-lisp.html'>Introduction: Why Lisp?</a></li>
  <li><a href='lather-rinse-repeat-a-tour-of-the-repl.html'>Lather, Rinse, Repeat: A Tour of the REPL</a></li>
  <li><a href='practical-a-simple-database.html'>Practical: A Simple Database</a></li>
  <li><a href='syntax-and-semantics.html'>Syntax and Semantics</a></li>
  <li><a href='functions.html'>Functions</a></li>
  <li><a href='variables.html'>Variables</a></li>
  <li><a href='macros-standard-control-constructs.html'>Macros: Standard Control Constructs</a></li>
  <li><a href='macros-defining-your-own.html'>Macros: Defining Your Own</a></li>
  <li><a href='practical-building-a-unit-test-framework.html'>Practical: Building a Unit Test Framework</a></li>
  <li><a href='numbers-characters-and-strings.html'>Numbers, Characters, and Strings</a></li>
  <li><a href='collections.html'>Collections</a></li>
  <li><a href='they-called-it-lisp-for-a-reason-list-processing.html'>They Called It LISP for a Reason: List Processing</a></li>
  <li><a href='beyond-lists-other-uses-for-cons-cells.html'>Beyond Lists: Other Uses for Cons Cells</a></li>
  <li><a href='files-and-file-io.html'>Files and File I/O</a></li>
  <li><a href='practical-a-portable-pathname-library.html'>Practical: A Portable Pathname Library</a></li>
  <li><a href='object-reorientation-generic-functions.html'>Object Reorientation: Generic Functions</a></li>
  <li><a href='object-reorientation-classes.html'>Object Reorientation: Classes</a></li>
  <li><a href='a-few-format-recipes.html'>A Few FORMAT Recipes</a></li>
  <li><a href='beyond-exception-handling-conditions-and-restarts.html'>Beyond Exception Handling: Conditions and Restarts</a></li>
  <li><a href='the-special-operators.html'>The Special Operators</a></li>
  <li><a href='programming-in-the-large-packages-and-symbols.html'>Programming in the Large: Packages and Symbols</a></li>
  <li><a href='loop-for-black-belts.html'>LOOP for Black Belts</a></li>
  <li><a href='practical-a-spam-filter.html'>Practical: A Spam Filter</a></li>
  <li><a href='practical-parsing-binary-files.html'>Practical: Parsing Binary Files</a></li>
  <li><a href='practical-an-id3-parser.html'>Practical: An ID3 Parser</a></li>
  <li><a href='practical-web-programming-with-allegroserve.html'>Practical: Web Programming with AllegroServe</a></li>
  <li><a href='practical-an-mp3-database.html'>Practical: An MP3 Database</a></li>
  <li><a href='practical-a-shoutcast-server.html'>Practical: A Shoutcast Server</a></li>
  <li><a href='practical-an-mp3-browser.html'>Practical: An MP3 Browser</a></li>
  <li><a href='practical-an-html-generation-library-the-interpreter.html'>Practical: An HTML Generation Library, the Interpreter</a></li>
  <li><a href='practical-an-html-generation-library-the-compiler.html'>Practical: An HTML Generation Library, the Compiler</a></li>
  <li><a href='conclusion-whats-next.html'>Conclusion: What's Next?</a></li>
</ol>"#;

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"href='(.+?)'[\s\S]*?>([\s\S]+?)<").unwrap_or_else(|err| panic!("{err}"))
});

/// Pull `(href, title)` pairs out of a navigation blob, in document order.
///
/// Duplicates are kept. A blob with no anchors yields an empty list.
pub fn parse_nav(blob: &str) -> Vec<NavEntry> {
    LINK.captures_iter(blob)
        .map(|caps| NavEntry {
            href: caps[1].to_owned(),
            title: caps[2].to_owned(),
        })
        .collect()
}

/// Read the navigation blob from `path`, or fall back to [`BOOK_NAV`].
pub fn load_nav(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read navigation file: {}", path.display())),
        None => Ok(BOOK_NAV.to_owned()),
    }
}

pub fn chapter_spec(base_url: &Url, entry: &NavEntry) -> anyhow::Result<ChapterSpec> {
    let source_url = base_url
        .join(&entry.href)
        .with_context(|| format!("resolve chapter url {:?} against {base_url}", entry.href))?;
    Ok(ChapterSpec {
        id: slugify(&entry.title),
        source_url,
        title: entry.title.clone(),
    })
}

pub fn chapter_specs(base_url: &Url, entries: &[NavEntry]) -> anyhow::Result<Vec<ChapterSpec>> {
    entries
        .iter()
        .map(|entry| chapter_spec(base_url, entry))
        .collect()
}
