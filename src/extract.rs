use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no article region found")]
    NoArticle,
}

/// Isolates the chapter body from a full page.
///
/// Implementations must be cheap to share across tasks.
pub trait ArticleExtractor: Send + Sync {
    fn extract<'a>(&self, html: &'a str) -> Result<&'a str, ExtractError>;
}

static ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<P>[\s\S]+</P>").unwrap_or_else(|err| panic!("{err}")));

/// Matches from the first `<P>` to the last `</P>` of the page.
///
/// Relies on the pages using upper-case paragraph tags around all of the
/// prose and nowhere in the surrounding chrome.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl ArticleExtractor for PatternExtractor {
    fn extract<'a>(&self, html: &'a str) -> Result<&'a str, ExtractError> {
        ARTICLE
            .find(html)
            .map(|m| m.as_str())
            .ok_or(ExtractError::NoArticle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_first_paragraph_to_last_closing_paragraph() {
        let html = "<HTML><BODY><DIV class='nav'>menu</DIV>\
<P>one</P><PRE>(code)</PRE><P>two</P>\
<DIV class='copyright'>footer</DIV></BODY></HTML>";

        assert_eq!(
            PatternExtractor.extract(html),
            Ok("<P>one</P><PRE>(code)</PRE><P>two</P>")
        );
    }

    #[test]
    fn spans_newlines() {
        let html = "<P>first\nline</P>\n\n<P>second</P>";
        assert_eq!(PatternExtractor.extract(html), Ok(html));
    }

    #[test]
    fn missing_paragraphs_is_an_error() {
        assert_eq!(
            PatternExtractor.extract("<html><body>Not Found</body></html>"),
            Err(ExtractError::NoArticle)
        );
        assert_eq!(
            PatternExtractor.extract("<p>lower-case tags only</p>"),
            Err(ExtractError::NoArticle)
        );
    }
}
