use serde::{Deserialize, Serialize};
use url::Url;

/// One anchor pulled out of the navigation blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub href: String,
    pub title: String,
}

/// A chapter to fetch. Built once from a [`NavEntry`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterSpec {
    pub id: String,
    #[serde(rename = "url")]
    pub source_url: Url,
    pub title: String,
}

/// Converted Markdown for one chapter, owned by the task that produced it
/// until it is handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterResult {
    pub id: String,
    pub title: String,
    pub content: Vec<u8>,
}

/// Docusaurus `sidebars.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidebars {
    pub docs: SidebarDocs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarDocs {
    #[serde(rename = "Chapters")]
    pub chapters: Vec<String>,
}
