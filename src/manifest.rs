use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;

use crate::formats::{ChapterSpec, SidebarDocs, Sidebars};

/// Chapter ids in reading order.
///
/// Built from the navigation before anything is fetched, so an id being
/// listed here does not mean its file was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    chapter_ids: Vec<String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: &[ChapterSpec]) -> Self {
        let mut manifest = Self::new();
        for spec in specs {
            manifest.push(spec);
        }
        manifest
    }

    pub fn push(&mut self, spec: &ChapterSpec) {
        self.chapter_ids.push(spec.id.clone());
    }

    pub fn chapter_ids(&self) -> &[String] {
        &self.chapter_ids
    }

    pub fn len(&self) -> usize {
        self.chapter_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapter_ids.is_empty()
    }

    pub fn to_sidebars(&self) -> Sidebars {
        Sidebars {
            docs: SidebarDocs {
                chapters: self.chapter_ids.clone(),
            },
        }
    }
}

/// Serialize the manifest as `sidebars.json`, replacing any previous file.
pub fn write_sidebars(manifest: &Manifest, out_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create sidebars dir: {}", parent.display()))?;
    }

    let json = serde_json::to_vec(&manifest.to_sidebars()).context("serialize sidebars json")?;

    let mut out = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(out_path)
        .with_context(|| format!("open sidebars output: {}", out_path.display()))?;
    out.write_all(&json)
        .with_context(|| format!("write sidebars: {}", out_path.display()))?;
    out.flush().context("flush sidebars")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn spec(id: &str) -> ChapterSpec {
        ChapterSpec {
            id: id.to_owned(),
            source_url: Url::parse(&format!("http://example.com/{id}.html")).unwrap(),
            title: id.to_owned(),
        }
    }

    #[test]
    fn keeps_navigation_order_and_duplicates() {
        let manifest = Manifest::from_specs(&[spec("b"), spec("a"), spec("b")]);
        assert_eq!(manifest.chapter_ids(), ["b", "a", "b"]);
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn sidebars_json_shape() -> anyhow::Result<()> {
        let manifest = Manifest::from_specs(&[spec("functions"), spec("variables")]);
        let json = serde_json::to_string(&manifest.to_sidebars())?;
        assert_eq!(json, r#"{"docs":{"Chapters":["functions","variables"]}}"#);
        Ok(())
    }

    #[test]
    fn write_sidebars_creates_parent_and_overwrites() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let out = temp.path().join("website").join("sidebars.json");

        write_sidebars(&Manifest::from_specs(&[spec("old")]), &out)?;
        write_sidebars(&Manifest::from_specs(&[spec("new")]), &out)?;

        let sidebars: Sidebars = serde_json::from_str(&std::fs::read_to_string(&out)?)?;
        assert_eq!(sidebars.docs.chapters, vec!["new"]);
        Ok(())
    }

    #[test]
    fn write_sidebars_reports_unwritable_path() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let blocker = temp.path().join("website");
        std::fs::write(&blocker, "not a directory")?;

        let err = write_sidebars(&Manifest::new(), &blocker.join("sidebars.json")).unwrap_err();
        assert!(format!("{err:#}").contains("create sidebars dir"));
        Ok(())
    }
}
