use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use url::Url;

use crate::cli::{BuildArgs, NavArgs};
use crate::extract::PatternExtractor;
use crate::fetch::{FetchContext, FetchReport, HttpRetriever};
use crate::formats::ChapterSpec;
use crate::manifest::{Manifest, write_sidebars};
use crate::sink::FileSink;

/// Fetch and convert every chapter, then write the sidebar manifest.
///
/// Chapter failures are logged and reported, never returned as errors. Only
/// problems that stop the run from starting are.
pub async fn run(args: BuildArgs) -> anyhow::Result<FetchReport> {
    let specs = load_chapter_specs(&args.base_url, args.nav_file.as_deref())?;
    let manifest = Manifest::from_specs(&specs);
    if manifest.is_empty() {
        tracing::warn!("navigation has no chapter links; sidebar will be empty");
    }

    let docs_dir = PathBuf::from(&args.docs_dir);
    std::fs::create_dir_all(&docs_dir)
        .with_context(|| format!("create docs dir: {}", docs_dir.display()))?;

    let retriever = HttpRetriever::new(Duration::from_secs(args.timeout_secs))?;
    let ctx = FetchContext {
        retriever: Arc::new(retriever),
        extractor: Arc::new(PatternExtractor),
        sink: Arc::new(FileSink::new(&docs_dir, args.file_naming)),
        concurrency: args.concurrency,
    };

    tracing::info!(
        chapters = specs.len(),
        base_url = %args.base_url,
        docs_dir = %docs_dir.display(),
        "build: fetch"
    );
    let report = crate::fetch::fetch_all(&ctx, specs)
        .await
        .context("fetch chapters")?;

    let sidebars_path = PathBuf::from(&args.sidebars);
    tracing::info!(path = %sidebars_path.display(), "build: sidebars");
    if let Err(err) = write_sidebars(&manifest, &sidebars_path) {
        let error = format!("{err:#}");
        tracing::error!(%error, "write sidebars failed");
    }

    tracing::info!(
        written = report.written.len(),
        failed = report.failed.len(),
        aborted = report.aborted,
        "done"
    );
    Ok(report)
}

/// Print every chapter the navigation resolves to as a JSON line.
pub fn nav(args: NavArgs) -> anyhow::Result<()> {
    let specs = load_chapter_specs(&args.base_url, args.nav_file.as_deref())?;
    for spec in specs {
        let line = serde_json::to_string(&spec).context("serialize chapter")?;
        println!("{line}");
    }
    Ok(())
}

pub fn load_chapter_specs(
    base_url: &str,
    nav_file: Option<&str>,
) -> anyhow::Result<Vec<ChapterSpec>> {
    let base_url = Url::parse(base_url).context("parse --base-url")?;
    if base_url.scheme() != "http" && base_url.scheme() != "https" {
        anyhow::bail!("--base-url must be http/https: {base_url}");
    }

    let blob = crate::nav::load_nav(nav_file.map(Path::new))?;
    let entries = crate::nav::parse_nav(&blob);
    crate::nav::chapter_specs(&base_url, &entries)
}
