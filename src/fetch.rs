use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use tokio::sync::Semaphore;
use url::Url;

use crate::extract::{ArticleExtractor, ExtractError};
use crate::formats::{ChapterResult, ChapterSpec};
use crate::markdown::render_chapter;
use crate::sink::ChapterSink;

/// Fetches one page, decoded to text using the charset the server declares.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn get(&self, url: &Url) -> anyhow::Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpRetriever {
    client: reqwest::Client,
}

impl HttpRetriever {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Retriever for HttpRetriever {
    async fn get(&self, url: &Url) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, "chapterdocs/0.1")
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        let response = response
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;

        // Falls back to UTF-8 when the response has no charset.
        response
            .text()
            .await
            .with_context(|| format!("read body: {url}"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChapterError {
    #[error("retrieve {url}")]
    Retrieve {
        url: Url,
        #[source]
        source: anyhow::Error,
    },
    #[error("extract article from {url}")]
    Extract {
        url: Url,
        #[source]
        source: ExtractError,
    },
    #[error("write chapter {id}")]
    Sink {
        id: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Collaborators shared by every chapter task of one run.
#[derive(Clone)]
pub struct FetchContext {
    pub retriever: Arc<dyn Retriever>,
    pub extractor: Arc<dyn ArticleExtractor>,
    pub sink: Arc<dyn ChapterSink>,
    pub concurrency: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterFailure {
    pub id: String,
    pub title: String,
    pub error: String,
}

/// What happened to each chapter. `written` is in completion order.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub written: Vec<String>,
    pub failed: Vec<ChapterFailure>,
    /// Tasks that panicked before reporting back.
    pub aborted: usize,
}

impl FetchReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len() + self.aborted
    }
}

/// Retrieve, extract, convert and hand off a single chapter.
pub async fn fetch_chapter(
    ctx: &FetchContext,
    spec: &ChapterSpec,
) -> Result<PathBuf, ChapterError> {
    let html = ctx
        .retriever
        .get(&spec.source_url)
        .await
        .map_err(|source| ChapterError::Retrieve {
            url: spec.source_url.clone(),
            source,
        })?;

    let article = ctx
        .extractor
        .extract(&html)
        .map_err(|source| ChapterError::Extract {
            url: spec.source_url.clone(),
            source,
        })?;

    let chapter = ChapterResult {
        id: spec.id.clone(),
        title: spec.title.clone(),
        content: render_chapter(spec, article).into_bytes(),
    };

    ctx.sink
        .write(chapter)
        .await
        .map_err(|source| ChapterError::Sink {
            id: spec.id.clone(),
            source,
        })
}

/// Run one task per chapter, at most `ctx.concurrency` at a time, and wait
/// for all of them.
///
/// A failing chapter is logged and recorded in the report; it never stops the
/// others.
pub async fn fetch_all(
    ctx: &FetchContext,
    specs: Vec<ChapterSpec>,
) -> anyhow::Result<FetchReport> {
    let semaphore = Arc::new(Semaphore::new(ctx.concurrency.max(1)));
    let mut join_set = tokio::task::JoinSet::new();

    tracing::info!(
        chapters = specs.len(),
        concurrency = ctx.concurrency.max(1),
        "fetch chapters"
    );

    for spec in specs {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .context("acquire fetch permit")?;
        let ctx = ctx.clone();

        join_set.spawn(async move {
            let _permit = permit;
            tracing::debug!(id = %spec.id, url = %spec.source_url, "fetch chapter");
            let result = fetch_chapter(&ctx, &spec).await;
            (spec, result)
        });
    }

    let mut report = FetchReport::default();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((spec, Ok(path))) => {
                tracing::info!(
                    id = %spec.id,
                    title = %spec.title,
                    path = %path.display(),
                    "chapter done"
                );
                report.written.push(spec.id);
            }
            Ok((spec, Err(err))) => {
                let error = format!("{:#}", anyhow::Error::new(err));
                tracing::error!(
                    id = %spec.id,
                    title = %spec.title,
                    url = %spec.source_url,
                    %error,
                    "chapter failed"
                );
                report.failed.push(ChapterFailure {
                    id: spec.id,
                    title: spec.title,
                    error,
                });
            }
            Err(err) => {
                tracing::error!(?err, "chapter task aborted");
                report.aborted += 1;
            }
        }
    }

    Ok(report)
}
