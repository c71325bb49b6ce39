use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::nav::DEFAULT_BASE_URL;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every chapter, write Markdown docs and the sidebar manifest.
    Build(BuildArgs),
    /// Print the chapters the navigation resolves to, one JSON object per line.
    Nav(NavArgs),
    /// Print the id a chapter title maps to.
    Slug(SlugArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileNaming {
    /// `<title>.md`, as the published site expects.
    Title,
    /// `<id>.md`, matching the ids in the sidebar manifest.
    Id,
}

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Base URL the navigation hrefs are resolved against.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Navigation HTML to use instead of the built-in table of contents.
    #[arg(long)]
    pub nav_file: Option<String>,

    /// Output directory for chapter Markdown files.
    #[arg(long, default_value = "docs")]
    pub docs_dir: String,

    /// Output file path for the Docusaurus sidebar manifest.
    #[arg(long, default_value = "website/sidebars.json")]
    pub sidebars: String,

    /// How chapter files are named.
    #[arg(long, value_enum, default_value_t = FileNaming::Title)]
    pub file_naming: FileNaming,

    /// Maximum concurrent chapter fetches.
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    /// Per-request timeout.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Args)]
pub struct NavArgs {
    /// Base URL the navigation hrefs are resolved against.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Navigation HTML to use instead of the built-in table of contents.
    #[arg(long)]
    pub nav_file: Option<String>,
}

#[derive(Debug, Args)]
pub struct SlugArgs {
    /// Chapter title.
    pub title: String,
}
