use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    chapterdocs::logging::init("info").context("init logging")?;

    let cli = chapterdocs::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        chapterdocs::cli::Command::Build(args) => {
            chapterdocs::build::run(args).await.context("build")?;
        }
        chapterdocs::cli::Command::Nav(args) => {
            chapterdocs::build::nav(args).context("nav")?;
        }
        chapterdocs::cli::Command::Slug(args) => {
            println!("{}", chapterdocs::slug::slugify(&args.title));
        }
    }

    Ok(())
}
