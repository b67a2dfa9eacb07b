//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::output::{Output, OutputFormat};
use crate::domain::{summarize, Summary};
use crate::github::{collect_yearly_events, GithubClient};
use crate::storage::{render_summary, Config, Overrides, SummaryDocument};

#[derive(Parser)]
#[command(name = "recap")]
#[command(author, version, about = "Summarize a year of GitHub activity into your README")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch this year's events and rewrite the README summary section
    Update {
        #[command(flatten)]
        feed: FeedArgs,

        /// Document to patch (defaults to README.md)
        #[arg(long)]
        readme: Option<PathBuf>,

        /// Print the rendered block without touching the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Fetch this year's events and print the summary
    Summary {
        #[command(flatten)]
        feed: FeedArgs,
    },
}

/// Flags shared by every command that reads the events feed
#[derive(Args)]
pub struct FeedArgs {
    /// GitHub username to summarize
    #[arg(long, short = 'u', env = "GITHUB_USERNAME")]
    pub user: Option<String>,

    /// API token; optional, raises the unauthenticated rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Calendar year to cover (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Base URL of the GitHub API
    #[arg(long)]
    pub api_url: Option<String>,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Recap CLI starting");

    match cli.command {
        Commands::Update {
            feed,
            readme,
            dry_run,
        } => update(feed, readme, dry_run, &output)?,

        Commands::Summary { feed } => summary(feed, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Runs fetch + summarize and returns the resolved config alongside
fn fetch_summary(
    feed: FeedArgs,
    readme: Option<PathBuf>,
    output: &Output,
) -> Result<(Config, Summary)> {
    let config = Config::resolve(Overrides {
        username: feed.user,
        token: feed.token,
        year: feed.year,
        readme,
        api_url: feed.api_url,
    })?;

    let year = config.effective_year();
    output.verbose(&format!(
        "fetching {} events for {} from {}",
        year, config.username, config.api_url
    ));

    let client = GithubClient::new(&config.api_url, config.token.clone())?;
    let events = collect_yearly_events(&client, &config.username, year, output);
    output.verbose(&format!("{} events retained after year filtering", events.len()));

    let summary = summarize(&events, output);
    Ok((config, summary))
}

/// Full pipeline: fetch, summarize, patch the document
fn update(feed: FeedArgs, readme: Option<PathBuf>, dry_run: bool, output: &Output) -> Result<()> {
    let (config, summary) = fetch_summary(feed, readme, output)?;
    let document =
        SummaryDocument::with_markers(&config.readme, &config.start_marker, &config.end_marker);

    if dry_run {
        if output.is_json() {
            output.data(&summary);
        } else {
            println!("{}", document.render_block(&summary));
        }
        return Ok(());
    }

    document.apply(&summary, output)?;

    output.success(&format!(
        "{} updated with yearly summary ({} events across {} repositories)",
        config.readme.display(),
        summary.total_events,
        summary.unique_repos
    ));
    Ok(())
}

/// Fetch + summarize only, no document involved
fn summary(feed: FeedArgs, output: &Output) -> Result<()> {
    let (_, summary) = fetch_summary(feed, None, output)?;

    if output.is_json() {
        output.data(&summary);
    } else {
        println!("{}", render_summary(&summary));
    }

    Ok(())
}
