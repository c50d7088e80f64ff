use std::collections::HashSet;

use clap::Parser;
use futures::TryStreamExt;
use tracing::info;

use ghsa_feed::feed::client::{AdvisoryFeed, MalformedRangePolicy};
use ghsa_feed::feed::transport::GithubTransport;

#[derive(Parser)]
#[command(name = "ghsa-feed")]
#[command(version, about = "Fetch Composer security advisories from GitHub")]
struct Cli {
    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Package to exclude from the feed (vendor/package), repeatable
    #[arg(long = "ignore", value_name = "PACKAGE")]
    ignore: Vec<String>,

    /// Abort on the first malformed version range instead of skipping it
    #[arg(long)]
    fail_on_malformed_range: bool,

    /// Base URL of the GitHub API
    #[arg(long, default_value = "https://api.github.com")]
    endpoint: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let policy = if cli.fail_on_malformed_range {
        MalformedRangePolicy::Fail
    } else {
        MalformedRangePolicy::Skip
    };
    let ignore: HashSet<String> = cli.ignore.into_iter().collect();

    let feed = AdvisoryFeed::new(GithubTransport::new(&cli.endpoint), &cli.token)?
        .with_ignore_list(ignore)
        .with_malformed_range_policy(policy);

    let advisories: Vec<_> = feed.fetch_advisories().try_collect().await?;
    info!(count = advisories.len(), "fetched advisories");

    println!("{}", serde_json::to_string_pretty(&advisories)?);

    Ok(())
}
