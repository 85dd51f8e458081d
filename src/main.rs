//! CommitRecap command-line tool
//!
//! Fetches a user's commit-size distribution from GitHub and prints the
//! report as JSON.

use std::env;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use tracing_subscriber::EnvFilter;

use commitrecap::{aggregate_commit_sizes, GitHubClient, RecapConfig, RecapRequest};

const DEFAULT_TOP_REPOS: usize = 5;
const DEFAULT_MAX_COMMITS_PER_REPO: usize = 200;

const USAGE: &str = "usage: commitrecap <username> [--since YYYY-MM-DD] [--until YYYY-MM-DD] \
[--top-repos N] [--max-commits N]";

fn parse_args(args: Vec<String>) -> Result<RecapRequest> {
    let year = Utc::now().year();
    let mut username = None;
    let mut since = format!("{year}-01-01");
    let mut until = format!("{year}-12-31");
    let mut top_repos = DEFAULT_TOP_REPOS;
    let mut max_commits_per_repo = DEFAULT_MAX_COMMITS_PER_REPO;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let mut flag_value = |flag: &str| {
            iter.next()
                .ok_or_else(|| anyhow::anyhow!("{flag} needs a value\n{USAGE}"))
        };
        match arg.as_str() {
            "--since" => since = flag_value("--since")?,
            "--until" => until = flag_value("--until")?,
            "--top-repos" => top_repos = flag_value("--top-repos")?.parse()?,
            "--max-commits" => max_commits_per_repo = flag_value("--max-commits")?.parse()?,
            "-h" | "--help" => bail!("{USAGE}"),
            other if other.starts_with('-') => bail!("unknown flag {other}\n{USAGE}"),
            other => {
                if username.replace(other.to_string()).is_some() {
                    bail!("only one username may be given\n{USAGE}");
                }
            }
        }
    }

    let Some(username) = username else {
        bail!("{USAGE}");
    };
    Ok(RecapRequest {
        username,
        since,
        until,
        top_repos,
        max_commits_per_repo,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let request = parse_args(env::args().skip(1).collect())?;
    let client = Arc::new(GitHubClient::new(RecapConfig::from_env())?);
    let report = aggregate_commit_sizes(client, request).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
