use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "source-tree-fetcher")]
#[command(about = "Snapshot a repository's file tree at a commit into a JSON document")]
pub struct Cli {
    /// Repository owner (user or organization)
    #[arg(long, env = "REPO_OWNER")]
    pub repo_owner: Option<String>,

    /// Repository name; also names the root node of the output tree
    #[arg(long, env = "REPO_NAME")]
    pub repo_name: Option<String>,

    /// Commit SHA or ref whose tree is listed
    #[arg(long, env = "REPO_COMMIT")]
    pub repo_commit: Option<String>,

    /// Token sent in the Authorization header
    #[arg(long, env = "AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Where the serialized tree is written
    #[arg(long, env = "OUTPUT_PATH")]
    pub output_path: Option<PathBuf>,

    /// Indent the output JSON with four spaces instead of writing it compact
    #[arg(long)]
    pub prettify: bool,
}

/// Everything one run needs, built once at startup and passed through the
/// fetch/build/write pipeline.
///
/// Inside GitHub Actions the values come from the step's `INPUT_*`
/// environment variables; elsewhere they come from flags and plain
/// environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub from_actions: bool,
    pub repo_owner: String,
    pub repo_name: String,
    pub repo_commit: String,
    pub auth_token: String,
    pub output_path: PathBuf,
    pub prettify: bool,
    pub api_base_url: Option<String>,
}

impl Config {
    pub fn load(cli: Cli) -> Result<Self> {
        let from_actions = env_is_truthy("GITHUB_ACTIONS");
        // Actions runners expose their API endpoint here; absent that, the
        // client falls back to the public one.
        let api_base_url = std::env::var("GITHUB_API_URL")
            .ok()
            .filter(|value| !value.is_empty());

        if from_actions {
            Self::from_action_inputs(api_base_url)
        } else {
            Self::from_cli(cli, api_base_url)
        }
    }

    fn from_action_inputs(api_base_url: Option<String>) -> Result<Self> {
        Ok(Self {
            from_actions: true,
            repo_owner: action_input("repo-owner")?,
            repo_name: action_input("repo-name")?,
            repo_commit: action_input("repo-commit")?,
            auth_token: action_input("github-pat")?,
            output_path: PathBuf::from(action_input("output-path")?),
            prettify: parse_bool_input(&optional_action_input("prettify"))
                .context("invalid input: prettify")?,
            api_base_url,
        })
    }

    fn from_cli(cli: Cli, api_base_url: Option<String>) -> Result<Self> {
        Ok(Self {
            from_actions: false,
            repo_owner: require(cli.repo_owner, "--repo-owner", "REPO_OWNER")?,
            repo_name: require(cli.repo_name, "--repo-name", "REPO_NAME")?,
            repo_commit: require(cli.repo_commit, "--repo-commit", "REPO_COMMIT")?,
            auth_token: require(cli.auth_token, "--auth-token", "AUTH_TOKEN")?,
            output_path: cli
                .output_path
                .context("missing --output-path (or OUTPUT_PATH)")?,
            prettify: cli.prettify || env_is_truthy("PRETTIFY"),
            api_base_url,
        })
    }
}

fn require(value: Option<String>, flag: &str, var: &str) -> Result<String> {
    value.with_context(|| format!("missing {flag} (or {var})"))
}

/// A required Actions input, read from the environment variable the runner
/// sets for it.
fn action_input(name: &str) -> Result<String> {
    let value = optional_action_input(name);
    if value.is_empty() {
        bail!("missing required input: {name}");
    }
    Ok(value)
}

fn optional_action_input(name: &str) -> String {
    std::env::var(action_env_name(name))
        .unwrap_or_default()
        .trim()
        .to_owned()
}

/// The runner exposes an input named `repo-owner` as `INPUT_REPO-OWNER`:
/// uppercased, spaces replaced with underscores, dashes kept.
fn action_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Actions boolean inputs follow the YAML 1.2 core schema; an unset input
/// counts as false.
fn parse_bool_input(raw: &str) -> Result<bool> {
    match raw {
        "" | "false" | "False" | "FALSE" => Ok(false),
        "true" | "True" | "TRUE" => Ok(true),
        other => bail!("not a boolean: {other}"),
    }
}

/// Plain-environment booleans are looser: set and non-empty means true.
fn env_is_truthy(var: &str) -> bool {
    std::env::var(var).is_ok_and(|value| !value.is_empty())
}
