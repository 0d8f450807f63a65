mod actions;
mod config;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use source_tree::{RunOutcome, build};
use source_tree_github::{GitHubTreeClient, GitHubTreeClientConfig};

use crate::config::{Cli, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Blank line first so the staged progress output reads cleanly.
    println!();

    let from_actions = actions::in_github_actions();
    let config = match Config::load(cli) {
        Ok(config) => config,
        Err(error) => {
            return report(from_actions, &RunOutcome::failure(0, format!("{error:#}")));
        }
    };

    let outcome = match run(&config).await {
        Ok(outcome) => outcome,
        // Anything escaping the classified fetch path (serialization, the
        // file write) is fatal and reported as-is.
        Err(error) => RunOutcome::failure(0, format!("{error:#}")),
    };

    report(config.from_actions, &outcome)
}

/// One sequential pass: fetch the flat listing, rebuild the nested tree,
/// serialize it, write it out. Fetch failures come back as a failure
/// outcome with the classified status code and message.
async fn run(config: &Config) -> Result<RunOutcome> {
    println!("Processing...");

    let client = GitHubTreeClient::new(GitHubTreeClientConfig {
        owner: config.repo_owner.clone(),
        repo: config.repo_name.clone(),
        commit: config.repo_commit.clone(),
        token: Some(config.auth_token.clone()),
        api_base_url: config.api_base_url.clone(),
    });

    let listing = match client.fetch_listing().await {
        Ok(listing) => listing,
        Err(error) => {
            return Ok(RunOutcome::failure(error.status_code(), error.to_string()));
        }
    };

    let tree = build(&config.repo_name, &listing.tree);

    println!();
    println!("Serializing...");
    let document = output::serialize(&tree, config.prettify)?;

    println!();
    if output::has_parent_dir(&config.output_path) {
        println!("Writing directory...");
    }
    println!("Writing file...");
    output::write_document(&config.output_path, &document)?;

    // The tree went to the output file; the outcome itself carries none.
    Ok(RunOutcome::ok(None))
}

/// Hand the outcome to whichever reporting layer applies: step outputs and
/// an error annotation inside Actions, plain stdout and the exit code
/// otherwise.
fn report(from_actions: bool, outcome: &RunOutcome) -> ExitCode {
    if outcome.success {
        if from_actions {
            emit_output("success", "true");
            emit_output("message", &outcome.message);
        } else {
            println!();
            println!("Files created successfully!");
        }
        ExitCode::SUCCESS
    } else {
        if from_actions {
            emit_output("success", "false");
            emit_output("message", &outcome.message);
            actions::error(&outcome.message);
        } else {
            println!();
            println!("{}", outcome.message);
        }
        ExitCode::FAILURE
    }
}

fn emit_output(name: &str, value: &str) {
    if let Err(error) = actions::set_output(name, value) {
        eprintln!("warning: could not write step output {name}: {error}");
    }
}
