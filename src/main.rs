//! diffprompt - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use diffprompt::cli::Cli;
use diffprompt::collect::collect;
use diffprompt::config::{Environment, ResolveContext, resolve_config};
use diffprompt::git::{check_git_installed, discover_repo_root};
use diffprompt::output::{preview, write_prompt};
use diffprompt::template::build_prompt;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout carries only the preview. `RUST_LOG` wins over `-v`.
fn init_tracing(cli: &Cli) {
    let default_level = format!("diffprompt={}", cli.log_level());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    // Step 1: Check prerequisites
    check_git_installed()?;

    let cwd = std::env::current_dir().context("Cannot determine the current directory")?;
    let repo_root = discover_repo_root(&cwd)?;
    info!("Repository root: {}", repo_root.display());

    // Step 2: Resolve configuration
    let ctx = ResolveContext {
        repo_root: Some(repo_root.clone()),
        cwd,
        env: Environment::from_process(),
    };
    let options = resolve_config(&ctx, &cli.overrides());
    debug!("Options: {:?}", options);

    // Step 3: Collect the diff payload
    let diff = collect(&repo_root, &options).await?;
    info!("Collected {} bytes of changes", diff.len());

    // Step 4: Render the prompt
    let prompt = build_prompt(&diff, &repo_root, &options).await;

    // Step 5: Preview and write
    let shown = preview(&prompt, options.preview_lines);
    if !shown.is_empty() {
        println!("{}", shown);
        println!();
    }

    write_prompt(&options.out, &prompt)?;
    println!("✓ Prompt written to {}", options.out.display());

    Ok(())
}
