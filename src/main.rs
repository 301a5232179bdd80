//! buddy-bot - Dependency update bot CLI
//!
//! Plans update pull requests from resolved dependencies and reviews the
//! bodies of pull requests opened earlier.

use anyhow::Result;
use buddy_bot::cli::{CliArgs, Command};
use buddy_bot::config::BuddyConfig;
use buddy_bot::output::{create_formatter, OutputConfig};
use buddy_bot::planner::{Planner, ResolvedDependency};
use buddy_bot::review::{read_body, review_pull_request};
use buddy_bot::update::DEFAULT_BRANCH_PREFIX;
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

/// Exit code of `check` when the pull request should be closed
const EXIT_SHOULD_CLOSE: u8 = 2;

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("buddy_bot")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = initialize_logger(args.debug) {
        eprintln!("Warning: failed to initialize logger: {}", e);
    }

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn configured_prefix(config: Option<&BuddyConfig>) -> String {
    config
        .map(BuddyConfig::branch_prefix)
        .unwrap_or(DEFAULT_BRANCH_PREFIX)
        .to_string()
}

/// Main application logic
fn run(args: CliArgs) -> Result<ExitCode> {
    let config = BuddyConfig::discover(args.config.as_deref(), Path::new("."))?;
    let auto_close = config.as_ref().map(BuddyConfig::auto_close);

    let mut stdout = io::stdout().lock();

    match args.command {
        Command::Plan {
            input,
            json,
            branch_prefix,
        } => {
            let prefix = branch_prefix.unwrap_or_else(|| configured_prefix(config.as_ref()));
            let resolved = ResolvedDependency::load_all(&input)?;
            let report = Planner::new(prefix).plan(resolved);

            create_formatter(OutputConfig::from_cli(json)).format_plan(&report, &mut stdout)?;
        }
        Command::Decode { body, json } => {
            let review = review_pull_request(&read_body(&body)?, auto_close.as_ref());
            create_formatter(OutputConfig::from_cli(json)).format_review(&review, &mut stdout)?;
        }
        Command::Check { body, json } => {
            let review = review_pull_request(&read_body(&body)?, auto_close.as_ref());
            create_formatter(OutputConfig::from_cli(json)).format_review(&review, &mut stdout)?;
            stdout.flush()?;

            if review.should_close() {
                return Ok(ExitCode::from(EXIT_SHOULD_CLOSE));
            }
        }
        Command::Render { input } => {
            let resolved = ResolvedDependency::load_all(&input)?;
            let report = Planner::new(configured_prefix(config.as_ref())).plan(resolved);

            for planned in &report.groups {
                writeln!(stdout, "<!-- branch: {} -->", planned.branch)?;
                writeln!(stdout, "# {}", planned.group.title)?;
                writeln!(stdout)?;
                writeln!(stdout, "{}", planned.group.body)?;
            }
        }
    }

    stdout.flush()?;
    Ok(ExitCode::SUCCESS)
}
