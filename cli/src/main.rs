//! CLI entry point for the walk-forward split planner.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use wfvkit_cli::config::Plan;
use wfvkit_cli::error::Error;
use wfvkit_cli::run;

#[derive(Parser)]
#[command(name = "wfv")]
#[command(about = "Leakage-aware walk-forward split planner")]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the guarded walk-forward partitions of a plan as JSON lines
    Plan {
        /// Path to plan.toml
        plan: PathBuf,

        /// Print ranges and counts only, not the index lists
        #[arg(long)]
        compact: bool,
    },

    /// Print the number of walk-forward splits for a timeline length
    Count {
        #[arg(long)]
        n: usize,
        #[arg(long)]
        train: usize,
        #[arg(long)]
        test: usize,
        #[arg(long)]
        step: usize,
    },

    /// Split the plan's timeline at a single RFC 3339 cut-off
    Naive {
        /// Path to plan.toml
        plan: PathBuf,

        /// First instant of the test set
        #[arg(long)]
        train_end: String,

        #[arg(long)]
        compact: bool,
    },
}

fn load_plan(path: &Path) -> Plan {
    match Plan::load(path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error loading plan: {e}");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Command::Plan { plan, compact } => {
            let plan = load_plan(&plan);
            run::plan_records(&plan, compact).and_then(|r| run::write_records(&mut out, &r))
        }
        Command::Count {
            n,
            train,
            test,
            step,
        } => run::count(n, train, test, step)
            .and_then(|c| writeln!(out, "{c}").map_err(Error::from)),
        Command::Naive {
            plan,
            train_end,
            compact,
        } => {
            let plan = load_plan(&plan);
            run::naive_record(&plan, &train_end, compact)
                .and_then(|r| run::write_records(&mut out, std::slice::from_ref(&r)))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
