use anyhow::Result;
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reposcore")]
#[command(about = "Rank repositories by contribution score computed from a commit log")]
#[command(version)]
pub struct Cli {
    #[arg(default_value = "commits.csv", help = "Commit log in CSV form (header row first)")]
    pub input: PathBuf,

    #[arg(long, default_value_t = crate::rank::DEFAULT_TOP, help = "Number of repositories to show (0 shows all)")]
    pub top: usize,

    #[arg(long, help = "Output as JSON", conflicts_with = "ndjson")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,

    #[clap(flatten)]
    pub exec: ExecArgs,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
}

#[derive(Args, Clone, Debug)]
pub struct ExecArgs {
    #[arg(long, help = "Worker threads for loading and aggregation")]
    pub jobs: Option<usize>,

    #[arg(long, help = "Process records on the current thread only", conflicts_with = "jobs")]
    pub sequential: bool,
}

impl ExecArgs {
    pub fn parallel(&self) -> bool {
        !self.sequential && self.jobs != Some(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Ndjson,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.ndjson {
            OutputFormat::Ndjson
        } else {
            OutputFormat::Table
        }
    }

    pub fn execute(self) -> Result<()> {
        init_logging(self.verbose);
        let format = self.format();
        crate::score::exec(&self.input, self.top, format, &self.exec)
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when running inside tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
