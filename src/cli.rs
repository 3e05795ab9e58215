//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use coverform::state::ProgressPolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "coverform",
    version,
    about = "Evaluate, normalize and submit insurance comparison forms",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Configuration file (defaults to the per-user config location)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a form definition for schema errors
    Check(CheckArgs),
    /// Print visible steps, errors and progress for a set of values
    Inspect(InspectArgs),
    /// Print the backend payload for a set of values
    Normalize(NormalizeArgs),
    /// Fetch the definition, validate, normalize and submit
    Submit(SubmitArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Form definition JSON document
    #[arg(long, value_name = "FILE")]
    pub definition: PathBuf,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Form definition JSON document
    #[arg(long, value_name = "FILE")]
    pub definition: PathBuf,

    /// Current values as a JSON object
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Progress denominator policy (overrides the configuration)
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Comparison category (auto, moto, home, health, ...)
    #[arg(long)]
    pub category: String,

    /// Raw values as a JSON object
    #[arg(long, value_name = "FILE")]
    pub values: PathBuf,

    /// Also print the names of dropped fields on stderr
    #[arg(long)]
    pub report: bool,
}

#[derive(Parser, Debug)]
pub struct SubmitArgs {
    /// Comparison category
    #[arg(long)]
    pub category: String,

    /// Raw values as a JSON object
    #[arg(long, value_name = "FILE")]
    pub values: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    AllRequired,
    VisibleRequired,
}

impl From<PolicyArg> for ProgressPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::AllRequired => ProgressPolicy::AllRequired,
            PolicyArg::VisibleRequired => ProgressPolicy::VisibleRequired,
        }
    }
}
