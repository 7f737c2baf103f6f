use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Command-line arguments.
///
/// Every setting that may also come from the config file is optional here,
/// so that an absent flag falls through to the config file and then to the
/// built-in defaults.
#[derive(Parser, Debug)]
#[command(
    name = "inventory-guard",
    about = "Semantic guard for Ansible inventory changes.",
    version
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the current inventory
    #[arg(short = 'c', long)]
    pub current: Option<PathBuf>,

    /// Path to the candidate inventory
    #[arg(short = 'n', long)]
    pub new: Option<PathBuf>,

    /// Max % host churn vs current (default 5.0)
    #[arg(long)]
    pub max_host_change_pct: Option<f64>,

    /// Max % variable key changes (default 2.0)
    #[arg(long)]
    pub max_var_change_pct: Option<f64>,

    /// Absolute host churn cap, 0 for none (default 0)
    #[arg(long)]
    pub max_host_change_abs: Option<u64>,

    /// Absolute variable change cap, 0 for none (default 0)
    #[arg(long)]
    pub max_var_change_abs: Option<u64>,

    /// Regex for volatile variable keys to ignore (repeatable)
    #[arg(long = "ignore-key-regex", value_name = "REGEX")]
    pub ignore_key_regex: Vec<String>,

    /// Keys to treat as unordered sets when the value is a list of scalars (repeatable)
    #[arg(long = "set-like-key-regex", value_name = "REGEX")]
    pub set_like_key_regex: Vec<String>,

    /// Print the JSON summary to stdout
    #[arg(long)]
    pub json: bool,

    /// Write the JSON summary to this path
    #[arg(long, value_name = "PATH")]
    pub json_out: Option<PathBuf>,

    /// Write a Markdown report to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Log to stderr (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
