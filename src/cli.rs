//! Command line arguments.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the report is written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Explanation followed by an aligned table
    Table,
    Csv,
    Json,
}

impl Format {
    /// File extension used for exports in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Table | Format::Csv => "csv",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "subnet-planner")]
#[command(about = "Plan IPv4 subnets for a base network", long_about = None)]
pub struct Cli {
    /// Base network, e.g. 101.0.0.0/8 (host bits are ignored)
    pub network: Option<String>,

    /// Minimum number of subnets to create
    #[arg(short, long, conflicts_with = "prefix")]
    pub count: Option<u64>,

    /// Explicit prefix length of the subnets
    #[arg(short, long)]
    pub prefix: Option<u8>,

    /// 1-based index of the first subnet to list
    #[arg(short, long, default_value_t = 1)]
    pub start: u64,

    /// Number of subnets to list
    #[arg(short, long)]
    pub list: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Export file, defaults to subnet_table_<date>.<ext> when --export is set
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the listed subnets to a file
    #[arg(short, long)]
    pub export: bool,

    /// Print a previously exported CSV or JSON file instead of planning
    #[arg(long, conflicts_with_all = ["network", "count", "prefix", "export"])]
    pub import: Option<PathBuf>,
}
