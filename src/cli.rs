use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect and edit vulnerability scanner filter strings
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Console configuration file (TOML)
    #[arg(long, global = true, env = "SCAN_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Restore default paging and sorting onto input filters
    #[arg(long, global = true)]
    pub defaults: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the terms of a filter
    Parse {
        filter: String,
    },
    /// Page after the current one
    Next {
        filter: String,
    },
    /// Page before the current one
    Previous {
        filter: String,
    },
    /// Page starting at a given row
    First {
        filter: String,
        #[arg(default_value_t = 1)]
        row: i64,
    },
    /// All rows on one page
    All {
        filter: String,
    },
    /// Criteria only, without paging and sorting
    Simple {
        filter: String,
    },
    /// Set a term, replacing an existing one for the same keyword
    Set {
        filter: String,
        keyword: String,
        value: String,
        /// Relation: =, !=, ~, <, >
        #[arg(short, long, default_value = "=")]
        relation: String,
    },
    /// Remove the first term for a keyword
    Delete {
        filter: String,
        keyword: String,
    },
    /// Change sort field or direction
    Sort {
        filter: String,
        /// Field to sort by
        #[arg(long)]
        by: Option<String>,
        /// Direction: sort, sort-reverse, asc, desc
        #[arg(long)]
        order: Option<String>,
    },
    /// Combine two filters
    Merge {
        base: String,
        other: String,
        #[arg(short, long, value_enum, default_value_t = MergeMode::Append)]
        mode: MergeMode,
    },
    /// Check whether two filters select the same thing
    Compare {
        first: String,
        second: String,
    },
    /// Show the predefined filter for a resource type
    Canonical {
        /// Resource type (task, target, port_list, ...), omit to list all
        entity: Option<String>,
    },
    /// Show the request parameter a filter is sent as
    Param {
        filter: String,
        /// Id of the saved filter this string belongs to
        #[arg(long)]
        id: Option<String>,
    },
    /// Load a saved filter record (JSON)
    Record {
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MergeMode {
    /// Append every term
    Append,
    /// Append terms whose keyword is not set yet
    Keywords,
    /// Add missing paging and sorting terms
    Extra,
    /// Join with an explicit `and`
    And,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Default log directive for the verbosity flag
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
