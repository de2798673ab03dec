use clap::{Parser, Subcommand, ValueEnum};

use partita::recover::StrategyKind;

#[derive(Debug, Parser)]
#[command(name = "partita")]
#[command(about = "Integer partitions and the partition-sum password schema.")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Strategy selector for the recover command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyFilter {
    Backtracking,
    Mitm,
}

impl From<StrategyFilter> for StrategyKind {
    fn from(f: StrategyFilter) -> Self {
        match f {
            StrategyFilter::Backtracking => StrategyKind::Backtracking,
            StrategyFilter::Mitm => StrategyKind::MeetInTheMiddle,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute p(n), the number of integer partitions of n
    Count {
        /// Argument of the partition function
        #[arg(default_value = "171")]
        n: u64,
    },

    /// Encode a password to its Z value under the default schema
    Encode {
        /// Password to encode; read from stdin when omitted
        password: Option<String>,
    },

    /// Search for passwords that encode to a given Z value
    Recover {
        /// The encoded value to invert
        z: String,

        /// Search strategy
        #[arg(long, value_enum, default_value = "backtracking")]
        strategy: StrategyFilter,

        /// Minimum password length to try
        #[arg(long, default_value = "1")]
        min_len: usize,

        /// Maximum password length to try
        #[arg(long, default_value = "4")]
        max_len: usize,

        /// Maximum number of solutions to report (0 = unlimited)
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Dump the character-to-weight lookup table
    Table,
}
