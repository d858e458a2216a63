use clap::{Parser, Subcommand, ValueEnum};
use costwise::pricing::{Period, RankMetric};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "costwise", version, about = "AI model cost calculator")]
pub struct Cli {
    /// Pricing catalog file (JSON or TOML); built-in catalog if omitted
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compare generative model costs for a conversation workload (default)
    Compare {
        #[command(flatten)]
        usage: GenerativeArgs,

        /// Ranking metric
        #[arg(short, long, value_enum, default_value = "yearly")]
        sort: SortArg,

        /// Only show models from this provider
        #[arg(short, long)]
        provider: Option<String>,

        #[command(flatten)]
        currency: CurrencyArgs,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Compare embedding model costs for a token volume
    Embedding {
        /// Word count to embed over the period
        #[arg(short, long, default_value = "0")]
        words: f64,

        /// Token count to embed; overrides --words when positive
        #[arg(short, long)]
        tokens: Option<f64>,

        /// Period the volume covers
        #[arg(long, value_enum, default_value = "daily")]
        period: PeriodArg,

        /// Billable days per year (configured default when omitted)
        #[arg(long)]
        days_per_year: Option<u32>,

        #[command(flatten)]
        currency: CurrencyArgs,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Compare two models head to head
    HeadToHead {
        /// First model id (the comparison reference)
        model_a: String,

        /// Second model id
        model_b: String,

        #[command(flatten)]
        usage: GenerativeArgs,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run a business scenario with insights and resale pricing
    Scenario {
        #[command(flatten)]
        usage: GenerativeArgs,

        /// Resale margin percentage for the pricing overlay
        #[arg(long, default_value = "50")]
        margin: f64,

        /// Show the resale overlay for this model only (cheapest if omitted)
        #[arg(long)]
        model: Option<String>,

        #[command(flatten)]
        currency: CurrencyArgs,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the pricing catalog
    Models,

    /// Show version information
    Version,
}

/// Conversation-volume arguments shared by the generative commands
#[derive(clap::Args, Debug, Clone)]
pub struct GenerativeArgs {
    /// Conversations per day
    #[arg(short = 'c', long, default_value = "70000")]
    pub conversations: u64,

    /// Messages per conversation
    #[arg(short = 'm', long, default_value = "5")]
    pub messages: u64,

    /// Input words per message
    #[arg(short = 'i', long, default_value = "30")]
    pub input_words: f64,

    /// Output words per message
    #[arg(short = 'o', long, default_value = "200")]
    pub output_words: f64,

    /// Billable days per year (configured default when omitted)
    #[arg(long)]
    pub days_per_year: Option<u32>,
}

/// Display-currency arguments; conversion happens at presentation only
#[derive(clap::Args, Debug, Clone)]
pub struct CurrencyArgs {
    /// Exchange rate from USD to the display currency
    #[arg(short = 'r', long, default_value = "1.0")]
    pub rate: f64,

    /// Display currency symbol
    #[arg(long, default_value = "$")]
    pub symbol: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    Yearly,
    Monthly,
    PerMessage,
    Efficiency,
}

impl From<SortArg> for RankMetric {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Yearly => RankMetric::YearlyTotal,
            SortArg::Monthly => RankMetric::MonthlyTotal,
            SortArg::PerMessage => RankMetric::PerMessage,
            SortArg::Efficiency => RankMetric::Efficiency,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodArg {
    Daily,
    Monthly,
    Yearly,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Daily => Period::Daily,
            PeriodArg::Monthly => Period::Monthly,
            PeriodArg::Yearly => Period::Yearly,
        }
    }
}

impl Cli {
    /// Get the command to execute, defaulting to Compare if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Compare {
            usage: GenerativeArgs {
                conversations: 70_000,
                messages: 5,
                input_words: 30.0,
                output_words: 200.0,
                days_per_year: None,
            },
            sort: SortArg::Yearly,
            provider: None,
            currency: CurrencyArgs {
                rate: 1.0,
                symbol: "$".to_string(),
            },
            json: false,
        })
    }
}
