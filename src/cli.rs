use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "polecalc")]
#[command(about = "Pole attachment clearance and make-ready calculator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one pole attachment job
    Analyze {
        /// JSON file holding the analysis input record (`-` reads stdin)
        input: PathBuf,

        /// Submission profile TOML file, layered over any project profile
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Clearance preset name (overrides the input and project config)
        #[arg(long)]
        preset: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Increase log verbosity (-v debug, -vv trace)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Parse a height and print it in feet and inches
    Format {
        /// Height such as `35' 6"`, `35ft 6in`, `10in`, or `35.5`
        value: String,

        /// Print `35ft 6in` instead of `35' 6"`
        #[arg(long)]
        verbose: bool,
    },

    /// List clearance presets
    Presets,

    /// List the cable catalog
    Cables,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}
