use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use polecalc::analysis::{compute_analysis, AnalysisInput};
use polecalc::cli::{Cli, Commands, OutputFormat};
use polecalc::config::{load_config, parse_profile};
use polecalc::output::{cables_table, create_writer, presets_table};
use polecalc::units::{format_feet_inches_tick_marks, format_feet_inches_verbose, parse_feet_str};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            profile,
            preset,
            format,
            output,
            verbosity,
        } => {
            init_tracing(verbosity);
            handle_analyze(AnalyzeArgs {
                input,
                profile,
                preset,
                format,
                output,
            })
        }
        Commands::Format { value, verbose } => {
            let Some(feet) = parse_feet_str(&value) else {
                bail!("could not read '{}' as a height", value);
            };
            let formatted = if verbose {
                format_feet_inches_verbose(feet)
            } else {
                format_feet_inches_tick_marks(feet)
            };
            println!("{formatted}");
            Ok(())
        }
        Commands::Presets => {
            println!("{}", presets_table());
            Ok(())
        }
        Commands::Cables => {
            println!("{}", cables_table());
            Ok(())
        }
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

struct AnalyzeArgs {
    input: PathBuf,
    profile: Option<PathBuf>,
    preset: Option<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read input from stdin")?;
        Ok(contents)
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let raw = read_input(&args.input)?;
    let input: AnalysisInput = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse analysis input {}", args.input.display()))?;

    let mut input = load_config().apply_defaults(input);

    if let Some(path) = &args.profile {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile {}", path.display()))?;
        let file_profile = parse_profile(&contents).map_err(anyhow::Error::msg)?;
        input.submission_profile = Some(match input.submission_profile.take() {
            Some(base) => base.overlay(&file_profile),
            None => file_profile,
        });
    }
    if let Some(preset) = args.preset {
        input.preset = Some(preset);
    }

    let outcome = compute_analysis(&input);

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    create_writer(args.format, sink).write_outcome(&outcome)?;

    if !outcome.ok {
        bail!(
            "analysis rejected: {}",
            outcome.errors.keys().cloned().collect::<Vec<_>>().join(", ")
        );
    }
    Ok(())
}
