use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xliffgen::Target;
use xliffgen_cli::{
    convert::run_convert_command, log_level, parse_target, view::run_view_command,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,

    /// Increase log output (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a raw translations directory for one platform.
    Convert {
        /// Output platform: android, desktop or ios
        #[arg(short, long, value_parser = parse_target)]
        target: Target,

        /// Directory holding `_project_info.json`, the glossary and the `.xliff` files
        input_dir: PathBuf,

        /// Directory the converted translations are written to
        output_dir: PathBuf,

        /// File the non-translatable constants are written to
        constants_path: PathBuf,

        /// Configuration file (defaults to `xliffgen.toml` when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the translations parsed from one XLIFF document.
    View {
        /// The XLIFF document to view
        input: PathBuf,

        /// Parse the way this platform would (source fallback for ios)
        #[arg(short, long, value_parser = parse_target)]
        target: Option<Target>,

        /// Display full value without truncation
        #[arg(long)]
        full: bool,
    },
}

fn init_logging(verbosity: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.commands {
        Commands::Convert {
            target,
            input_dir,
            output_dir,
            constants_path,
            config,
        } => run_convert_command(
            target,
            &input_dir,
            &output_dir,
            &constants_path,
            config.as_deref(),
        )
        .map(|_| ()),
        Commands::View {
            input,
            target,
            full,
        } => run_view_command(&input, target, full),
    };

    if let Err(e) = result {
        println!("❌ An error occurred");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
