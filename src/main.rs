use clap::{Parser, Subcommand};
use policy_analyzer::commands::*;
use policy_analyzer::core::{error::Result, print_error};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "policy-analyzer")]
#[command(about = "Compare a policy set against released versions")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the version a policy set is based on and report changes
    Analyze {
        /// Policy set directory
        #[arg(default_value = ".")]
        path: PathBuf,
        /// PATH is the parent of the masterfiles directory
        #[arg(short = 'p', long)]
        parent: bool,
        /// Compare against this version instead of detecting one
        #[arg(long)]
        reference_version: Option<String>,
        /// Name of the masterfiles directory in parent layout
        #[arg(long)]
        masterfiles_dir: Option<String>,
        /// Extra path components to skip (comma separated, trailing / for directories)
        #[arg(long, value_delimiter = ',')]
        ignored_path_components: Vec<String>,
        /// Only use cached release information
        #[arg(long)]
        offline: bool,
        /// Read release information from this directory
        #[arg(long)]
        release_info_dir: Option<PathBuf>,
        /// Cache directory for downloaded release information
        #[arg(long)]
        cache_dir: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// List unmodified files and version votes
        #[arg(short, long)]
        verbose: bool,
    },
    /// Build release information from directories named after versions
    GenerateReleaseInformation {
        /// Directory holding one masterfiles tree per version
        releases_dir: PathBuf,
        /// Where to write the documents (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Extra path components to skip (comma separated, trailing / for directories)
        #[arg(long, value_delimiter = ',')]
        ignored_path_components: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let result = match cli.command {
        Commands::Analyze {
            path,
            parent,
            reference_version,
            masterfiles_dir,
            ignored_path_components,
            offline,
            release_info_dir,
            cache_dir,
            json,
            verbose,
        } => execute_analyze(AnalyzeOptions {
            path,
            parent,
            reference_version,
            masterfiles_dir,
            ignored_path_components,
            offline,
            release_info_dir,
            cache_dir,
            json,
            verbose,
        }),
        Commands::GenerateReleaseInformation {
            releases_dir,
            output_dir,
            ignored_path_components,
        } => execute_generate_release_information(
            releases_dir,
            output_dir,
            ignored_path_components,
        ),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
