use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod build;
mod commands;
mod config;
mod util;

#[derive(Parser)]
#[command(name = "quire", version, about)]
struct Args {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    /// The command to execute
    #[command(subcommand)]
    command: QuireCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the blog in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The path to the configuration file (defaults to quire.yaml, optional)
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Render posts marked `published: false`
    #[arg(short, long, default_value = "false")]
    drafts: bool,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file (defaults to quire.yaml, optional)
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Only print what would be deleted
    #[arg(short = 'n', long, default_value = "false")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum QuireCommand {
    /// Initialize a new blog with a sample post and the built-in layouts
    Init(InitArgs),

    /// Build the blog into the output directory
    Build(BuildArgs),

    /// Delete the generated output directory
    Clean(CleanArgs),
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    // --verbose forces debug output, otherwise use RUST_LOG or default to info
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match args.command {
        QuireCommand::Init(args) => {
            commands::init::run(&args)?;
        }
        QuireCommand::Build(args) => {
            commands::build::run(&args)?;
        }
        QuireCommand::Clean(args) => {
            commands::clean::run(&args)?;
        }
    }

    Ok(())
}
