//! CLI application for procurement request intake.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, doctor, process, register};

/// Procurement request intake - extract fields from signed request
/// documents and keep the V°B° register
#[derive(Parser)]
#[command(name = "vobo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single request document
    Process(process::ProcessArgs),

    /// Process multiple request documents
    Batch(batch::BatchArgs),

    /// Inspect or export the V°B° register
    Register(register::RegisterArgs),

    /// Check extraction capabilities on this host
    Doctor(doctor::DoctorArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Process(args) => process::run(args, cli.config.as_deref()),
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()),
        Commands::Register(args) => register::run(args, cli.config.as_deref()),
        Commands::Doctor(args) => doctor::run(args),
        Commands::Config(args) => config::run(args),
    }
}
