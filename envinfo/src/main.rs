mod commands;
mod formatting;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use envinfo_core::Settings;
use tracing::Level;

#[derive(Parser)]
#[command(name = "envinfo")]
#[command(about = "Display environment info for a Magento installation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Root path of the installation
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Settings file (default: nearest .envinfo.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, action)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Display env info
    Info {
        /// Environment file to read instead of app/etc/env.php (.php or .json)
        #[arg(long)]
        env_file: Option<PathBuf>,
        /// Print without colors
        #[arg(long, action)]
        plain: bool,
    },
    /// Show which nginx config serves the installation and its log files
    Nginx {
        #[arg(long, action)]
        plain: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let root = std::fs::canonicalize(&cli.root).unwrap_or(cli.root);
    let settings = Settings::discover(&root, cli.config.as_deref())?;
    if let Some(ref source) = settings.source {
        tracing::debug!("Using settings from {}", source.display());
    }

    match cli.command {
        Commands::Info { env_file, plain } => commands::cmd_info(root, settings, env_file, plain)?,
        Commands::Nginx { plain } => commands::cmd_nginx(root, settings, plain)?,
    }

    Ok(())
}
