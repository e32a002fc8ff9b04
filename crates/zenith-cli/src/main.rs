mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{admin::AdminSubcommand, catalog::CatalogSubcommand, config::ConfigSubcommand};
use std::path::PathBuf;
use zenith_core::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(
    name = "zenith",
    about = "ZenithView site server and back-office tools",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to the site config file (environment variables override it)
    #[arg(long, global = true, env = "ZENITH_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(long, short = 'p')]
        port: Option<u16>,
        /// Interface to bind (overrides the config file)
        #[arg(long)]
        host: Option<String>,
        /// Use a process-local store instead of Supabase
        #[arg(long)]
        in_memory: bool,
        /// Open the site in a browser once listening
        #[arg(long)]
        open: bool,
    },

    /// Inspect and check the site configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Browse the built-in catalog (services, jobs, case studies, pricing)
    Catalog {
        #[command(subcommand)]
        subcommand: CatalogSubcommand,
    },

    /// Triage leads, applications and posts from the terminal
    Admin {
        #[command(subcommand)]
        subcommand: AdminSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Serve {
            port,
            host,
            in_memory,
            open,
        } => cmd::serve::run(
            &cli.config,
            cmd::serve::ServeOptions {
                port,
                host,
                in_memory,
                open,
            },
        ),
        Commands::Config { subcommand } => cmd::config::run(&cli.config, subcommand, cli.json),
        Commands::Catalog { subcommand } => cmd::catalog::run(subcommand, cli.json),
        Commands::Admin { subcommand } => cmd::admin::run(&cli.config, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
