//! faqsync CLI - Sync course FAQ documents into a local searchable store

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::Context;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// faqsync - Sync course FAQ documents into a local searchable store
#[derive(Parser)]
#[command(name = "faqsync")]
#[command(author = "Lalo Morales <lalomorales22@github.com>")]
#[command(version)]
#[command(about = "Sync course FAQ documents into a local searchable store", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the platform default
    #[arg(short, long, global = true, env = "FAQSYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Database location (file path or ":memory:"); overrides the config
    #[arg(short, long, global = true, env = "FAQSYNC_DATABASE")]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize faqsync (create config and database)
    Init,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Fetch, parse and store every configured FAQ document
    Run {
        /// Only process these source ids (can be specified multiple times)
        #[arg(short, long = "source")]
        sources: Vec<String>,

        /// Fetch and parse, but leave the store untouched
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse local .docx files without touching the store
    Parse {
        /// File or directory to parse
        path: PathBuf,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show stored records for a source
    Show {
        /// Source id
        source: String,

        /// Only show this section
        #[arg(short = 'S', long)]
        section: Option<String>,
    },

    /// Search stored questions and answers
    Search {
        /// Search query
        query: String,

        /// Maximum results
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// List recent sync runs
    Runs {
        /// Maximum number of runs to show
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },

    /// Show store statistics
    Stats,

    /// Export the stored records as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the config file location
    Path,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("faqsync=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("faqsync=info,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = Context::new(cli.config, cli.database);

    let result = match cli.command {
        Commands::Init => commands::init::run(&ctx),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(&ctx),
            ConfigCommands::Path => commands::config::path(&ctx),
        },
        Commands::Run { sources, dry_run } => commands::run::run(&ctx, &sources, dry_run),
        Commands::Parse { path, json } => commands::parse::run(&ctx, &path, json),
        Commands::Show { source, section } => commands::show::run(&ctx, &source, section.as_deref()),
        Commands::Search { query, limit } => commands::search::run(&ctx, &query, limit),
        Commands::Runs { limit } => commands::runs::run(&ctx, limit),
        Commands::Stats => commands::stats::run(&ctx),
        Commands::Export { output } => commands::export::run(&ctx, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
