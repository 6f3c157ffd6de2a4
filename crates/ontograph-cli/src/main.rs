use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ontograph_core::{Config, OntologyManager, TsvDirectory};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "ontograph")]
#[command(about = "Query ontology term graphs built from exported closure tables", long_about = None)]
struct Cli {
    /// Directory holding the exported tables (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of the default locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Raise the log level (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show counts for the loaded ontology
    Stats,
    /// Show a term with its synonyms, alternate ids and mappings
    Term {
        /// Term id or alternate id
        id: String,
    },
    /// List every ancestor of a term
    Ancestors {
        id: String,
    },
    /// List the direct parents of a term
    Parents {
        id: String,
    },
    /// Show descendant paths of a term
    Descendants {
        id: String,

        /// Print the set of descendant terms instead of paths
        #[arg(long)]
        flat: bool,
    },
    /// Show cross-ontology mappings of a term
    Mappings {
        id: String,

        /// Target ontology label (defaults to the configured target)
        #[arg(long)]
        ontology: Option<String>,
    },
    /// List terms directly below the root
    TopLevel,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn,ontograph_core=info",
        1 => "info,ontograph_core=debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.source.data_dir = dir.to_string_lossy().to_string();
    }

    if let Commands::Config = cli.command {
        print!("{}", config.to_toml_string());
        return Ok(());
    }

    let manager = load(config, cli.json).await?;
    let store = manager.snapshot();

    match cli.command {
        Commands::Stats => commands::stats(&store, cli.json),
        Commands::Term { id } => commands::term(&store, &id, cli.json),
        Commands::Ancestors { id } => commands::ancestors(&store, &id, cli.json),
        Commands::Parents { id } => commands::parents(&store, &id, cli.json),
        Commands::Descendants { id, flat } => commands::descendants(&store, &id, flat, cli.json),
        Commands::Mappings { id, ontology } => {
            commands::mappings(&store, &id, ontology.as_deref(), cli.json)
        }
        Commands::TopLevel => commands::top_level(&store, cli.json),
        Commands::Config => Ok(()),
    }
}

/// Loads the ontology on the blocking pool behind a spinner.
async fn load(config: Config, quiet: bool) -> Result<OntologyManager<TsvDirectory>, CliError> {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Loading ontology from {}", config.source.data_dir));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = tokio::task::spawn_blocking(move || {
        let source = TsvDirectory::from_config(&config.source)?;
        Ok::<_, CliError>(OntologyManager::load(source, config)?)
    })
    .await;

    spinner.finish_and_clear();
    result?
}
