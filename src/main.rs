use anyhow::Result;
use clap::{Parser, Subcommand};

/// potluck - Shared shopping list for potluck meals
#[derive(Parser)]
#[command(name = "potluck")]
#[command(about = "Aggregated shopping list for a shared meal plan", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Plan snapshot (overrides config file)
    #[arg(long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the aggregated shopping list
    List {
        /// Only dishes claimed by this person
        #[arg(long)]
        person: Option<String>,
    },
    /// Mark a row as bought across all of its sources
    Check {
        name: String,

        #[arg(long)]
        person: Option<String>,
    },
    /// Mark a row as not bought
    Uncheck {
        name: String,

        #[arg(long)]
        person: Option<String>,
    },
    /// Uncheck every row of the list
    Reset {
        #[arg(long)]
        person: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = potluck::config::Config::load(cli.config.clone())?;
    if let Some(store) = cli.store {
        config.store.path = store;
    }
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    potluck::observability::init_observability(
        "potluck",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::List { person } => potluck::cli::list(config, person).await,
        Commands::Check { name, person } => {
            potluck::cli::set_checked(config, name, person, true).await
        }
        Commands::Uncheck { name, person } => {
            potluck::cli::set_checked(config, name, person, false).await
        }
        Commands::Reset { person } => potluck::cli::reset(config, person).await,
    }
}
