use anyhow::Result;
use clap::{Parser, Subcommand};
use foodgram::cli;

/// foodgram - recipe sharing backend
#[derive(Parser)]
#[command(name = "foodgram")]
#[command(about = "Recipes, favorites, subscriptions and shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Manage recipe tags
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Manage the ingredient catalog
    Ingredient {
        #[command(subcommand)]
        command: IngredientCommands,
    },
    /// User utilities
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum TagCommands {
    Add {
        name: String,
        /// HEX color, e.g. #E26C2D
        color: String,
        slug: String,
    },
}

#[derive(Subcommand)]
enum IngredientCommands {
    Add {
        name: String,
        measurement_unit: String,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Print a bearer token for the given credentials
    Token { email: String, password: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = foodgram::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    foodgram::observability::init_observability(
        "foodgram",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::serve(config, host, port).await,
        Commands::Migrate => cli::migrate(&config).await,
        Commands::Reset => cli::reset(&config).await,
        Commands::Tag {
            command: TagCommands::Add { name, color, slug },
        } => cli::add_tag(&config, name, color, slug).await,
        Commands::Ingredient {
            command:
                IngredientCommands::Add {
                    name,
                    measurement_unit,
                },
        } => cli::add_ingredient(&config, name, measurement_unit).await,
        Commands::User {
            command: UserCommands::Token { email, password },
        } => cli::issue_token(&config, email, password).await,
    }
}
