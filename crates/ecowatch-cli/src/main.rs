use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::Context;
use commands::records::{NewRecordArgs, RecordPatchArgs};

#[derive(Parser)]
#[command(name = "ecowatch")]
#[command(about = "Ecowatch CLI - report and browse pollution sightings", long_about = None)]
struct Cli {
    /// Keep every file under this directory instead of the user config and runtime dirs
    #[arg(long, global = true, env = "ECOWATCH_HOME")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the session for this login session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ECOWATCH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "ECOWATCH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Show the logged-in user
    Whoami {
        /// Re-fetch the profile from the server
        #[arg(long)]
        refresh: bool,
    },
    /// List reports, optionally filtered by title, place or type
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    Show {
        id: i64,
    },
    /// Report a new pollution sighting
    Create(NewRecordArgs),
    Update {
        id: i64,
        #[command(flatten)]
        patch: RecordPatchArgs,
    },
    Delete {
        id: i64,
    },
    /// Interactive live search
    Browse,
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
    /// Print the config file location and the effective settings
    Config,
}

#[derive(Subcommand)]
enum FavoritesAction {
    List,
    Add { id: i64 },
    Remove { id: i64 },
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut ctx = Context::load(cli.home.as_deref()).await?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&ctx, &email, &password).await?
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::session::register(&ctx, &name, &email, &password).await?,
        Commands::Logout => commands::session::logout(&ctx).await?,
        Commands::Whoami { refresh } => commands::session::whoami(&ctx, refresh).await?,
        Commands::List { search } => commands::records::list(&ctx, search.as_deref()).await?,
        Commands::Show { id } => commands::records::show(&ctx, id).await?,
        Commands::Create(args) => commands::records::create(&ctx, args).await?,
        Commands::Update { id, patch } => commands::records::update(&ctx, id, patch).await?,
        Commands::Delete { id } => commands::records::delete(&ctx, id).await?,
        Commands::Browse => commands::browse::run(&mut ctx).await?,
        Commands::Favorites { action } => match action.unwrap_or(FavoritesAction::List) {
            FavoritesAction::List => commands::favorites::list(&ctx),
            FavoritesAction::Add { id } => commands::favorites::add(&mut ctx, id).await?,
            FavoritesAction::Remove { id } => commands::favorites::remove(&mut ctx, id).await?,
            FavoritesAction::Clear => commands::favorites::clear(&mut ctx).await?,
        },
        Commands::Config => commands::show_config(&ctx)?,
    }

    Ok(())
}
