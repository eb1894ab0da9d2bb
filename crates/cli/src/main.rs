//! True Feedback CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create or update the users, messages and sessions tables
//! tf-cli migrate
//!
//! # Show a user's profile and message count
//! tf-cli user show --username nina
//!
//! # Delete a user and all of their messages
//! tf-cli user delete --username nina
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user show` - Inspect a user
//! - `user delete` - Remove a user

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tf-cli")]
#[command(author, version, about = "True Feedback CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations (schema and session store)
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Print a user's profile and message count
    Show {
        /// Username to look up
        #[arg(short, long)]
        username: String,
    },
    /// Delete a user; their messages are removed with them
    Delete {
        /// Username to delete
        #[arg(short, long)]
        username: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::User { action } => match action {
            UserAction::Show { username } => commands::user::show(&username).await,
            UserAction::Delete { username } => commands::user::delete(&username).await,
        },
    }
}
