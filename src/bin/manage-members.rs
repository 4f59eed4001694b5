//! Administer the member registry that gates announcement writes.
//!
//! Usage: manage-members <add ID [--name NAME] | remove ID | list>

use anyhow::Context;
use clap::{Parser, Subcommand};

use announcements_api::db::{self, PgMembershipRegistry};

#[derive(Parser)]
#[command(name = "manage-members", about = "Manage members allowed to publish announcements")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a member (or update its display name)
    Add {
        id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove a member; their announcements are kept
    Remove { id: String },
    /// List registered members
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL environment variable not set")?;
    let pool = db::create_pool(&database_url, 2).await?;
    db::run_migrations(&pool).await?;
    let registry = PgMembershipRegistry::new(pool);

    match args.command {
        Command::Add { id, name } => {
            let member = registry.add(&id, name.as_deref()).await?;
            tracing::info!("Registered member {}", member.id);
        }
        Command::Remove { id } => {
            if registry.remove(&id).await? {
                tracing::info!("Removed member {}", id);
            } else {
                tracing::warn!("No member with id {}", id);
            }
        }
        Command::List => {
            let members = registry.list().await?;
            for m in &members {
                println!(
                    "{}\t{}\t{}",
                    m.id,
                    m.display_name.as_deref().unwrap_or("-"),
                    m.created_at.to_rfc3339()
                );
            }
            tracing::info!("{} member(s)", members.len());
        }
    }

    Ok(())
}
