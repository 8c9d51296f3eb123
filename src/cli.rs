//! Small operator CLI for tasks that otherwise need a running server:
//! hashing a password for a manual INSERT, minting a token for curl
//! sessions, and dumping the effective configuration.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::auth::{password, token};
use crate::config;
use crate::models::Role;

#[derive(Parser)]
#[command(name = "hrm")]
#[command(about = "HRM operator CLI - password hashing, token minting, config inspection")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Hash a password for manual account provisioning")]
    HashPassword {
        #[arg(help = "Plaintext password to hash")]
        password: String,
    },

    #[command(about = "Mint a bearer token for an existing user id")]
    MintToken {
        #[arg(help = "User id (UUID)")]
        user_id: Uuid,

        #[arg(long, default_value = "EMPLOYEE", help = "ADMIN, HR, MANAGER or EMPLOYEE")]
        role: String,

        #[arg(long, default_value = "24h", help = "Token lifetime, e.g. 90s, 15m, 24h, 7d")]
        ttl: String,
    },

    #[command(about = "Print the effective configuration as JSON")]
    Config,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::HashPassword { password } => {
            let hashed = password::hash(&password).context("hashing failed")?;
            println!("{hashed}");
        }
        Commands::MintToken { user_id, role, ttl } => {
            let role: Role = role
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("invalid role")?;
            let Some(ttl) = token::parse_ttl(&ttl) else {
                bail!("invalid ttl (expected forms like 90s, 15m, 24h, 7d)");
            };
            let token = token::issue(user_id, role, ttl).context("token signing failed")?;
            println!("{token}");
        }
        Commands::Config => {
            let mut cfg = config::config().clone();
            if !cfg.security.jwt_secret.is_empty() {
                cfg.security.jwt_secret = "<set>".to_string();
            }
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
    }

    Ok(())
}
