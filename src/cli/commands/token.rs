use anyhow::Context;
use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Issue a bearer token for a user id")]
    Issue {
        #[arg(long, help = "User id the token authenticates (random when omitted)")]
        user_id: Option<Uuid>,
        #[arg(long, default_value = "dev", help = "Display name carried in the token")]
        user: String,
        #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Issue { user_id, user, hours } => {
            let config = config::config();
            let user_id = user_id.unwrap_or_else(Uuid::new_v4);
            let hours = hours.unwrap_or(config.security.jwt_expiry_hours);

            let claims = Claims::new(user_id, user, hours);
            let token = generate_jwt(&claims, &config.security.jwt_secret)
                .context("cannot issue token (is JWT_SECRET set?)")?;

            match output_format {
                OutputFormat::Text => println!("{}", token),
                OutputFormat::Json => output_success(
                    &output_format,
                    "Token issued",
                    Some(json!({
                        "token": token,
                        "user_id": user_id,
                        "expires_at": claims.exp,
                    })),
                )?,
            }
            Ok(())
        }
    }
}
