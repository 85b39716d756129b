use clap::Subcommand;

use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Print the configuration the server would start with")]
    Show,
}

pub async fn handle(cmd: ConfigCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let shown = config::config().redacted();
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shown)?),
                OutputFormat::Text => {
                    println!("environment: {:?}", shown.environment);
                    println!("listen:      {}", shown.bind_addr());
                    println!(
                        "store:       {}",
                        if shown.database.url.is_some() { "postgres" } else { "memory" }
                    );
                    println!("jwt secret:  {}", if shown.security.jwt_secret.is_empty() { "(unset)" } else { "set" });
                    println!("jwt expiry:  {}h", shown.security.jwt_expiry_hours);
                    println!("cors:        {}", shown.security.cors_origins.join(", "));
                }
            }
            Ok(())
        }
    }
}
