use anyhow::{Context, Result, bail};
use clap::Parser;

use linkhub::cli::{Cli, Commands};
use linkhub::config::{StaticConfig, get_config, init_config_from};
use linkhub::errors::LinkhubError;

fn generate_config(output: &str, force: bool) -> Result<()> {
    if std::path::Path::new(output).exists() && !force {
        bail!("{} already exists, use --force to overwrite", output);
    }
    StaticConfig::default()
        .save_to_file(output)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", output, e))?;
    println!("Sample configuration written to {}", output);
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::GenerateConfig { output, force } => generate_config(&output, force),
        Commands::Serve => {
            init_config_from(&cli.config);
            let config = get_config();
            let _guard = linkhub::system::logging::init_logging(&config)
                .context("Failed to initialize logging")?;
            if let Err(e) = linkhub::runtime::run_server().await {
                match e.downcast_ref::<LinkhubError>() {
                    Some(err) => eprintln!("{}", err.format_colored()),
                    None => eprintln!("[ERROR] {:#}", e),
                }
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
