use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod config;
mod settings;

use cli::Cli;
use settings::Settings;
use tenable_api::{ClientOptions, Credentials, TenableClient};

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,tio_assets=info,tenable_api=info,asset_store=info",
        _ => "warn,tio_assets=debug,tenable_api=debug,asset_store=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
        .with(filter)
        .init();
}

fn connect(settings: &Settings) -> Result<TenableClient, tenable_api::ApiError> {
    let creds = Credentials::from_env()?;
    let opts = ClientOptions { base_url: settings.api_url.clone(), timeout: settings.timeout };
    TenableClient::new(&creds, &opts)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loaded_cfg = config::load_config(cli.config.as_deref());
    let settings = Settings::resolve(&cli, loaded_cfg.as_ref(), std::env::var(settings::URL_VAR).ok());
    let plan = cli.plan();

    if plan.is_empty() {
        println!("No command specified. Use --help for usage information.");
        return Ok(());
    }

    let client = if plan.needs_client() {
        match connect(&settings) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let ctx = commands::Context { settings: &settings, client: client.as_ref() };
    let summary = rt.block_on(commands::run(&plan, &ctx));
    tracing::info!(completed = ?summary.completed, failed = ?summary.failed, "run finished");
    Ok(())
}
