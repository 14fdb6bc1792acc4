use clap::Parser;
use std::time::Duration;
use tenable_api::{ClientOptions, Credentials, TenableClient};
use wiremock::MockServer;

use crate::cli::Cli;
use crate::settings::Settings;

pub fn client_for(server: &MockServer) -> TenableClient {
    let creds = Credentials::new("ak", "sk").unwrap();
    let opts = ClientOptions { base_url: server.uri(), timeout: Duration::from_secs(5) };
    TenableClient::new(&creds, &opts).unwrap()
}

/// Parses `args` as a command line and resolves settings with no config file.
pub fn cli_settings(args: &[&str]) -> (Cli, Settings) {
    let mut argv = vec!["tio-assets"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut settings = Settings::resolve(&cli, None, None);
    settings.poll_interval = Duration::from_millis(10);
    (cli, settings)
}
