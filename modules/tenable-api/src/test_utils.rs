use std::time::Duration;
use wiremock::MockServer;

use crate::{ClientOptions, Credentials, TenableClient};

pub fn client_for(server: &MockServer) -> TenableClient {
    let creds = Credentials::new("ak", "sk").unwrap();
    let opts = ClientOptions { base_url: server.uri(), timeout: Duration::from_secs(5) };
    TenableClient::new(&creds, &opts).unwrap()
}
