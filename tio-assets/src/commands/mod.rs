//! One module per command. Every command's failure is printed here and never
//! stops the commands after it.

mod asset_info;
mod export;
mod plugin_info;
mod scans;
mod search;
mod top;

#[cfg(test)]
pub(crate) mod test_utils;

use anyhow::{anyhow, Result};
use tenable_api::TenableClient;
use tio_core::Table;

use crate::cli::Plan;
use crate::settings::Settings;

pub struct Context<'a> {
    pub settings: &'a Settings,
    pub client: Option<&'a TenableClient>,
}

impl Context<'_> {
    fn client(&self) -> Result<&TenableClient> {
        self.client.ok_or_else(|| anyhow!("API client is not initialised"))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Step {
    Scans,
    Export,
    AssetInfo,
    PluginInfo,
    Search,
    Top,
}

/// Steps of one run, in execution order, split by outcome.
#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub completed: Vec<Step>,
    pub failed: Vec<Step>,
}

impl RunSummary {
    fn record<T>(&mut self, step: Step, result: Result<T>, describe: impl FnOnce(&anyhow::Error) -> String) -> Option<T> {
        match result {
            Ok(v) => {
                self.completed.push(step);
                Some(v)
            }
            Err(e) => {
                println!("{}", describe(&e));
                self.failed.push(step);
                None
            }
        }
    }
}

pub async fn run(plan: &Plan, ctx: &Context<'_>) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut dataset: Option<Table> = None;

    if plan.list_scans {
        let r = scans::list_successful(ctx).await;
        summary.record(Step::Scans, r, |e| format!("Error listing scans: {e:#}"));
    }

    if let Some(scope) = plan.export {
        let r = export::run(ctx, scope).await;
        dataset = summary.record(Step::Export, r, export::error_line).flatten();
    }

    if let Some(hostname) = &plan.asset_info {
        let r = asset_info::run(ctx, hostname).await;
        summary.record(Step::AssetInfo, r, |e| format!("Error fetching asset info: {e:#}"));
    }

    if let Some(plugin_id) = plan.plugin_info {
        let r = plugin_info::run(ctx, plugin_id).await;
        summary.record(Step::PluginInfo, r, |e| format!("Error fetching plugin info: {e:#}"));
    }

    if let Some(query) = &plan.search {
        let r = search::run(ctx, query).await;
        summary.record(Step::Search, r, |e| format!("Error searching assets: {e:#}"));
    }

    if plan.top_assets {
        let r = top::run(ctx, dataset);
        summary.record(Step::Top, r, |e| format!("{e:#}"));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::test_utils::{cli_settings, client_for};
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn failed_step_does_not_stop_ranking() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scans"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("assets.csv");
        std::fs::write(&input, "id,ipv4,hostname,exposure_score\nu-1,10.0.0.1,web01,700\n").unwrap();

        let (cli, settings) = cli_settings(&["--list-scans", "--top-assets", "-i", input.to_str().unwrap()]);
        let client = client_for(&server);
        let ctx = Context { settings: &settings, client: Some(&client) };
        let summary = run(&cli.plan(), &ctx).await;

        assert_eq!(summary.failed, vec![Step::Scans]);
        assert_eq!(summary.completed, vec![Step::Top]);
    }

    #[tokio::test]
    async fn ranking_reuses_freshly_exported_assets() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/assets/export"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "export_uuid": "exp-9" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/assets/export/exp-9/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "FINISHED", "chunks_available": [1] })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/assets/export/exp-9/chunks/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "u-1", "ipv4s": ["10.0.0.1"], "hostnames": ["web01"], "exposure_score": 650 }
            ])))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("exported.csv");
        let input = dir.path().join("never-written.csv");

        let (cli, settings) = cli_settings(&[
            "--export-all",
            "--top-assets",
            "-o",
            output.to_str().unwrap(),
            "-i",
            input.to_str().unwrap(),
        ]);
        let client = client_for(&server);
        let ctx = Context { settings: &settings, client: Some(&client) };
        let summary = run(&cli.plan(), &ctx).await;

        assert_eq!(summary.completed, vec![Step::Export, Step::Top]);
        assert!(summary.failed.is_empty());
        assert!(output.exists());
        assert!(!input.exists());
    }

    #[tokio::test]
    async fn ranking_alone_fails_on_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.csv");
        let (cli, settings) = cli_settings(&["--top-assets", "-i", input.to_str().unwrap()]);
        let ctx = Context { settings: &settings, client: None };
        let summary = run(&cli.plan(), &ctx).await;
        assert_eq!(summary.failed, vec![Step::Top]);
    }
}
