use anyhow::Result;
use tio_core::ScanRecord;

use super::Context;
use crate::settings::OutputFormat;

pub async fn list_successful(ctx: &Context<'_>) -> Result<()> {
    let text = ctx.settings.format == OutputFormat::Text;
    if text {
        println!("\n--- Successful VM Scans ---");
    }
    let scans = ctx.client()?.list_scans().await?;
    let completed: Vec<ScanRecord> = scans.into_iter().filter(ScanRecord::is_completed).collect();
    tracing::info!(completed = completed.len(), "scans listed");

    if text {
        for line in render(&completed) {
            println!("{line}");
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&completed)?);
    }
    Ok(())
}

fn render(scans: &[ScanRecord]) -> Vec<String> {
    let mut lines = vec![format!("{:<10} | {:<15} | {}", "Scan ID", "Status", "Scan Name"), "-".repeat(60)];
    for s in scans {
        lines.push(format!(
            "{:<10} | {:<15} | {}",
            s.id.map(|id| id.to_string()).unwrap_or_default(),
            s.status.as_deref().unwrap_or(""),
            s.name.as_deref().unwrap_or("")
        ));
    }
    lines.push(String::new());
    lines.push(format!("Total Successful Scans: {}", scans.len()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_rows_and_total() {
        let scans = vec![
            ScanRecord { id: Some(42), uuid: None, status: Some("completed".into()), name: Some("Weekly DMZ".into()) },
            ScanRecord { id: None, uuid: None, status: Some("completed".into()), name: Some("Imported".into()) },
        ];
        let lines = render(&scans);
        assert_eq!(lines[0], "Scan ID    | Status          | Scan Name");
        assert_eq!(lines[2], "42         | completed       | Weekly DMZ");
        assert_eq!(lines[3], "           | completed       | Imported");
        assert_eq!(lines.last().unwrap(), "Total Successful Scans: 2");
    }
}
