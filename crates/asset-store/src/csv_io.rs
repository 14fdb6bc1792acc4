use anyhow::{Context, Result};
use std::path::Path;
use tio_core::{AssetRecord, Table, ASSET_COLUMNS};

pub fn write_assets(records: &[AssetRecord], out: &Path) -> Result<()> {
    let file = std::fs::File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(ASSET_COLUMNS)?;
    for rec in records {
        wtr.write_record(rec.to_row())?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_table(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let columns = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mut table = Table::new(columns);
    for rec in rdr.records() {
        let rec = rec?;
        table.rows.push(rec.iter().map(str::to_string).collect());
    }
    Ok(table)
}
