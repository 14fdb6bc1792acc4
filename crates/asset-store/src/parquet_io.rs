use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Float64Builder, StringBuilder};
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::path::Path;
use std::sync::Arc;
use tio_core::{AssetRecord, Table};

use crate::arrow_schemas;

const CHUNK: usize = 10_000;

pub fn write_assets(records: &[AssetRecord], out: &Path) -> Result<()> {
    let schema = Arc::new(arrow_schemas::assets_schema());
    let file = std::fs::File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::ZSTD(Default::default()))
        .build();
    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    for chunk in records.chunks(CHUNK) {
        let mut batch = RowBatch::default();
        for rec in chunk {
            batch.push(rec);
        }
        let rb = RecordBatch::try_new(schema.clone(), batch.finish())?;
        writer.write(&rb)?;
    }

    writer.close()?;
    Ok(())
}

pub fn read_table(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let mut table: Option<Table> = None;
    for batch in reader {
        let batch = batch?;
        let t = table.get_or_insert_with(|| {
            Table::new(batch.schema().fields().iter().map(|f| f.name().clone()).collect())
        });
        for row in 0..batch.num_rows() {
            let mut cells = Vec::with_capacity(batch.num_columns());
            for col in batch.columns() {
                let col: &dyn Array = col.as_ref();
                if col.is_null(row) {
                    cells.push(String::new());
                } else {
                    cells.push(array_value_to_string(col, row)?);
                }
            }
            t.rows.push(cells);
        }
    }
    match table {
        Some(t) => Ok(t),
        // no batches at all: fall back to the file's declared schema
        None => {
            let file = std::fs::File::open(path)?;
            let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
            Ok(Table::new(builder.schema().fields().iter().map(|f| f.name().clone()).collect()))
        }
    }
}

#[derive(Default)]
struct RowBatch {
    id: StringBuilder,
    ipv4: StringBuilder,
    hostname: StringBuilder,
    os: StringBuilder,
    exposure: Float64Builder,
    acr: Float64Builder,
    tags: StringBuilder,
}

impl RowBatch {
    fn push(&mut self, rec: &AssetRecord) {
        self.id.append_value(&rec.id);
        self.ipv4.append_value(&rec.ipv4);
        self.hostname.append_value(&rec.hostname);
        self.os.append_value(&rec.os);
        self.exposure.append_option(rec.exposure_score);
        self.acr.append_option(rec.acr_score);
        self.tags.append_value(&rec.tags);
    }

    fn finish(mut self) -> Vec<ArrayRef> {
        vec![
            Arc::new(self.id.finish()),
            Arc::new(self.ipv4.finish()),
            Arc::new(self.hostname.finish()),
            Arc::new(self.os.finish()),
            Arc::new(self.exposure.finish()),
            Arc::new(self.acr.finish()),
            Arc::new(self.tags.finish()),
        ]
    }
}
