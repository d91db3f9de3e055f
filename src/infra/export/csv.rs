use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::record::Column;

/// Writes `records` as CSV with one column per table column.
pub fn write_records<W: Write, T>(writer: W, columns: &[Column<T>], records: &[T]) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(columns.iter().map(|column| column.header))
        .context("failed to write csv header")?;

    for record in records {
        csv_writer
            .write_record(columns.iter().map(|column| (column.cell)(record)))
            .context("failed to write csv record")?;
    }
    csv_writer.flush().context("failed to flush csv output")?;

    Ok(records.len())
}

pub fn export_records_to_csv<T>(
    csv_path: &Path,
    columns: &[Column<T>],
    records: &[T],
) -> Result<usize> {
    let file = std::fs::File::create(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;
    let written = write_records(file, columns, records)?;
    log::info!("exported {written} rows to {}", csv_path.display());
    Ok(written)
}

/// `schools-20240301.csv` style default name for the save dialog.
pub fn default_export_file_name(collection: &str, today: chrono::NaiveDate) -> String {
    format!("{collection}-{}.csv", today.format("%Y%m%d"))
}
