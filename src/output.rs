//! Output persistence for sampled rows, indicator tables and summaries.
//!
//! All CSVs are UTF-8, comma-delimited, with a header row and no index.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::indicators::groups::output_columns;
use crate::indicators::types::{SchoolScores, ScoreSummary};
use crate::table::Table;
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

/// Creates the output directory if it does not exist yet.
pub fn prepare_out_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    debug!(dir = %dir.display(), "Output directory ready");
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

/// Writes every column of `table` as-is.
pub fn write_table_csv(path: &Path, table: &Table) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(create(path)?);

    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.len(), "Table saved");
    Ok(())
}

/// Writes the indicator table. The header is written even with no rows.
pub fn write_scores_csv(path: &Path, schools: &[SchoolScores]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false) // header written explicitly below
        .from_writer(create(path)?);

    writer.write_record(output_columns())?;
    for school in schools {
        writer.serialize(school)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = schools.len(), "Indicators saved");
    Ok(())
}

/// Writes the summary as pretty-printed JSON.
pub fn write_summary_json(path: &Path, summary: &ScoreSummary) -> Result<()> {
    let file = create(path)?;
    serde_json::to_writer_pretty(file, summary)?;

    info!(path = %path.display(), "Summary saved");
    Ok(())
}

/// Logs the summary as pretty-printed JSON.
pub fn print_json(summary: &ScoreSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
