//! The batch job: load, filter, sample, score, write.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::histogram::{BINS, Histogram, Labels, render_histogram};
use crate::indicators::aggregate::compute_indicators;
use crate::indicators::summary::summarize;
use crate::output::{prepare_out_dir, print_json, write_scores_csv, write_summary_json, write_table_csv};
use crate::sampler::sample_rows;
use crate::table::{Table, load_municipality};

pub const DEFAULT_INPUT: &str = "microdados_censo_escolar_2024/dados/microdados_ed_basica_2024.csv";
pub const DEFAULT_OUT_DIR: &str = "resultados";
pub const DEFAULT_MUNICIPALITY: &str = "CURITIBA";
pub const DEFAULT_SAMPLE_SIZE: usize = 200;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_PREFIX: &str = "sample_curitiba";

/// Everything the run needs; nothing is read from globals.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    /// Upper-case municipality name matched exactly.
    pub municipality: String,
    pub sample_size: usize,
    pub seed: u64,
    /// Prefix for the sample outputs.
    pub prefix: String,
    /// When set, the full filtered set is also scored under this prefix.
    pub full_prefix: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            municipality: DEFAULT_MUNICIPALITY.to_string(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
            prefix: DEFAULT_PREFIX.to_string(),
            full_prefix: None,
        }
    }
}

/// Files written for one scored table.
#[derive(Debug, Clone)]
pub struct IndicatorOutputs {
    pub indicators_csv: PathBuf,
    pub histogram_png: PathBuf,
    pub summary_json: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub filtered_rows: usize,
    pub sampled_rows: usize,
    pub sample_csv: PathBuf,
    pub sample_outputs: IndicatorOutputs,
    pub full_outputs: Option<IndicatorOutputs>,
}

/// Scores `table` and writes `<prefix>_indicadores.csv`,
/// `<prefix>_hist_indice.png` and `<prefix>_resumo.json` under `out_dir`.
#[tracing::instrument(skip(table), fields(rows = table.len(), out_dir = %out_dir.display()))]
pub fn write_indicators(table: &Table, out_dir: &Path, prefix: &str) -> Result<IndicatorOutputs> {
    let schools = compute_indicators(table)?;

    let indicators_csv = out_dir.join(format!("{prefix}_indicadores.csv"));
    write_scores_csv(&indicators_csv, &schools)?;

    let overall: Vec<f64> = schools.iter().map(|s| s.indice_geral_infra).collect();
    let hist = Histogram::from_values(&overall, BINS);
    let title = format!("Distribuição Índice Geral Infra - {prefix}");
    let labels = Labels {
        title: &title,
        x_desc: "Índice (0 a 1)",
        y_desc: "Quantidade de escolas",
    };
    let histogram_png = out_dir.join(format!("{prefix}_hist_indice.png"));
    render_histogram(&histogram_png, &hist, &labels)?;

    let summary = summarize(prefix, &schools);
    print_json(&summary)?;
    let summary_json = out_dir.join(format!("{prefix}_resumo.json"));
    write_summary_json(&summary_json, &summary)?;

    Ok(IndicatorOutputs {
        indicators_csv,
        histogram_png,
        summary_json,
    })
}

/// Runs the whole job described by `config`.
///
/// # Errors
///
/// Fails on unreadable or malformed input and on missing municipality or
/// identifying columns. An empty municipality is not an error.
#[tracing::instrument(skip(config), fields(input = %config.input.display(), municipality = %config.municipality))]
pub fn run(config: &PipelineConfig) -> Result<RunReport> {
    prepare_out_dir(&config.out_dir)?;

    let filtered = load_municipality(&config.input, &config.municipality)?;
    info!(municipality = %config.municipality, schools = filtered.len(), "Schools in municipality");

    let sample = sample_rows(&filtered, config.sample_size, config.seed);
    let sample_csv = config.out_dir.join(format!("{}.csv", config.prefix));
    write_table_csv(&sample_csv, &sample)?;

    let sample_outputs = write_indicators(&sample, &config.out_dir, &config.prefix)?;

    let full_outputs = match &config.full_prefix {
        Some(prefix) => Some(write_indicators(&filtered, &config.out_dir, prefix)?),
        None => None,
    };

    info!(out_dir = %config.out_dir.display(), "Run complete");
    Ok(RunReport {
        filtered_rows: filtered.len(),
        sampled_rows: sample.len(),
        sample_csv,
        sample_outputs,
        full_outputs,
    })
}
