//! Data types produced by the indicator pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the indicator table: identifying fields plus the five scores.
///
/// Field order matches the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SchoolScores {
    pub no_entidade: String,
    pub co_entidade: String,
    pub no_municipio: String,
    pub no_bairro: String,
    pub infra_basica: f64,
    pub ambientes_educ: f64,
    pub acessibilidade: f64,
    pub tecnologia: f64,
    pub indice_geral_infra: f64,
}

static SCORE_COLUMNS: [&str; 5] = [
    "INFRA_BASICA",
    "AMBIENTES_EDUC",
    "ACESSIBILIDADE",
    "TECNOLOGIA",
    "INDICE_GERAL_INFRA",
];

impl SchoolScores {
    /// Headers of the five score columns, in CSV order.
    pub fn column_names() -> &'static [&'static str; 5] {
        &SCORE_COLUMNS
    }

    /// The score columns with their headers.
    pub fn scores(&self) -> [(&'static str, f64); 5] {
        let values = [
            self.infra_basica,
            self.ambientes_educ,
            self.acessibilidade,
            self.tecnologia,
            self.indice_geral_infra,
        ];
        let mut out = [("", 0.0); 5];
        for (i, v) in values.into_iter().enumerate() {
            out[i] = (SCORE_COLUMNS[i], v);
        }
        out
    }
}

/// Descriptive statistics for one score column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub(crate) column: String,
    pub(crate) mean: f64,
    pub(crate) stddev: f64,
    pub(crate) min: f64,
    pub(crate) max: f64,
}

/// Summary of a whole indicator table, written as `<prefix>_resumo.json`.
#[derive(Debug, Serialize)]
pub struct ScoreSummary {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) prefix: String,
    pub(crate) schools: usize,
    pub(crate) columns: Vec<ColumnSummary>,
}

impl ScoreSummary {
    pub fn schools(&self) -> usize {
        self.schools
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.column == name)
    }
}

impl ColumnSummary {
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
