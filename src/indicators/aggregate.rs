use crate::indicators::groups::{Category, GROUPS, ID_COLUMNS};
use crate::indicators::normalize::ensure_binary;
use crate::indicators::types::SchoolScores;
use crate::indicators::utility::mean;
use crate::table::Table;
use anyhow::Result;
use csv::StringRecord;
use std::collections::HashMap;
use tracing::info;

/// Row-wise category scores: for each row, the mean of the group's flags.
fn category_scores(table: &Table, columns: &[&str]) -> Vec<f64> {
    let flags: Vec<Vec<u8>> = columns.iter().map(|c| ensure_binary(table, c)).collect();

    let mut row_flags = Vec::with_capacity(columns.len());
    (0..table.len())
        .map(|row| {
            row_flags.clear();
            row_flags.extend(flags.iter().map(|col| col[row]));
            mean(&row_flags)
        })
        .collect()
}

/// Normalizes every indicator column of `table` and scores each school.
///
/// Each category score is the mean of the category's 0/1 flags and the
/// overall index is the mean of the four category scores.
///
/// # Errors
///
/// Returns an error if any identifying column is missing.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn compute_indicators(table: &Table) -> Result<Vec<SchoolScores>> {
    let id_idx = ID_COLUMNS
        .iter()
        .map(|c| table.require_column(c))
        .collect::<Result<Vec<_>>>()?;

    let scores: HashMap<Category, Vec<f64>> = GROUPS
        .iter()
        .map(|g| (g.category, category_scores(table, g.columns)))
        .collect();

    let cell = |row: &StringRecord, i: usize| row.get(id_idx[i]).unwrap_or("").to_string();

    let schools: Vec<SchoolScores> = table
        .rows()
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let infra_basica = scores[&Category::BasicInfrastructure][r];
            let ambientes_educ = scores[&Category::EducationalEnvironments][r];
            let acessibilidade = scores[&Category::Accessibility][r];
            let tecnologia = scores[&Category::Technology][r];

            SchoolScores {
                no_entidade: cell(row, 0),
                co_entidade: cell(row, 1),
                no_municipio: cell(row, 2),
                no_bairro: cell(row, 3),
                infra_basica,
                ambientes_educ,
                acessibilidade,
                tecnologia,
                indice_geral_infra: mean(&[
                    infra_basica,
                    ambientes_educ,
                    acessibilidade,
                    tecnologia,
                ]),
            }
        })
        .collect();

    info!(schools = schools.len(), "Indicators computed");
    Ok(schools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::groups::indicator_columns;

    /// Builds a table with the identifying columns and every indicator set to
    /// the value returned by `value(column, row)`.
    fn census_table(rows: usize, value: impl Fn(&str, usize) -> String) -> Table {
        let mut headers: Vec<String> = ID_COLUMNS.iter().map(|c| c.to_string()).collect();
        headers.extend(indicator_columns().map(String::from));

        let data = (0..rows)
            .map(|r| {
                let mut row = vec![
                    format!("Escola {r}"),
                    format!("{}", 41000000 + r),
                    "Curitiba".to_string(),
                    "Centro".to_string(),
                ];
                row.extend(indicator_columns().map(|c| value(c, r)));
                row
            })
            .collect();

        Table::new(headers, data)
    }

    #[test]
    fn test_all_sim_scores_one() {
        let table = census_table(3, |_, _| "SIM".to_string());
        let schools = compute_indicators(&table).unwrap();

        assert_eq!(schools.len(), 3);
        for s in &schools {
            for (_, score) in s.scores() {
                assert_eq!(score, 1.0);
            }
        }
    }

    #[test]
    fn test_all_nao_scores_zero() {
        let table = census_table(2, |_, _| "NÃO".to_string());
        let schools = compute_indicators(&table).unwrap();

        for s in &schools {
            for (_, score) in s.scores() {
                assert_eq!(score, 0.0);
            }
        }
    }

    #[test]
    fn test_partial_category() {
        // basic infrastructure: water and sewage only
        let table = census_table(1, |c, _| {
            if c == "IN_AGUA_POTAVEL" || c == "IN_ESGOTO_REDE_PUBLICA" {
                "1".to_string()
            } else {
                "0".to_string()
            }
        });
        let s = &compute_indicators(&table).unwrap()[0];

        assert_eq!(s.infra_basica, 0.5);
        assert_eq!(s.ambientes_educ, 0.0);
        assert_eq!(s.acessibilidade, 0.0);
        assert_eq!(s.tecnologia, 0.0);
        assert_eq!(s.indice_geral_infra, 0.125);
    }

    #[test]
    fn test_overall_is_mean_of_categories() {
        let table = census_table(20, |c, r| ((c.len() + r) % 2).to_string());
        for s in compute_indicators(&table).unwrap() {
            let expected =
                (s.infra_basica + s.ambientes_educ + s.acessibilidade + s.tecnologia) / 4.0;
            assert_eq!(s.indice_geral_infra, expected);
            for (_, score) in s.scores() {
                assert!((0.0..=1.0).contains(&score));
            }
        }
    }

    #[test]
    fn test_missing_indicator_columns_count_as_zero() {
        let headers: Vec<String> = ID_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(["IN_INTERNET".to_string()])
            .collect();
        let row = vec![
            "Escola".to_string(),
            "1".to_string(),
            "Curitiba".to_string(),
            "Centro".to_string(),
            "1".to_string(),
        ];
        let table = Table::new(headers, vec![row]);
        let s = &compute_indicators(&table).unwrap()[0];

        assert_eq!(s.infra_basica, 0.0);
        assert_eq!(s.tecnologia, 1.0 / 6.0);
        assert_eq!(s.no_entidade, "Escola");
        assert_eq!(s.no_bairro, "Centro");
    }

    #[test]
    fn test_missing_identifying_column_fails() {
        let table = Table::new(vec!["NO_ENTIDADE".to_string()], vec![]);
        assert!(compute_indicators(&table).is_err());
    }

    #[test]
    fn test_empty_table() {
        let table = census_table(0, |_, _| String::new());
        assert!(compute_indicators(&table).unwrap().is_empty());
    }
}
