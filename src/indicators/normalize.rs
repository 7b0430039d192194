//! Coercion of heterogeneous yes/no columns into strict 0/1 flags.
//!
//! Census indicator columns arrive as numbers (`0`, `1`), as Portuguese
//! tokens (`SIM`, `NÃO`), or empty. [`classify_column`] decides once per
//! column which reading applies, with this precedence:
//!
//! 1. Absent column: every row is 0.
//! 2. Textual: some value is a yes/no token (`SIM`, `NÃO`, `NAO`, any case),
//!    or some non-missing value does not parse as a number. Each value is then
//!    mapped through [`text_flag`]; only `SIM`, `S` and `1` give 1.
//! 3. Numeric: every non-missing value parses as a number. Nonzero finite
//!    values give 1; zero, missing and NaN give 0.
//!
//! A column mixing `"1"` and `"SIM"` is therefore read as text, and a value
//! like `"2"` or `"1.0"` in such a column becomes 0.

use tracing::debug;

use crate::table::Table;

/// Values that force the textual reading of a column.
static YES_NO_TOKENS: &[&str] = &["SIM", "NÃO", "NAO"];

/// How a column's values are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnEncoding {
    Absent,
    Numeric,
    Textual,
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

fn is_missing(value: &str) -> bool {
    value.trim().is_empty()
}

/// Decides the reading of a present column from its raw values.
pub fn classify_column<'a, I>(values: I) -> ColumnEncoding
where
    I: IntoIterator<Item = &'a str>,
{
    let mut has_token = false;
    let mut non_numeric = false;

    for value in values {
        if YES_NO_TOKENS.contains(&value.to_uppercase().as_str()) {
            has_token = true;
        }
        if !is_missing(value) && parse_number(value).is_none() {
            non_numeric = true;
        }
    }

    if non_numeric || has_token {
        ColumnEncoding::Textual
    } else {
        ColumnEncoding::Numeric
    }
}

/// Textual reading of one value.
pub fn text_flag(value: &str) -> u8 {
    match value.to_uppercase().as_str() {
        "SIM" | "S" | "1" => 1,
        // NÃO, NAO, N and anything unrecognised
        _ => 0,
    }
}

/// Numeric reading of one value; unparseable values count as 0.
pub fn numeric_flag(value: &str) -> u8 {
    match parse_number(value) {
        Some(n) if n.is_finite() && n != 0.0 => 1,
        _ => 0,
    }
}

/// Normalizes raw values under an already chosen encoding.
pub fn binarize<'a, I>(values: I, encoding: ColumnEncoding) -> Vec<u8>
where
    I: IntoIterator<Item = &'a str>,
{
    let values = values.into_iter();
    match encoding {
        ColumnEncoding::Absent => values.map(|_| 0).collect(),
        ColumnEncoding::Numeric => values.map(numeric_flag).collect(),
        ColumnEncoding::Textual => values.map(text_flag).collect(),
    }
}

/// Returns one 0/1 flag per row of `table` for indicator `column`.
///
/// An absent column yields all zeros.
pub fn ensure_binary(table: &Table, column: &str) -> Vec<u8> {
    let Some(values) = table.column(column) else {
        debug!(column, encoding = ?ColumnEncoding::Absent, "Indicator column missing");
        return vec![0; table.len()];
    };

    let values: Vec<&str> = values.collect();
    let encoding = classify_column(values.iter().copied());
    debug!(column, encoding = ?encoding, "Indicator column classified");

    binarize(values, encoding)
}
