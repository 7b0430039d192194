//! In-memory text table and the census file loader.
//!
//! Every cell is kept as text; numeric interpretation happens downstream in
//! [`crate::indicators::normalize`]. Rows are held as [`StringRecord`]s, one
//! buffer per row.

use anyhow::{Context, Result, anyhow, bail};
use csv::{ByteRecord, ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Column holding the municipality name used by [`filter_municipality`].
pub const MUNICIPALITY_COLUMN: &str = "NO_MUNICIPIO";

/// Cell values read as missing, mirroring the default NA markers of common
/// dataframe readers. They are stored as empty strings.
static MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A header row plus data rows, all cells as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: StringRecord::from(headers),
            rows: rows.into_iter().map(StringRecord::from).collect(),
        }
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like [`Table::column_index`], but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| anyhow!("required column {name} not found in input"))
    }

    /// Iterates the cells of column `name`, or `None` if the column is absent.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row.get(idx).unwrap_or("")))
    }

    /// Builds a new table from the rows at `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

/// Decodes ISO-8859-1 bytes. Every byte maps to the code point of equal value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn decode_cell(bytes: &[u8]) -> String {
    let cell = decode_latin1(bytes);
    if MISSING_TOKENS.contains(&cell.as_str()) {
        String::new()
    } else {
        cell
    }
}

/// Streams semicolon-delimited Latin-1 records from `reader`, keeping only
/// those accepted by `keep(headers, record)`.
///
/// Rows shorter than the header are padded with empty cells; longer rows
/// are an error. Rejected rows are never decoded.
pub fn read_table<R, F>(reader: R, mut keep: F) -> Result<Table>
where
    R: Read,
    F: FnMut(&StringRecord, &ByteRecord) -> bool,
{
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: StringRecord = rdr.byte_headers()?.iter().map(decode_cell).collect();

    let mut record = ByteRecord::new();
    let mut rows = Vec::new();
    let mut seen = 0usize;
    while rdr.read_byte_record(&mut record)? {
        seen += 1;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            bail!(
                "line {line}: expected {} fields, saw {}",
                headers.len(),
                record.len()
            );
        }
        if !keep(&headers, &record) {
            continue;
        }

        let mut row: StringRecord = record.iter().map(decode_cell).collect();
        for _ in row.len()..headers.len() {
            row.push_field("");
        }
        rows.push(row);
    }

    debug!(columns = headers.len(), read = seen, kept = rows.len(), "Parsed table");
    Ok(Table { headers, rows })
}

/// Parses semicolon-delimited text with a header row, keeping every row.
///
/// The text goes through the same Latin-1 path as a file on disk.
pub fn parse_table(text: &str) -> Result<Table> {
    let bytes: Vec<u8> = text.chars().map(|c| c as u32 as u8).collect();
    read_table(bytes.as_slice(), |_, _| true)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Reads a whole Latin-1, semicolon-delimited census file into memory.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_table(path: &Path) -> Result<Table> {
    let table = read_table(open(path)?, |_, _| true)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    info!(rows = table.len(), columns = table.headers().len(), "Input loaded");
    Ok(table)
}

fn municipality_matches(cell: &[u8], target: &str) -> bool {
    let value = decode_cell(cell);
    !value.is_empty() && value.to_uppercase() == target
}

/// Reads a census file keeping only rows of municipality `target`, so the
/// rest of the country is never held in memory. Header and row order are
/// preserved.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if it has no
/// municipality column.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_municipality(path: &Path, target: &str) -> Result<Table> {
    let mut idx = None;
    let table = read_table(open(path)?, |headers, record| {
        let i = *idx.get_or_insert_with(|| headers.iter().position(|h| h == MUNICIPALITY_COLUMN));
        match i {
            Some(i) => municipality_matches(record.get(i).unwrap_or(&[]), target),
            None => false,
        }
    })
    .with_context(|| format!("failed to parse {}", path.display()))?;
    table.require_column(MUNICIPALITY_COLUMN)?;

    info!(rows = table.len(), columns = table.headers().len(), "Input loaded and filtered");
    Ok(table)
}

/// Keeps the rows whose municipality, upper-cased, equals `target` exactly.
///
/// Missing municipality values never match.
pub fn filter_municipality(table: &Table, target: &str) -> Result<Table> {
    let idx = table.require_column(MUNICIPALITY_COLUMN)?;

    let rows = table
        .rows()
        .iter()
        .filter(|row| {
            let value = row.get(idx).unwrap_or("");
            !value.is_empty() && value.to_uppercase() == target
        })
        .cloned()
        .collect();

    Ok(Table {
        headers: table.headers.clone(),
        rows,
    })
}
