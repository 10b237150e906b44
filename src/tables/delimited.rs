//! Delimited text tables
//!
//! Reads comma or tab separated files with a header row into named columns.

use std::io::{self, Write};
use std::mem::take;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Table loading error types
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Table not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{table}: missing header row")]
    Empty { table: String },

    #[error("{table}: missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("{table} row {row}: invalid number '{value}' in column '{column}'")]
    InvalidNumber {
        table: String,
        row: usize,
        column: String,
        value: String,
    },
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// A parsed table: one header row plus data rows
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// One data row borrowed from a [`Table`]
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a Table,
    /// 1-based row number, counting the header as row 1
    row: usize,
    cells: &'a [String],
}

impl Table {
    /// Load a table from disk. A missing file is reported as [`TableError::NotFound`].
    pub fn load<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                TableError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                TableError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::parse(&text, &name)
    }

    /// Parse table text. The separator is a tab when the header line has
    /// tabs and no commas, otherwise a comma.
    pub fn parse(text: &str, name: &str) -> TableResult<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let header_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        let sep = if header_line.contains('\t') && !header_line.contains(',') {
            '\t'
        } else {
            ','
        };

        let mut rows = parse_rows(text, sep);
        if rows.is_empty() {
            return Err(TableError::Empty {
                table: name.to_string(),
            });
        }

        let headers = rows
            .remove(0)
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    /// Table name used in error messages (usually the file name)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of a column, matched case-insensitively
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    }

    /// Index of a column that must exist
    pub fn require_column(&self, name: &str) -> TableResult<usize> {
        self.column(name).ok_or_else(|| TableError::MissingColumn {
            table: self.name.clone(),
            column: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over data rows
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().enumerate().map(move |(i, cells)| Record {
            table: self,
            row: i + 2,
            cells,
        })
    }
}

impl<'a> Record<'a> {
    /// Trimmed cell text; empty when the row is shorter than the header
    pub fn get(&self, idx: usize) -> &'a str {
        self.cells.get(idx).map(|c| c.trim()).unwrap_or("")
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Parse a numeric cell. Blank cells yield `None`.
    pub fn number(&self, idx: usize) -> TableResult<Option<f64>> {
        let raw = self.get(idx);
        if raw.is_empty() {
            return Ok(None);
        }
        parse_number(raw).map(Some).ok_or_else(|| TableError::InvalidNumber {
            table: self.table.name.clone(),
            row: self.row,
            column: self
                .table
                .headers
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("#{}", idx + 1)),
            value: raw.to_string(),
        })
    }
}

/// Parse a decimal, a fraction ("1/2") or a mixed number ("1 1/2")
pub fn parse_number(s: &str) -> Option<f64> {
    let cleaned = s.trim().replace('\u{2044}', "/");
    if let Ok(v) = cleaned.parse::<f64>() {
        return v.is_finite().then_some(v);
    }

    let mut total = 0.0;
    let mut parts = 0;
    for part in cleaned.split_whitespace() {
        total += parse_fraction(part).or_else(|| part.parse::<f64>().ok())?;
        parts += 1;
    }
    (parts > 0 && total.is_finite()).then_some(total)
}

fn parse_fraction(s: &str) -> Option<f64> {
    let (num, den) = s.split_once('/')?;
    let num: f64 = num.trim().parse().ok()?;
    let den: f64 = den.trim().parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

/// Split delimited text into rows of fields (quotes + CRLF tolerant).
/// Blank lines are dropped.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                push_row(&mut rows, &mut row);
            }
            _ => field.push(ch),
        }
    }

    // Trailing row without a final newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, &mut row);
    }

    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>) {
    if row.iter().all(|c| c.trim().is_empty()) {
        row.clear();
    } else {
        rows.push(take(row));
    }
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one delimited row, quoting fields where needed
pub fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_quotes_and_crlf() {
        let rows = parse_rows("Name,Amount\r\n\"tomato, roma\",2\r\n\r\n\"say \"\"hi\"\"\",1", ',');
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["tomato, roma", "2"]);
        assert_eq!(rows[2], vec!["say \"hi\"", "1"]);
    }

    #[test]
    fn test_parse_rows_skips_blank_lines() {
        let rows = parse_rows("Name\nsalt\n\n,\npepper\n", ',');
        assert_eq!(rows, vec![vec!["Name"], vec!["salt"], vec!["pepper"]]);
    }

    #[test]
    fn test_table_detects_tab_separator() {
        let table = Table::parse("Name\tAmount\tUnit\nflour\t2\tcup\n", "t.tsv").unwrap();
        assert_eq!(table.headers(), &["Name", "Amount", "Unit"]);
        let rec = table.records().next().unwrap();
        assert_eq!(rec.get(2), "cup");
        assert_eq!(rec.row(), 2);
    }

    #[test]
    fn test_column_lookup_is_case_insensitive() {
        let table = Table::parse("name,UNIT\n", "t.csv").unwrap();
        assert_eq!(table.column("Name"), Some(0));
        assert_eq!(table.column("unit"), Some(1));
        assert!(matches!(
            table.require_column("Category"),
            Err(TableError::MissingColumn { .. })
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_table_is_error() {
        assert!(matches!(Table::parse("\n\n", "t.csv"), Err(TableError::Empty { .. })));
    }

    #[test]
    fn test_short_rows_read_as_blank() {
        let table = Table::parse("Name,Amount,Unit\nsalt\n", "t.csv").unwrap();
        let rec = table.records().next().unwrap();
        assert_eq!(rec.get(1), "");
        assert_eq!(rec.number(1).unwrap(), None);
    }

    #[test]
    fn test_record_number_error_names_column() {
        let table = Table::parse("Name,Amount\nflour,lots\n", "bread.csv").unwrap();
        let rec = table.records().next().unwrap();
        match rec.number(1) {
            Err(TableError::InvalidNumber { table, row, column, value }) => {
                assert_eq!(table, "bread.csv");
                assert_eq!(row, 2);
                assert_eq!(column, "Amount");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number("2"), Some(2.0));
        assert_eq!(parse_number("0.25"), Some(0.25));
        assert_eq!(parse_number("1/2"), Some(0.5));
        assert_eq!(parse_number("1 1/2"), Some(1.5));
        assert_eq!(parse_number("3\u{2044}4"), Some(0.75));
        assert_eq!(parse_number("1/0"), None);
        assert_eq!(parse_number("a pinch"), None);
    }

    #[test]
    fn test_write_row_quotes() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["tomato, roma", "2", "say \"hi\""], ',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\"tomato, roma\",2,\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Table::load("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, TableError::NotFound { .. }));
    }
}
