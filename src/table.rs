// src/table.rs
//! Tab-separated accelerometer tables
//!
//! Every stage reads and writes the same layout: one header row, one column
//! per quantity, floats written with nine decimals. Empty fields stand for
//! missing values and load as NaN.

use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use thiserror::Error;

use crate::config::constants::table::{DELIMITER, FLOAT_PRECISION};

/// Table loading and shaping errors
#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Cannot parse '{value}' in column '{column}' at row {row}")]
    Parse { row: usize, column: String, value: String },

    #[error("Column '{column}' has {actual} rows, table has {expected}")]
    LengthMismatch { column: String, expected: usize, actual: usize },

    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),
}

/// Column-oriented numeric table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_tsv<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = Self::read_tsv_from(file)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            rows = table.row_count(),
            columns = table.headers.len(),
            "read table"
        );
        Ok(table)
    }

    pub fn read_tsv_from<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut columns = vec![Vec::new(); headers.len()];

        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            for (col, field) in record.iter().enumerate() {
                let value = if field.is_empty() {
                    f64::NAN
                } else {
                    field.parse::<f64>().map_err(|_| TableError::Parse {
                        row,
                        column: headers[col].clone(),
                        value: field.to_string(),
                    })?
                };
                columns[col].push(value);
            }
        }

        Ok(Self { headers, columns })
    }

    pub fn write_tsv<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_tsv_to(file)?;
        tracing::debug!(path = %path.as_ref().display(), rows = self.row_count(), "wrote table");
        Ok(())
    }

    pub fn write_tsv_to<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut wtr = WriterBuilder::new().delimiter(DELIMITER).from_writer(writer);
        wtr.write_record(&self.headers)?;

        for row in 0..self.row_count() {
            wtr.write_record(self.columns.iter().map(|column| format_value(column[row])))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn column(&self, name: &str) -> Result<&[f64], TableError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Append a column; its length must match the existing rows
    pub fn push_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), TableError> {
        if self.has_column(name) {
            return Err(TableError::DuplicateColumn(name.to_string()));
        }
        if !self.headers.is_empty() && values.len() != self.row_count() {
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.row_count(),
                actual: values.len(),
            });
        }

        self.headers.push(name.to_string());
        self.columns.push(values);
        Ok(())
    }

    pub fn require_columns(&self, names: &[&str]) -> Result<(), TableError> {
        match names.iter().find(|name| !self.has_column(name)) {
            Some(missing) => Err(TableError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    /// New table holding only `names`, in that order
    pub fn select(&self, names: &[&str]) -> Result<DataTable, TableError> {
        let mut selected = DataTable::new();
        for name in names {
            selected.push_column(name, self.column(name)?.to_vec())?;
        }
        Ok(selected)
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{:.*}", FLOAT_PRECISION, value)
    }
}
