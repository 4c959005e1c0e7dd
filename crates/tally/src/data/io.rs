// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.
use crate::data::column::ColumnBuilder;
use crate::data::common::{format_number, DatasetMetadata};
use crate::data::table::WorkingTable;
use crate::error::{DataError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};
/// Reads a delimited survey export into a [`WorkingTable`]. Header text is kept
/// verbatim (including trailing spaces) so the resolver sees the authored names.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    delimiter: u8,
    row_limit: Option<usize>,
}
impl CsvLoader {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            row_limit: None,
        }
    }
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<WorkingTable> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(DataError::Io)?;
        let name = path
            .file_stem()
            .map_or_else(|| "survey".to_string(), |s| s.to_string_lossy().into_owned());
        let mut table = self.load_reader(file, &name, &path.display().to_string())?;
        table.metadata = table.metadata.clone().with_source(path);
        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "survey table loaded"
        );
        Ok(table)
    }
    pub fn load_reader<R: Read>(&self, reader: R, name: &str, origin: &str) -> Result<WorkingTable> {
        let csv_error = |source: csv::Error| DataError::Csv {
            path: origin.to_string(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers: Vec<String> = reader.headers().map_err(csv_error)?.iter().map(str::to_string).collect();
        let mut assembler = TableAssembler::new(headers);
        for (row_index, record) in reader.records().enumerate() {
            if self.row_limit.is_some_and(|limit| row_index >= limit) {
                break;
            }
            let record = record.map_err(csv_error)?;
            assembler.push_row(row_index, record.iter().map(|cell| Some(cell.to_string())).collect())?;
        }
        assembler.finish(name)
    }
}
impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}
/// Reads the first worksheet (or a named one) of a spreadsheet workbook. The
/// first row is the header row, kept verbatim like the CSV path.
#[derive(Debug, Clone, Default)]
pub struct XlsxLoader {
    sheet: Option<String>,
    row_limit: Option<usize>,
}
impl XlsxLoader {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<WorkingTable> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let workbook_error = |source: calamine::Error| DataError::Workbook {
            path: origin.clone(),
            source,
        };
        let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
        let sheet_name = match &self.sheet {
            Some(sheet) => sheet.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| DataError::EmptyWorkbook { path: origin.clone() })?,
        };
        let range = workbook.worksheet_range(&sheet_name).map_err(workbook_error)?;
        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(|cell| cell_text(cell).unwrap_or_default()).collect())
            .unwrap_or_default();
        let mut assembler = TableAssembler::new(headers);
        for (row_index, row) in rows.enumerate() {
            if self.row_limit.is_some_and(|limit| row_index >= limit) {
                break;
            }
            assembler.push_row(row_index, row.iter().map(cell_text).collect())?;
        }
        let name = path
            .file_stem()
            .map_or_else(|| "survey".to_string(), |s| s.to_string_lossy().into_owned());
        let mut table = assembler.finish(&name)?;
        table.metadata = table.metadata.clone().with_source(path);
        info!(
            path = %path.display(),
            sheet = %sheet_name,
            rows = table.row_count(),
            columns = table.column_count(),
            "survey workbook loaded"
        );
        Ok(table)
    }
}
/// Text form of a worksheet cell. Whole floats drop the fraction so a year
/// typed into Excel reads back as "2023"; empty and error cells are missing.
pub(crate) fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
/// Workbook extensions routed to [`XlsxLoader`]; anything else is read as CSV.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];
pub fn is_workbook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| WORKBOOK_EXTENSIONS.iter().any(|w| e.eq_ignore_ascii_case(w)))
}
/// Shared header dedup and column assembly for every source format.
struct TableAssembler {
    headers: Vec<String>,
    keep: Vec<bool>,
    builders: Vec<ColumnBuilder>,
}
impl TableAssembler {
    fn new(headers: Vec<String>) -> Self {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        let mut seen = HashSet::new();
        let keep = headers
            .iter()
            .map(|h| {
                let fresh = seen.insert(h.clone());
                if !fresh {
                    warn!(column = %h, "duplicate header ignored; first occurrence kept");
                }
                fresh
            })
            .collect();
        let builders = headers.iter().map(|_| ColumnBuilder::new()).collect();
        Self { headers, keep, builders }
    }
    fn push_row(&mut self, row_index: usize, cells: Vec<Option<String>>) -> Result<()> {
        if cells.len() > self.headers.len() {
            return Err(DataError::RaggedRow {
                row: row_index,
                expected: self.headers.len(),
                found: cells.len(),
            }
            .into());
        }
        let mut cells = cells.into_iter();
        for builder in &mut self.builders {
            builder.push(cells.next().flatten());
        }
        Ok(())
    }
    fn finish(self, name: &str) -> Result<WorkingTable> {
        let mut table = WorkingTable::new(DatasetMetadata::named(name));
        for ((header, builder), keep) in self.headers.into_iter().zip(self.builders).zip(self.keep) {
            if keep {
                table.add_column(header, builder.build()?)?;
            }
        }
        Ok(table)
    }
}
