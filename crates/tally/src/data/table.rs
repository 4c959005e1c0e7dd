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
use crate::data::column::{Column, ColumnBuilder, ColumnData};
use crate::data::common::DatasetMetadata;
use crate::error::{DataError, Result};
use rayon::prelude::*;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
/// The survey as loaded at startup. Never mutated after construction; every
/// request works through a [`TableView`].
#[derive(Debug, Clone)]
pub struct WorkingTable {
    columns: HashMap<String, Arc<Column>>,
    column_order: Vec<String>,
    row_count: usize,
    pub metadata: DatasetMetadata,
}
impl WorkingTable {
    pub fn new(metadata: DatasetMetadata) -> Self {
        Self {
            columns: HashMap::new(),
            column_order: Vec::new(),
            row_count: 0,
            metadata,
        }
    }
    pub fn empty(name: &str) -> Self {
        Self::new(DatasetMetadata::named(name))
    }
    pub fn add_column(&mut self, name: String, column: Column) -> Result<()> {
        if self.columns.contains_key(&name) {
            return Err(DataError::DuplicateColumn { column: name }.into());
        }
        if !self.column_order.is_empty() && column.len() != self.row_count {
            return Err(DataError::LengthMismatch {
                column: name,
                expected: self.row_count,
                found: column.len(),
            }
            .into());
        }
        self.row_count = column.len();
        self.column_order.push(name.clone());
        self.columns.insert(name, Arc::new(column));
        self.metadata.row_count = self.row_count;
        self.metadata.column_count = self.column_order.len();
        Ok(())
    }
    /// Builds a table from textual rows; empty strings become missing cells.
    pub fn from_rows<H, R, C>(name: &str, headers: &[H], rows: &[R]) -> Result<Self>
    where
        H: AsRef<str>,
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        let mut builders: Vec<ColumnBuilder> = headers
            .iter()
            .map(|_| ColumnBuilder::with_capacity(rows.len()))
            .collect();
        for (row_index, row) in rows.iter().enumerate() {
            let cells = row.as_ref();
            if cells.len() > headers.len() {
                return Err(DataError::RaggedRow {
                    row: row_index,
                    expected: headers.len(),
                    found: cells.len(),
                }
                .into());
            }
            for (i, builder) in builders.iter_mut().enumerate() {
                builder.push(cells.get(i).map(|c| c.as_ref().to_string()));
            }
        }
        let mut table = Self::empty(name);
        for (header, builder) in headers.iter().zip(builders) {
            table.add_column(header.as_ref().to_string(), builder.build()?)?;
        }
        Ok(table)
    }
    pub fn row_count(&self) -> usize {
        self.row_count
    }
    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }
    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name).map(AsRef::as_ref)
    }
    pub fn view(&self) -> TableView<'_> {
        TableView::full(self)
    }
}
/// Row-subset of a [`WorkingTable`]. Holds indices only; cell data stays shared.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    source: &'a WorkingTable,
    rows: Arc<[usize]>,
}
impl<'a> TableView<'a> {
    pub fn full(source: &'a WorkingTable) -> Self {
        Self {
            source,
            rows: (0..source.row_count()).collect::<Vec<_>>().into(),
        }
    }
    pub fn with_rows(source: &'a WorkingTable, rows: Vec<usize>) -> Self {
        Self {
            source,
            rows: rows.into(),
        }
    }
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(usize) -> bool + Send + Sync,
    {
        let rows: Vec<usize> = self.rows.par_iter().copied().filter(|&i| predicate(i)).collect();
        Self::with_rows(self.source, rows)
    }
    pub fn source(&self) -> &'a WorkingTable {
        self.source
    }
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn column(&self, name: &str) -> Option<&'a Column> {
        self.source.get_column(name)
    }
    /// Raw text of one cell addressed by absolute row index.
    pub fn raw_text(&self, column: &str, row: usize) -> Option<Cow<'a, str>> {
        self.source.get_column(column).and_then(|c| c.text(row))
    }
}
