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

use thiserror::Error;
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Query error: {0}")]
    Query(#[from] QueryError),
    #[error("Internal failure: {reason}")]
    Internal { reason: String },
}
impl TallyError {
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }
    /// Caller-side mistakes the host should answer with a 4xx.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read CSV source '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to read workbook '{path}': {source}")]
    Workbook {
        path: String,
        #[source]
        source: calamine::Error,
    },
    #[error("Workbook '{path}' has no worksheets")]
    EmptyWorkbook { path: String },
    #[error("Row {row} has {found} cells but the header declares {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Column '{column}' has {found} cells, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("Duplicate column '{column}'")]
    DuplicateColumn { column: String },
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Unknown chart '{id}'")]
    UnknownChart { id: String },
    #[error("Page must be at least 1")]
    InvalidPage,
    #[error("per_page must be between 1 and {max}")]
    InvalidPageSize { max: usize },
}
pub type Result<T> = std::result::Result<T, TallyError>;
