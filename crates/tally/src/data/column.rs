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
use crate::data::common::{format_number, DataType};
use crate::error::Result;
use std::borrow::Cow;
use std::sync::Arc;
pub trait ColumnData: Send + Sync + std::fmt::Debug {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn data_type(&self) -> DataType;
    fn null_count(&self) -> usize;
    fn get_string(&self, index: usize) -> Option<String>;
    fn to_f64(&self, index: usize) -> Option<f64>;
}
/// One physical survey column. Cells are typed per column; `None` is a missing cell.
#[derive(Debug, Clone)]
pub enum Column {
    Int64(Arc<[Option<i64>]>),
    Float64(Arc<[Option<f64>]>),
    String(Arc<[Option<Arc<str>>]>),
}
impl ColumnData for Column {
    fn len(&self) -> usize {
        match self {
            Column::Int64(data) => data.len(),
            Column::Float64(data) => data.len(),
            Column::String(data) => data.len(),
        }
    }
    fn data_type(&self) -> DataType {
        match self {
            Column::Int64(_) => DataType::Int64,
            Column::Float64(_) => DataType::Float64,
            Column::String(_) => DataType::String,
        }
    }
    fn null_count(&self) -> usize {
        match self {
            Column::Int64(data) => data.iter().filter(|v| v.is_none()).count(),
            Column::Float64(data) => data.iter().filter(|v| v.is_none()).count(),
            Column::String(data) => data
                .iter()
                .filter(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
                .count(),
        }
    }
    fn get_string(&self, index: usize) -> Option<String> {
        self.text(index).map(Cow::into_owned)
    }
    fn to_f64(&self, index: usize) -> Option<f64> {
        match self {
            Column::Int64(data) => data.get(index).copied().flatten().map(|v| v as f64),
            Column::Float64(data) => data.get(index).copied().flatten(),
            Column::String(data) => data
                .get(index)
                .and_then(|v| v.as_deref())
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite()),
        }
    }
}
impl Column {
    /// Borrowed text view of a cell; numeric cells are rendered on demand.
    pub fn text(&self, index: usize) -> Option<Cow<'_, str>> {
        match self {
            Column::Int64(data) => data
                .get(index)
                .copied()
                .flatten()
                .map(|v| Cow::Owned(v.to_string())),
            Column::Float64(data) => data
                .get(index)
                .copied()
                .flatten()
                .map(|v| Cow::Owned(format_number(v))),
            Column::String(data) => data
                .get(index)
                .and_then(|v| v.as_deref())
                .map(Cow::Borrowed),
        }
    }
    pub fn from_strings(values: &[Option<String>], data_type: DataType) -> Result<Self> {
        Ok(match data_type {
            DataType::Int64 => Column::Int64(
                values
                    .iter()
                    .map(|v| non_blank(v.as_deref()).and_then(|s| s.parse::<i64>().ok()))
                    .collect::<Vec<_>>()
                    .into(),
            ),
            DataType::Float64 => Column::Float64(
                values
                    .iter()
                    .map(|v| {
                        non_blank(v.as_deref())
                            .and_then(|s| s.parse::<f64>().ok())
                            .filter(|f| f.is_finite())
                    })
                    .collect::<Vec<_>>()
                    .into(),
            ),
            DataType::String => Column::String(
                values
                    .iter()
                    .map(|v| v.as_deref().map(Arc::from))
                    .collect::<Vec<_>>()
                    .into(),
            ),
        })
    }
}
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
/// Collects raw cells and infers the narrowest type every non-blank cell parses as.
#[derive(Debug, Default)]
pub struct ColumnBuilder {
    values: Vec<Option<String>>,
}
impl ColumnBuilder {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }
    pub fn push(&mut self, value: Option<String>) {
        self.values.push(value.filter(|s| !s.is_empty()));
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn build(self) -> Result<Column> {
        let data_type = Self::infer_type(&self.values);
        Column::from_strings(&self.values, data_type)
    }
    fn infer_type(values: &[Option<String>]) -> DataType {
        let mut present = values.iter().filter_map(|v| non_blank(v.as_deref())).peekable();
        if present.peek().is_none() {
            return DataType::String;
        }
        let mut data_type = DataType::Int64;
        for sample in present {
            if data_type == DataType::Int64 && sample.parse::<i64>().is_err() {
                data_type = DataType::Float64;
            }
            if data_type == DataType::Float64 && !sample.parse::<f64>().is_ok_and(f64::is_finite) {
                return DataType::String;
            }
        }
        data_type
    }
}
