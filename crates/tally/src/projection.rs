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
//! Paged row projection for the raw-data table and the export endpoint.
use crate::data::{Column, ColumnData, TableView};
use crate::error::{QueryError, Result};
use crate::normalize::value_at;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::debug;
pub type Row = IndexMap<String, String>;
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}
impl FromStr for SortDirection {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    /// Physical column names; empty means every column.
    pub columns: Vec<String>,
    pub page: usize,
    pub per_page: usize,
    pub search: Option<String>,
    pub sort: Option<(String, SortDirection)>,
}
impl TableQuery {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page,
            per_page,
            ..Self::default()
        }
    }
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn with_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some((column.into(), direction));
        self
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}
impl Pagination {
    fn new(page: usize, per_page: usize, total: usize) -> Self {
        let pages = total.div_ceil(per_page);
        Self {
            page,
            per_page,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        }
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePayload {
    pub data: Vec<Row>,
    pub columns: Vec<String>,
    pub pagination: Pagination,
}
/// Requested columns that exist, in request order; all columns when none requested.
pub fn project_columns(view: &TableView<'_>, requested: &[String]) -> Vec<String> {
    let source = view.source();
    if requested.is_empty() {
        return source.column_names().to_vec();
    }
    let mut kept: Vec<String> = Vec::with_capacity(requested.len());
    for name in requested {
        if source.has_column(name) && !kept.contains(name) {
            kept.push(name.clone());
        }
    }
    kept
}
fn cell(view: &TableView<'_>, column: &str, row: usize) -> String {
    value_at(view, column, row).map(|v| v.into_owned()).unwrap_or_default()
}
fn matching_rows(view: &TableView<'_>, columns: &[String], search: Option<&str>) -> Vec<usize> {
    let needle = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);
    let Some(needle) = needle else {
        return view.rows().to_vec();
    };
    view.rows()
        .iter()
        .copied()
        .filter(|&row| {
            columns
                .iter()
                .any(|c| cell(view, c, row).to_lowercase().contains(&needle))
        })
        .collect()
}
/// Numeric columns compare by value, text by string; absent cells sort first.
fn compare_cells(view: &TableView<'_>, column: &Column, name: &str, a: usize, b: usize) -> Ordering {
    if column.data_type().is_numeric() {
        let x = column.to_f64(a);
        let y = column.to_f64(b);
        return match (x, y) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => x.is_some().cmp(&y.is_some()),
        };
    }
    let x = value_at(view, name, a);
    let y = value_at(view, name, b);
    x.cmp(&y)
}
fn sort_rows(view: &TableView<'_>, rows: &mut [usize], sort: Option<&(String, SortDirection)>) {
    let Some((name, direction)) = sort else {
        return;
    };
    let Some(column) = view.column(name) else {
        debug!(column = %name, "sort column not present; order unchanged");
        return;
    };
    rows.sort_by(|&a, &b| {
        let ordering = compare_cells(view, column, name, a, b);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
fn render(view: &TableView<'_>, columns: &[String], rows: &[usize]) -> Vec<Row> {
    rows.iter()
        .map(|&row| columns.iter().map(|c| (c.clone(), cell(view, c, row))).collect())
        .collect()
}
/// Project, search, sort, paginate. `per_page` above `max_per_page` is clamped.
pub fn table(view: &TableView<'_>, query: &TableQuery, max_per_page: usize) -> Result<TablePayload> {
    if query.page == 0 {
        return Err(QueryError::InvalidPage.into());
    }
    if query.per_page == 0 {
        return Err(QueryError::InvalidPageSize { max: max_per_page }.into());
    }
    let per_page = query.per_page.min(max_per_page);
    let columns = project_columns(view, &query.columns);
    let mut rows = matching_rows(view, &columns, query.search.as_deref());
    sort_rows(view, &mut rows, query.sort.as_ref());
    let pagination = Pagination::new(query.page, per_page, rows.len());
    let start = (query.page - 1).saturating_mul(per_page).min(rows.len());
    let end = start.saturating_add(per_page).min(rows.len());
    debug!(total = rows.len(), page = query.page, per_page, "table projected");
    Ok(TablePayload {
        data: render(view, &columns, &rows[start..end]),
        columns,
        pagination,
    })
}
/// Every row of the view (searched and sorted like [`table`]), capped at `limit`.
pub fn export_rows(view: &TableView<'_>, query: &TableQuery, limit: usize) -> (Vec<String>, Vec<Row>) {
    let columns = project_columns(view, &query.columns);
    let mut rows = matching_rows(view, &columns, query.search.as_deref());
    sort_rows(view, &mut rows, query.sort.as_ref());
    if rows.len() > limit {
        debug!(available = rows.len(), limit, "export truncated");
        rows.truncate(limit);
    }
    let data = render(view, &columns, &rows);
    (columns, data)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::WorkingTable;
    fn table_fixture() -> WorkingTable {
        WorkingTable::from_rows(
            "t",
            &["name", "year", "status"],
            &[
                ["Aina", "2023", "Ya"],
                ["Badrul", "2021", "Tidak"],
                ["Chong", "2022", ""],
                ["Devi", "2023", "Ya"],
                ["Ehsan", "", "Tidak Dinyatakan"],
            ],
        )
        .unwrap()
    }
    #[test]
    fn paginates_with_post_search_total() {
        let t = table_fixture();
        let payload = table(&t.view(), &TableQuery::new(2, 2), 100).unwrap();
        assert_eq!(payload.pagination.total, 5);
        assert_eq!(payload.pagination.pages, 3);
        assert!(payload.pagination.has_next && payload.pagination.has_prev);
        assert_eq!(payload.data[0]["name"], "Chong");
        assert_eq!(payload.data[0]["status"], "");
        let searched = table(&t.view(), &TableQuery::new(1, 10).with_search("YA"), 100).unwrap();
        assert_eq!(searched.pagination.total, 2);
    }
    #[test]
    fn numeric_sort_is_stable() {
        let t = table_fixture();
        let query = TableQuery::new(1, 10).with_sort("year", SortDirection::Desc);
        let payload = table(&t.view(), &query, 100).unwrap();
        let names: Vec<&str> = payload.data.iter().map(|r| r["name"].as_str()).collect();
        assert_eq!(names, vec!["Aina", "Devi", "Chong", "Badrul", "Ehsan"]);
    }
    #[test]
    fn projection_drops_unknown_columns() {
        let t = table_fixture();
        let query = TableQuery::new(1, 10).with_columns(["status", "missing", "name"]);
        let payload = table(&t.view(), &query, 100).unwrap();
        assert_eq!(payload.columns, vec!["status", "name"]);
        assert_eq!(payload.data[0].len(), 2);
    }
    #[test]
    fn rejects_zero_page_and_clamps_size() {
        let t = table_fixture();
        assert!(table(&t.view(), &TableQuery::new(0, 10), 100).is_err());
        assert!(table(&t.view(), &TableQuery::new(1, 0), 100).is_err());
        assert_eq!(table(&t.view(), &TableQuery::new(1, 500), 3).unwrap().pagination.per_page, 3);
        let (_, rows) = export_rows(&t.view(), &TableQuery::default(), 2);
        assert_eq!(rows.len(), 2);
    }
}
