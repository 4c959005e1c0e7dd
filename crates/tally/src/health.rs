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
use crate::aggregate::{sort_labels, value_counts};
use crate::chart::percent;
use crate::data::{ColumnData, TableView, WorkingTable};
use crate::filter::FilterOutcome;
use crate::metrics::{classify_employment, rate, EmploymentClass};
use crate::normalize::value_at;
use crate::resolver::ColumnResolver;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
pub const NOT_AVAILABLE: &str = "N/A";
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_records: usize,
    pub employment_rate: f64,
    pub fields_of_study_count: usize,
    pub year_range: String,
    pub total_institutions: usize,
    pub gender_distribution: IndexMap<String, u64>,
    pub filter_applied: bool,
    /// Filter keys that constrained the subset.
    pub applied_filters: Vec<String>,
    /// Filter keys ignored: unresolved column or no coercible value.
    pub skipped_filters: Vec<String>,
}
fn distinct(view: &TableView<'_>, column: Option<&str>) -> usize {
    column.map_or(0, |c| value_counts(view, c).len())
}
fn year_range(view: &TableView<'_>, column: Option<&str>) -> String {
    let Some(column) = column else {
        return NOT_AVAILABLE.to_string();
    };
    let mut years: Vec<String> = value_counts(view, column).into_keys().collect();
    sort_labels(&mut years);
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => format!("{first} - {last}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}
pub fn summary(outcome: &FilterOutcome<'_>, resolver: &ColumnResolver<'_>) -> SummaryStats {
    let view = &outcome.view;
    SummaryStats {
        total_records: view.row_count(),
        employment_rate: rate(view, resolver.resolve("employment_status"), |v| {
            classify_employment(v) == EmploymentClass::Employed
        }),
        fields_of_study_count: distinct(view, resolver.resolve("field_of_study")),
        year_range: year_range(view, resolver.resolve("graduation_year")),
        total_institutions: distinct(view, resolver.resolve("institution")),
        gender_distribution: resolver
            .resolve("gender")
            .map(|c| value_counts(view, c))
            .unwrap_or_default(),
        filter_applied: !outcome.applied.is_empty(),
        applied_filters: outcome.applied.clone(),
        skipped_filters: outcome.skipped.clone(),
    }
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHealth {
    pub column: String,
    pub missing: usize,
    pub missing_pct: f64,
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataHealth {
    pub row_count: usize,
    pub column_count: usize,
    pub duplicate_rows: usize,
    pub columns: Vec<ColumnHealth>,
}
/// Missing-value shares per column and the number of rows repeating an earlier row.
pub fn data_health(table: &WorkingTable) -> DataHealth {
    let view = table.view();
    let rows = table.row_count();
    let columns = table
        .column_names()
        .iter()
        .map(|name| {
            let missing = (0..rows).filter(|&row| value_at(&view, name, row).is_none()).count();
            ColumnHealth {
                column: name.clone(),
                missing,
                missing_pct: percent(missing, rows),
            }
        })
        .collect();
    let mut seen = HashSet::with_capacity(rows);
    let mut duplicate_rows = 0;
    for row in 0..rows {
        let key: Vec<Option<String>> = table
            .column_names()
            .iter()
            .map(|name| table.get_column(name).and_then(|c| c.get_string(row)))
            .collect();
        if !seen.insert(key) {
            duplicate_rows += 1;
        }
    }
    DataHealth {
        row_count: rows,
        column_count: table.column_count(),
        duplicate_rows,
        columns,
    }
}
