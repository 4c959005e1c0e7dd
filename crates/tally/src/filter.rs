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
use crate::data::{Column, ColumnData, TableView, WorkingTable};
use crate::resolver::ColumnResolver;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};
/// Request-scoped constraints: key (logical or physical) to accepted values.
/// Values OR within a key, keys AND together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    filters: IndexMap<String, Vec<String>>,
}
impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, values);
        self
    }
    pub fn insert<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }
    /// Groups repeated keys, as produced by `?year=2023&year=2024`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut spec = Self::new();
        for (key, value) in pairs {
            spec.insert(key, [value]);
        }
        spec
    }
    /// Filters that actually constrain: blank values removed, empty lists dropped.
    pub fn effective(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.filters.iter().filter_map(|(key, values)| {
            let accepted: Vec<&str> = values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()).collect();
            (!accepted.is_empty()).then_some((key.as_str(), accepted))
        })
    }
    pub fn is_empty(&self) -> bool {
        self.effective().next().is_none()
    }
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }
}
/// The accepted values of one filter, pre-coerced for both match strategies.
#[derive(Debug)]
struct Accepted {
    texts: HashSet<String>,
    numbers: Vec<f64>,
}
impl Accepted {
    fn compile(values: &[&str]) -> Self {
        Self {
            texts: values.iter().map(|v| (*v).to_string()).collect(),
            numbers: values
                .iter()
                .filter_map(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .collect(),
        }
    }
    fn matches(&self, column: &Column, row: usize) -> bool {
        let text_hit = column
            .text(row)
            .is_some_and(|cell| self.texts.contains(cell.trim()));
        text_hit
            || (!self.numbers.is_empty()
                && column
                    .to_f64(row)
                    .is_some_and(|cell| self.numbers.iter().any(|n| (n - cell).abs() < f64::EPSILON)))
    }
}
#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    pub view: TableView<'a>,
    /// Keys that narrowed (or were evaluated against) the subset.
    pub applied: Vec<String>,
    /// Keys ignored: unresolved column or no coercible value.
    pub skipped: Vec<String>,
}
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine<'a> {
    resolver: ColumnResolver<'a>,
}
impl<'a> FilterEngine<'a> {
    pub fn new(resolver: ColumnResolver<'a>) -> Self {
        Self { resolver }
    }
    pub fn apply(&self, table: &'a WorkingTable, spec: &FilterSpec) -> FilterOutcome<'a> {
        let mut view = table.view();
        let mut applied = Vec::new();
        let mut skipped = Vec::new();
        for (key, values) in spec.effective() {
            if view.is_empty() {
                debug!(key, "subset already empty; remaining filters not evaluated");
                applied.push(key.to_string());
                continue;
            }
            let Some(column_name) = self.resolver.resolve(key) else {
                warn!(key, "filter column unresolved; filter skipped");
                skipped.push(key.to_string());
                continue;
            };
            let Some(column) = table.get_column(column_name) else {
                skipped.push(key.to_string());
                continue;
            };
            let accepted = Accepted::compile(&values);
            if column.data_type().is_numeric() && accepted.numbers.is_empty() {
                warn!(key, column = column_name, values = ?values, "no filter value coerces to the numeric column; filter skipped");
                skipped.push(key.to_string());
                continue;
            }
            let before = view.row_count();
            view = view.filter(|row| accepted.matches(column, row));
            debug!(key, column = column_name, before, after = view.row_count(), "filter applied");
            applied.push(key.to_string());
        }
        FilterOutcome {
            view,
            applied,
            skipped,
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn table() -> WorkingTable {
        WorkingTable::from_rows(
            "t",
            &["Tahun graduasi anda?", "Jantina anda?"],
            &[["2023.0", "Lelaki"], ["2024.0", "Perempuan"], ["2023.5", " Lelaki "]],
        )
        .unwrap()
    }
    #[test]
    fn year_matches_numeric_and_string_forms() {
        let t = table();
        let engine = FilterEngine::new(ColumnResolver::new(&t));
        let out = engine.apply(&t, &FilterSpec::new().with("graduation_year", ["2023"]));
        assert_eq!(out.view.rows(), &[0]);
        let out = engine.apply(&t, &FilterSpec::new().with("graduation_year", ["2023", "2024"]));
        assert_eq!(out.view.rows(), &[0, 1]);
    }
    #[test]
    fn blank_values_mean_no_filter() {
        let t = table();
        let engine = FilterEngine::new(ColumnResolver::new(&t));
        let spec = FilterSpec::new().with("gender", [""]).with("graduation_year", Vec::<String>::new());
        assert!(spec.is_empty());
        assert_eq!(engine.apply(&t, &spec).view.row_count(), 3);
    }
    #[test]
    fn unresolved_and_uncoercible_filters_are_skipped() {
        let t = table();
        let engine = FilterEngine::new(ColumnResolver::new(&t));
        let spec = FilterSpec::new()
            .with("household_income", ["RM1000"])
            .with("graduation_year", ["bukan tahun"])
            .with("gender", ["Lelaki"]);
        let out = engine.apply(&t, &spec);
        assert_eq!(out.skipped, vec!["household_income".to_string(), "graduation_year".to_string()]);
        assert_eq!(out.view.rows(), &[0, 2]);
    }
    #[test]
    fn physical_column_names_work_as_keys() {
        let t = table();
        let engine = FilterEngine::new(ColumnResolver::new(&t));
        let out = engine.apply(&t, &FilterSpec::from_pairs([("Jantina anda?", "Perempuan")]));
        assert_eq!(out.view.rows(), &[1]);
    }
}
