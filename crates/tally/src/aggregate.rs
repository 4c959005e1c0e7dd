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
//! Aggregation kernel: one-column distributions, multi-select frequencies,
//! cross-tabulations and dual-series comparisons over a filtered view.
//!
//! Every function takes already-resolved physical column names and returns a
//! [`ChartPayload`]; the sentinel payload stands in whenever nothing is countable.
use crate::categories::CategorySet;
use crate::chart::{round_to, ChartPayload, Dataset};
use crate::data::TableView;
use crate::normalize::{label_key, selections, value_at};
use indexmap::IndexMap;
use itertools::Itertools;
use serde_json::{json, Value};
use std::cmp::Ordering;
use tracing::debug;
/// Counts of non-absent values, in first-seen order.
pub fn value_counts(view: &TableView<'_>, column: &str) -> IndexMap<String, u64> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for &row in view.rows() {
        if let Some(value) = value_at(view, column, row) {
            *counts.entry(value.into_owned()).or_insert(0) += 1;
        }
    }
    counts
}
/// Descending count; ties keep first-seen order.
fn by_count_desc(counts: IndexMap<String, u64>) -> Vec<(String, u64)> {
    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .collect()
}
/// Canonical labels first (zero when missing), then unknown labels by count.
fn apply_order(counts: IndexMap<String, u64>, order: &[&str]) -> Vec<(String, u64)> {
    let mut remaining = counts;
    let mut ordered = Vec::with_capacity(order.len() + remaining.len());
    for label in order {
        let key = label_key(label);
        let mut total = 0;
        remaining.retain(|value, count| {
            if label_key(value) == key {
                total += *count;
                false
            } else {
                true
            }
        });
        ordered.push(((*label).to_string(), total));
    }
    ordered.extend(by_count_desc(remaining));
    ordered
}
fn unzip_series(pairs: Vec<(String, u64)>) -> (Vec<String>, Vec<u64>) {
    pairs.into_iter().unzip()
}
pub fn distribution(
    view: &TableView<'_>,
    column: &str,
    dataset_label: &str,
    order: Option<&[&str]>,
) -> ChartPayload {
    let counts = value_counts(view, column);
    if counts.is_empty() {
        debug!(column, rows = view.row_count(), "distribution has no countable values");
        return ChartPayload::no_data(dataset_label);
    }
    let total: u64 = counts.values().sum();
    let pairs = match order {
        Some(order) if !order.is_empty() => apply_order(counts, order),
        _ => by_count_desc(counts),
    };
    let (labels, data) = unzip_series(pairs);
    let mut analysis = IndexMap::new();
    analysis.insert("total_responses".to_string(), json!(total));
    ChartPayload::new(labels, vec![Dataset::new(dataset_label, data).per_point_colors()]).with_analysis(analysis)
}
fn multi_select_analysis(responses: u64, selections: u64, top: Option<(&String, &u64)>, distinct: usize) -> IndexMap<String, Value> {
    let mut analysis = IndexMap::new();
    analysis.insert("total_survey_responses".to_string(), json!(responses));
    analysis.insert("total_individual_selections".to_string(), json!(selections));
    analysis.insert("top_selection".to_string(), json!(top.map(|(label, _)| label.clone())));
    analysis.insert("top_selection_count".to_string(), json!(top.map_or(0, |(_, count)| *count)));
    let average = if responses == 0 {
        0.0
    } else {
        round_to(selections as f64 / responses as f64, 2)
    };
    analysis.insert("average_selections_per_response".to_string(), json!(average));
    analysis.insert("distinct_selections".to_string(), json!(distinct));
    analysis
}
/// Decomposes each non-absent cell and counts selections. A row may count
/// under several labels; with a set each label counts at most once per row.
/// `order` overrides the set's label order.
pub fn multi_select(
    view: &TableView<'_>,
    column: &str,
    dataset_label: &str,
    set: Option<&CategorySet>,
    order: Option<&[&str]>,
) -> ChartPayload {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    let mut responses = 0u64;
    let mut total_selections = 0u64;
    for &row in view.rows() {
        let Some(cell) = value_at(view, column, row) else {
            continue;
        };
        responses += 1;
        let picked = selections(&cell, set);
        if picked.is_empty() {
            debug!(column, row, "multi-select cell yielded no selections");
        }
        for label in picked {
            total_selections += 1;
            *counts.entry(label).or_insert(0) += 1;
        }
    }
    if counts.is_empty() {
        return ChartPayload::no_data(dataset_label)
            .with_analysis(multi_select_analysis(responses, 0, None, 0));
    }
    let top = counts.iter().max_by(|a, b| a.1.cmp(b.1).then(Ordering::Greater));
    let analysis = multi_select_analysis(responses, total_selections, top, counts.len());
    let pairs = match (order, set) {
        (Some(order), _) if !order.is_empty() => apply_order(counts, order),
        (_, Some(set)) => apply_order(counts, &set.labels()),
        _ => by_count_desc(counts),
    };
    let (labels, data) = unzip_series(pairs);
    ChartPayload::new(labels, vec![Dataset::new(dataset_label, data).per_point_colors()]).with_analysis(analysis)
}
/// Numeric order when every label parses as a number, else lexicographic.
pub fn sort_labels(labels: &mut [String]) {
    let numeric: Option<Vec<f64>> = labels.iter().map(|l| l.trim().parse::<f64>().ok()).collect();
    if numeric.is_some() {
        labels.sort_by(|a, b| {
            let x = a.trim().parse::<f64>().unwrap_or(f64::NAN);
            let y = b.trim().parse::<f64>().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        });
    } else {
        labels.sort();
    }
}
/// Stacked counts: one dataset per value of `column_col`, labelled along `row_col`.
pub fn cross_tab(view: &TableView<'_>, row_col: &str, column_col: &str, dataset_label: &str) -> ChartPayload {
    let mut cells: IndexMap<(String, String), u64> = IndexMap::new();
    for &row in view.rows() {
        let (Some(r), Some(c)) = (value_at(view, row_col, row), value_at(view, column_col, row)) else {
            continue;
        };
        *cells.entry((r.into_owned(), c.into_owned())).or_insert(0) += 1;
    }
    if cells.is_empty() {
        return ChartPayload::no_data(dataset_label);
    }
    let mut labels: Vec<String> = cells.keys().map(|(r, _)| r.clone()).unique().collect();
    let mut series: Vec<String> = cells.keys().map(|(_, c)| c.clone()).unique().collect();
    sort_labels(&mut labels);
    sort_labels(&mut series);
    let datasets = series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let data = labels
                .iter()
                .map(|l| cells.get(&(l.clone(), s.clone())).copied().unwrap_or(0))
                .collect();
            Dataset::new(s.clone(), data).series_color(i)
        })
        .collect();
    ChartPayload::new(labels, datasets)
}
/// Two columns on one value axis, e.g. expected against current salary bracket.
pub fn dual_series(
    view: &TableView<'_>,
    (column_a, label_a): (&str, &str),
    (column_b, label_b): (&str, &str),
) -> ChartPayload {
    let counts_a = value_counts(view, column_a);
    let counts_b = value_counts(view, column_b);
    if counts_a.is_empty() && counts_b.is_empty() {
        return ChartPayload::no_data(format!("{label_a} / {label_b}"));
    }
    let mut labels: Vec<String> = counts_a.keys().chain(counts_b.keys()).cloned().unique().collect();
    sort_labels(&mut labels);
    let series = |counts: &IndexMap<String, u64>| -> Vec<u64> {
        labels.iter().map(|l| counts.get(l).copied().unwrap_or(0)).collect()
    };
    let datasets = vec![
        Dataset::new(label_a, series(&counts_a)).series_color(0),
        Dataset::new(label_b, series(&counts_b)).series_color(1),
    ];
    ChartPayload::new(labels, datasets)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::WorkingTable;
    fn table() -> WorkingTable {
        WorkingTable::from_rows(
            "t",
            &["status", "year", "gender", "a", "b"],
            &[
                ["Ya", "2023", "L", "RM1000-RM1999", "RM2000-RM2999"],
                ["Tidak", "2024", "P", "RM2000-RM2999", "RM2000-RM2999"],
                ["Ya", "2023", "P", "", "RM5000 ke atas"],
                ["Tidak Dinyatakan", "2022", "", "RM1000-RM1999", ""],
                ["Ya", "", "L", "RM5000 ke atas", ""],
            ],
        )
        .unwrap()
    }
    #[test]
    fn distribution_orders_by_count_and_skips_absent() {
        let t = table();
        let payload = distribution(&t.view(), "status", "Status", None);
        assert_eq!(payload.labels, vec!["Ya", "Tidak"]);
        assert_eq!(payload.datasets[0].data, vec![3, 1]);
    }
    #[test]
    fn canonical_order_fills_zeros_and_appends_unknowns() {
        let t = table();
        let payload = distribution(&t.view(), "status", "Status", Some(&["Tidak", "Mungkin"]));
        assert_eq!(payload.labels, vec!["Tidak", "Mungkin", "Ya"]);
        assert_eq!(payload.datasets[0].data, vec![1, 0, 3]);
    }
    #[test]
    fn cross_tab_sorts_numeric_labels() {
        let t = table();
        let payload = cross_tab(&t.view(), "year", "gender", "Tahun");
        assert_eq!(payload.labels, vec!["2023", "2024"]);
        let labels: Vec<&str> = payload.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["L", "P"]);
        assert_eq!(payload.datasets[0].data, vec![1, 0]);
        assert_eq!(payload.datasets[1].data, vec![1, 1]);
    }
    #[test]
    fn dual_series_uses_label_union() {
        let t = table();
        let payload = dual_series(&t.view(), ("a", "Semasa"), ("b", "Jangkaan"));
        assert_eq!(payload.labels, vec!["RM1000-RM1999", "RM2000-RM2999", "RM5000 ke atas"]);
        assert_eq!(payload.datasets[0].data, vec![2, 1, 1]);
        assert_eq!(payload.datasets[1].data, vec![0, 2, 1]);
    }
    #[test]
    fn multi_select_counts_responses_and_selections() {
        let t = WorkingTable::from_rows(
            "t",
            &["cabaran"],
            &[
                ["Tiada pengalaman kerja yang mencukupi, Terlalu banyak persaingan dalam bidang saya"],
                ["Gaji yang ditawarkan terlalu rendah; sesuatu yang lain"],
                ["Tidak berkenaan"],
                [""],
            ],
        )
        .unwrap();
        let payload = multi_select(&t.view(), "cabaran", "Cabaran", Some(&crate::categories::JOB_CHALLENGES), None);
        let analysis = payload.analysis.clone().unwrap();
        assert_eq!(analysis["total_survey_responses"], json!(3));
        assert_eq!(analysis["total_individual_selections"], json!(4));
        assert_eq!(analysis["distinct_selections"], json!(4));
        assert_eq!(payload.labels.len(), 13);
        assert_eq!(payload.labels.last().map(String::as_str), Some("Others"));
        let raw = multi_select(&t.view(), "cabaran", "Cabaran", None, None);
        assert_eq!(raw.datasets[0].total(), 5);
    }
    #[test]
    fn empty_view_yields_sentinel() {
        let t = table();
        let empty = t.view().filter(|_| false);
        assert!(distribution(&empty, "status", "Status", None).is_no_data());
        assert!(cross_tab(&empty, "year", "gender", "x").is_no_data());
        assert!(dual_series(&empty, ("a", "x"), ("b", "y")).is_no_data());
    }
}
