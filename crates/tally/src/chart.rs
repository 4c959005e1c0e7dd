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
use crate::resolver::Resolution;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
pub const NO_DATA_LABEL: &str = "No Data Available";
pub const PRIMARY_PALETTE: &[&str] = &["#2066a8", "#3594cc", "#8cc5e3", "#a00000", "#c46666", "#d8a6a6"];
pub const EXTENDED_PALETTE: &[&str] = &[
    "#296899", "#274754", "#cc7700", "#e8c468", "#ba454d", "#2066a8", "#cdecec", "#8ec1da", "#f6d6c2",
    "#ededed", "#d47264", "#ae282c",
];
const NEUTRAL: &str = "#6b7280";
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorHint {
    Single(String),
    PerPoint(Vec<String>),
}
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<ColorHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
}
impl Dataset {
    pub fn new(label: impl Into<String>, data: Vec<u64>) -> Self {
        Self {
            label: label.into(),
            data,
            background_color: None,
            border_color: None,
            border_width: None,
        }
    }
    /// One colour per bar/slice, cycling the extended palette.
    pub fn per_point_colors(mut self) -> Self {
        let colors = (0..self.data.len())
            .map(|i| EXTENDED_PALETTE[i % EXTENDED_PALETTE.len()].to_string())
            .collect();
        self.background_color = Some(ColorHint::PerPoint(colors));
        self.border_width = Some(1);
        self
    }
    /// Series colour for stacked or grouped charts.
    pub fn series_color(mut self, index: usize) -> Self {
        let color = PRIMARY_PALETTE[index % PRIMARY_PALETTE.len()].to_string();
        self.border_color = Some(ColorHint::Single(color.clone()));
        self.background_color = Some(ColorHint::Single(color));
        self.border_width = Some(1);
        self
    }
    pub fn total(&self) -> u64 {
        self.data.iter().sum()
    }
}
/// `{labels, datasets, analysis?, diagnostic?}` as consumed by the chart front-end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<IndexMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Resolution>,
}
impl ChartPayload {
    pub fn new(labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self {
            labels,
            datasets,
            analysis: None,
            diagnostic: None,
        }
    }
    /// The well-formed "nothing to show" payload.
    pub fn no_data(dataset_label: impl Into<String>) -> Self {
        let mut dataset = Dataset::new(dataset_label, vec![1]);
        dataset.background_color = Some(ColorHint::Single(NEUTRAL.to_string()));
        Self::new(vec![NO_DATA_LABEL.to_string()], vec![dataset])
    }
    pub fn is_no_data(&self) -> bool {
        self.labels.len() == 1 && self.labels[0] == NO_DATA_LABEL
    }
    pub fn with_analysis(mut self, analysis: IndexMap<String, Value>) -> Self {
        self.analysis = Some(analysis);
        self
    }
    pub fn with_diagnostic(mut self, diagnostic: Resolution) -> Self {
        self.diagnostic = Some(diagnostic);
        self
    }
    /// Label/count/percentage rows for the first dataset.
    pub fn table_rows(&self) -> Vec<TableRow> {
        let Some(dataset) = self.datasets.first() else {
            return Vec::new();
        };
        if self.is_no_data() {
            return Vec::new();
        }
        let total = dataset.total();
        self.labels
            .iter()
            .zip(&dataset.data)
            .map(|(label, &count)| TableRow {
                label: label.clone(),
                count,
                percentage: percent(count as usize, total as usize),
            })
            .collect()
    }
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub count: u64,
    pub percentage: f64,
}
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
/// `part / whole * 100` to one decimal; zero when `whole` is zero.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round_to(part as f64 / whole as f64 * 100.0, 1)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn sentinel_shape() {
        let payload = ChartPayload::no_data("Status");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["labels"], serde_json::json!(["No Data Available"]));
        assert_eq!(json["datasets"][0]["data"], serde_json::json!([1]));
        assert_eq!(json["datasets"][0]["label"], "Status");
        assert!(json.get("analysis").is_none());
        assert!(payload.table_rows().is_empty());
    }
    #[test]
    fn percent_rounds_and_guards_zero() {
        assert_eq!(percent(1, 3), 33.3);
        assert_eq!(percent(2, 3), 66.7);
        assert_eq!(percent(5, 0), 0.0);
    }
}
