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
use chrono::{DateTime, Utc};
use serde::Serialize;
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityPayload {
    pub meta: Meta,
    #[serde(rename = "qualityBands")]
    pub quality_bands: Vec<Band>,
    pub criteria: Vec<CriterionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Resolution>,
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    pub total_graduates: usize,
    pub average_score: f64,
    pub average_score_pct: f64,
    pub high_quality_pct: f64,
    pub medium_quality_pct: f64,
    pub low_quality_pct: f64,
    pub entrepreneurial_pct: f64,
    pub aligned_role_pct: f64,
    pub generated_at: DateTime<Utc>,
    /// True when the time-to-employment criterion reports the fixed distribution.
    pub static_time_distribution: bool,
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub label: &'static str,
    #[serde(rename = "scoreRange")]
    pub score_range: &'static str,
    pub count: usize,
    pub percentage: f64,
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBucket {
    pub score: u8,
    pub label: &'static str,
    pub count: usize,
    pub percentage: f64,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub label: String,
    pub value: String,
}
impl Insight {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
    pub fn pct(label: impl Into<String>, value: f64) -> Self {
        Self::new(label, format!("{value:.1}%"))
    }
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionPayload {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    #[serde(rename = "iconBg")]
    pub icon_bg: &'static str,
    pub average_score: f64,
    pub average_pct: f64,
    pub analysis: String,
    /// Scores 2, 1, 0 in that order.
    pub distribution: Vec<ScoreBucket>,
    pub insights: Vec<Insight>,
}
impl CriterionPayload {
    pub fn distribution_total(&self) -> usize {
        self.distribution.iter().map(|b| b.count).sum()
    }
    pub fn count_for(&self, score: u8) -> usize {
        self.distribution
            .iter()
            .find(|b| b.score == score)
            .map_or(0, |b| b.count)
    }
}
