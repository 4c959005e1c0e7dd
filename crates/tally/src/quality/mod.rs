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
//! Graduate-quality rubric: six per-row scorers summed into a composite in
//! `[0, 12]`, banded, and summarised per criterion.
pub mod payload;
pub mod scorers;
use crate::chart::{percent, round_to};
use crate::config::EngineConfig;
use crate::data::TableView;
use crate::metrics::mode;
use crate::normalize::lowered_at;
use crate::resolver::{ColumnResolver, Resolution};
use chrono::Utc;
pub use payload::{Band, CriterionPayload, Insight, Meta, QualityPayload, ScoreBucket};
use rayon::prelude::*;
pub use scorers::{score_row, Criterion, RowSignals, CRITERIA};
use tracing::{debug, warn};
pub const MAX_COMPOSITE: u8 = 12;
pub const HIGH_BAND_MIN: u8 = 10;
pub const MEDIUM_BAND_MIN: u8 = 7;
pub const QUALITY_FIELDS: &[&str] = &[
    "job_type",
    "work_status",
    "employment_sectors",
    "industry",
    "current_salary",
    "time_to_employment",
];
pub const INSUFFICIENT_DATA: &str = "Data tidak mencukupi untuk analisis.";
const LIMITED_DATA: &str = "Data terhad";
/// The fixed time-to-employment shares reported under `static_time_distribution`.
pub const STATIC_TIME_SHARES: [f64; 3] = [0.0, 17.9, 82.1];
const STATIC_TIME_AVERAGE: f64 = 0.179;
const STATIC_TIME_AVERAGE_PCT: f64 = 9.0;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityBand {
    High,
    Medium,
    Low,
}
impl QualityBand {
    pub const ALL: [QualityBand; 3] = [QualityBand::High, QualityBand::Medium, QualityBand::Low];
    pub fn classify(composite: u8) -> Self {
        if composite >= HIGH_BAND_MIN {
            Self::High
        } else if composite >= MEDIUM_BAND_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "Graduan Berkualiti Tinggi",
            Self::Medium => "Graduan Berkualiti Sederhana",
            Self::Low => "Graduan Berkualiti Rendah",
        }
    }
    pub fn score_range(self) -> &'static str {
        match self {
            Self::High => ">= 10",
            Self::Medium => "7 - 9",
            Self::Low => "<= 6",
        }
    }
}
/// Resolves the rubric's columns. The status question falls back to
/// `employment_status` on exports that lack a separate work-status column.
pub fn resolve_fields(resolver: &ColumnResolver<'_>) -> Resolution {
    let mut resolution = resolver.resolve_all(QUALITY_FIELDS);
    if let Some(position) = resolution.unresolved.iter().position(|k| k == "work_status") {
        if let Some(column) = resolver.resolve("employment_status") {
            debug!(column, "work status read from employment status column");
            resolution.unresolved.remove(position);
            resolution.resolved.insert("work_status".to_string(), column.to_string());
        }
    }
    resolution
}
fn signals_at(view: &TableView<'_>, resolution: &Resolution, row: usize) -> RowSignals {
    let get = |key: &str| lowered_at(view, resolution.resolved.get(key).map(String::as_str), row);
    RowSignals {
        job_type: get("job_type"),
        work_status: get("work_status"),
        sector: get("employment_sectors"),
        industry: get("industry"),
        salary: get("current_salary"),
        time_to_employment: get("time_to_employment"),
    }
}
/// Criterion scores for every row of the view, in view order.
pub fn score_view(view: &TableView<'_>, resolution: &Resolution) -> Vec<[u8; 6]> {
    view.rows()
        .par_iter()
        .map(|&row| score_row(&signals_at(view, resolution, row)))
        .collect()
}
fn bucket(criterion: &Criterion, score: u8, count: usize, percentage: f64) -> ScoreBucket {
    ScoreBucket {
        score,
        label: criterion.label_for(score),
        count,
        percentage,
    }
}
fn criterion_shell(criterion: &Criterion) -> CriterionPayload {
    CriterionPayload {
        id: criterion.id,
        title: criterion.title,
        description: criterion.description,
        icon: criterion.icon,
        icon_bg: criterion.icon_bg,
        average_score: 0.0,
        average_pct: 0.0,
        analysis: INSUFFICIENT_DATA.to_string(),
        distribution: [2, 1, 0].iter().map(|&s| bucket(criterion, s, 0, 0.0)).collect(),
        insights: Vec::new(),
    }
}
/// Zero-count payload for an empty subset.
pub fn default_payload(config: &EngineConfig) -> QualityPayload {
    QualityPayload {
        meta: Meta {
            total_graduates: 0,
            average_score: 0.0,
            average_score_pct: 0.0,
            high_quality_pct: 0.0,
            medium_quality_pct: 0.0,
            low_quality_pct: 0.0,
            entrepreneurial_pct: 0.0,
            aligned_role_pct: 0.0,
            generated_at: Utc::now(),
            static_time_distribution: config.static_time_distribution,
        },
        quality_bands: QualityBand::ALL
            .iter()
            .map(|band| Band {
                label: band.label(),
                score_range: band.score_range(),
                count: 0,
                percentage: 0.0,
            })
            .collect(),
        criteria: CRITERIA.iter().map(criterion_shell).collect(),
        diagnostic: None,
    }
}
/// Score counts for one criterion, indexed by score.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    counts: [usize; 3],
    total: usize,
}
impl Tally {
    fn of(scores: &[[u8; 6]], index: usize) -> Self {
        let mut counts = [0usize; 3];
        for row in scores {
            counts[usize::from(row[index].min(2))] += 1;
        }
        Self {
            counts,
            total: scores.len(),
        }
    }
    fn count(&self, score: u8) -> usize {
        self.counts[usize::from(score)]
    }
    fn pct(&self, score: u8) -> f64 {
        percent(self.count(score), self.total)
    }
    fn at_least_one_pct(&self) -> f64 {
        percent(self.counts[1] + self.counts[2], self.total)
    }
    fn average(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum = self.counts[1] + 2 * self.counts[2];
        round_to(sum as f64 / self.total as f64, 2)
    }
}
fn insights_for(
    criterion: &Criterion,
    tally: &Tally,
    view: &TableView<'_>,
    resolution: &Resolution,
) -> (Vec<Insight>, String) {
    let column = |key: &str| resolution.resolved.get(key).map(String::as_str);
    let dominant = |key: &str| mode(view, column(key)).unwrap_or_else(|| LIMITED_DATA.to_string());
    let (top, middle, bottom) = (tally.pct(2), tally.pct(1), tally.pct(0));
    match criterion.id {
        scorers::JOB_ALIGNMENT => (
            vec![
                Insight::pct("Peranan eksekutif & ke atas", top),
                Insight::pct("Padanan bidang pengajian", tally.at_least_one_pct()),
            ],
            format!("{top:.1}% graduan berada pada peranan pengurusan muda atau kepakaran dalam bidang berkaitan."),
        ),
        scorers::SALARY_PROGRESSION => (
            vec![
                Insight::pct("Gaji >= RM5,000", top),
                Insight::new("Julat gaji dominan", dominant("current_salary")),
            ],
            format!("{top:.1}% graduan memperoleh gaji RM5,000 ke atas, manakala {bottom:.1}% masih di bawah RM3,000."),
        ),
        scorers::EMPLOYER_QUALITY => (
            vec![
                Insight::pct("Majikan berskala besar", top),
                Insight::pct("SME / syarikat tempatan", middle),
            ],
            format!("{top:.1}% graduan diserap ke dalam organisasi besar yang berstruktur, menunjukkan kebolehpasaran tinggi."),
        ),
        scorers::TIME_TO_EMPLOYMENT => (
            vec![
                Insight::pct("Kerjaya bermula <= 12 bulan", top),
                Insight::pct("Mengambil > 12 bulan", bottom),
            ],
            format!("{top:.1}% graduan mendapat pekerjaan dalam tempoh kurang dari 1 tahun, manakala {bottom:.1}% mengambil masa lebih dari 1 tahun."),
        ),
        scorers::INDUSTRY_RELEVANCE => (
            vec![
                Insight::pct("Industri strategik", top),
                Insight::new("Industri utama", dominant("industry")),
            ],
            format!("{top:.1}% graduan ditempatkan dalam industri strategik berimpak tinggi."),
        ),
        _ => (
            vec![
                Insight::pct("Usahawan / pencipta kerja", top),
                Insight::pct("Perniagaan solo aktif", middle),
            ],
            format!("{top:.1}% graduan mula menggaji pekerja lain, manakala {middle:.1}% mengendalikan perniagaan secara solo."),
        ),
    }
}
fn static_time_criterion(criterion: &Criterion, total: usize) -> CriterionPayload {
    let middle = (total as f64 * STATIC_TIME_SHARES[1] / 100.0).round() as usize;
    let middle = middle.min(total);
    let counts = [0, middle, total - middle];
    let [top_pct, middle_pct, bottom_pct] = STATIC_TIME_SHARES;
    CriterionPayload {
        average_score: STATIC_TIME_AVERAGE,
        average_pct: STATIC_TIME_AVERAGE_PCT,
        analysis: format!(
            "{top_pct:.1}% graduan mendapat pekerjaan dalam tempoh kurang dari 1 tahun, manakala {bottom_pct:.1}% mengambil masa lebih dari 3 tahun."
        ),
        distribution: vec![
            bucket(criterion, 2, counts[0], top_pct),
            bucket(criterion, 1, counts[1], middle_pct),
            bucket(criterion, 0, counts[2], bottom_pct),
        ],
        insights: vec![
            Insight::pct("Kerjaya bermula <= 12 bulan", top_pct),
            Insight::pct("Mengambil > 12 bulan", bottom_pct),
        ],
        ..criterion_shell(criterion)
    }
}
fn criterion_payload(
    criterion: &Criterion,
    tally: &Tally,
    view: &TableView<'_>,
    resolution: &Resolution,
) -> CriterionPayload {
    let average = tally.average();
    let (insights, analysis) = insights_for(criterion, tally, view, resolution);
    CriterionPayload {
        average_score: average,
        average_pct: round_to(average / 2.0 * 100.0, 1),
        analysis,
        distribution: [2u8, 1, 0]
            .iter()
            .map(|&s| bucket(criterion, s, tally.count(s), tally.pct(s)))
            .collect(),
        insights,
        ..criterion_shell(criterion)
    }
}
pub fn compute(view: &TableView<'_>, resolver: &ColumnResolver<'_>, config: &EngineConfig) -> QualityPayload {
    let resolution = resolve_fields(resolver);
    if !resolution.is_complete() {
        warn!(unresolved = ?resolution.unresolved, "quality rubric columns unresolved; affected criteria score 0");
    }
    let diagnostic = (!resolution.is_complete()).then(|| resolution.clone());
    let total = view.row_count();
    if total == 0 {
        debug!("quality subset empty");
        return QualityPayload {
            diagnostic,
            ..default_payload(config)
        };
    }
    let scores = score_view(view, &resolution);
    let composites: Vec<u8> = scores.iter().map(|row| row.iter().sum()).collect();
    let mut band_counts = [0usize; 3];
    for &composite in &composites {
        let slot = match QualityBand::classify(composite) {
            QualityBand::High => 0,
            QualityBand::Medium => 1,
            QualityBand::Low => 2,
        };
        band_counts[slot] += 1;
    }
    let composite_sum: usize = composites.iter().map(|&c| usize::from(c)).sum();
    let average_score = round_to(composite_sum as f64 / total as f64, 2);
    let tallies: Vec<Tally> = (0..CRITERIA.len()).map(|i| Tally::of(&scores, i)).collect();
    let criteria = CRITERIA
        .iter()
        .zip(&tallies)
        .map(|(criterion, tally)| {
            if criterion.id == scorers::TIME_TO_EMPLOYMENT && config.static_time_distribution {
                static_time_criterion(criterion, total)
            } else {
                criterion_payload(criterion, tally, view, &resolution)
            }
        })
        .collect();
    debug!(total, average_score, high = band_counts[0], medium = band_counts[1], low = band_counts[2], "quality computed");
    QualityPayload {
        meta: Meta {
            total_graduates: total,
            average_score,
            average_score_pct: round_to(average_score / f64::from(MAX_COMPOSITE) * 100.0, 1),
            high_quality_pct: percent(band_counts[0], total),
            medium_quality_pct: percent(band_counts[1], total),
            low_quality_pct: percent(band_counts[2], total),
            entrepreneurial_pct: tallies[5].at_least_one_pct(),
            aligned_role_pct: tallies[0].at_least_one_pct(),
            generated_at: Utc::now(),
            static_time_distribution: config.static_time_distribution,
        },
        quality_bands: QualityBand::ALL
            .iter()
            .zip(band_counts)
            .map(|(band, count)| Band {
                label: band.label(),
                score_range: band.score_range(),
                count,
                percentage: percent(count, total),
            })
            .collect(),
        criteria,
        diagnostic,
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn band_edges() {
        assert_eq!(QualityBand::classify(12), QualityBand::High);
        assert_eq!(QualityBand::classify(10), QualityBand::High);
        assert_eq!(QualityBand::classify(9), QualityBand::Medium);
        assert_eq!(QualityBand::classify(7), QualityBand::Medium);
        assert_eq!(QualityBand::classify(6), QualityBand::Low);
        assert_eq!(QualityBand::classify(0), QualityBand::Low);
    }
    #[test]
    fn static_time_counts_cover_total() {
        let payload = static_time_criterion(&CRITERIA[3], 39);
        assert_eq!(payload.distribution_total(), 39);
        assert_eq!(payload.count_for(1), 7);
        assert_eq!(payload.count_for(0), 32);
        assert_eq!(payload.average_pct, 9.0);
    }
    #[test]
    fn default_payload_shape() {
        let payload = default_payload(&EngineConfig::default());
        assert_eq!(payload.criteria.len(), 6);
        assert!(payload.criteria.iter().all(|c| c.analysis == INSUFFICIENT_DATA && c.insights.is_empty()));
        assert_eq!(payload.quality_bands.iter().map(|b| b.count).sum::<usize>(), 0);
    }
}
