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
use crate::categories::{GIG_ECONOMY, GIG_NOT_INTERESTED};
use crate::chart::percent;
use crate::data::TableView;
use crate::normalize::{selections, value_at};
use crate::resolver::{ColumnResolver, Resolution};
use indexmap::IndexMap;
use serde::Serialize;
/// `high_salary_rate` counts brackets starting at RM4,000: the top two salary
/// brackets. The quality rubric's salary criterion uses RM5,000 instead.
pub const KPI_HIGH_SALARY_FLOOR: u32 = 4000;
const EMPLOYED: &[&str] = &["ya", "bekerja"];
const UNEMPLOYED: &[&str] = &["tidak", "mencari"];
pub const KPI_FIELDS: &[&str] = &[
    "employment_status",
    "job_type",
    "time_to_employment",
    "household_income",
    "current_salary",
    "internship",
    "gig_economy",
];
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_records: usize,
    pub employment_rate: f64,
    pub unemployment_rate: f64,
    pub field_alignment_rate: f64,
    pub quick_employment_rate: f64,
    pub avg_income_range: Option<String>,
    pub high_salary_rate: f64,
    pub internship_participation_rate: f64,
    pub gig_participation_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Resolution>,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentClass {
    Employed,
    Unemployed,
    Unknown,
}
/// Unemployed keywords win, so "Tidak bekerja" is never counted as employed.
pub fn classify_employment(value: &str) -> EmploymentClass {
    let lowered = value.to_lowercase();
    if UNEMPLOYED.iter().any(|k| lowered.contains(k)) {
        EmploymentClass::Unemployed
    } else if EMPLOYED.iter().any(|k| lowered.contains(k)) {
        EmploymentClass::Employed
    } else {
        EmploymentClass::Unknown
    }
}
/// Lower bound of a salary bracket in RM; "kurang daripada ..." brackets are 0.
pub fn salary_floor(value: &str) -> Option<u32> {
    let lowered = value.to_lowercase();
    if lowered.contains("kurang") || lowered.trim_start().starts_with('<') {
        return Some(0);
    }
    let start = lowered.find("rm").map_or(0, |i| i + 2);
    let digits: String = lowered[start..]
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
/// Share (percent, one decimal) of non-absent cells satisfying `predicate`.
pub fn rate<F>(view: &TableView<'_>, column: Option<&str>, predicate: F) -> f64
where
    F: Fn(&str) -> bool,
{
    let Some(column) = column else {
        return 0.0;
    };
    let (hits, present) = view
        .rows()
        .iter()
        .filter_map(|&row| value_at(view, column, row))
        .fold((0usize, 0usize), |(hits, present), value| {
            (hits + usize::from(predicate(&value)), present + 1)
        });
    percent(hits, present)
}
/// Most frequent non-absent value; ties go to the value seen first.
pub fn mode(view: &TableView<'_>, column: Option<&str>) -> Option<String> {
    let column = column?;
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for &row in view.rows() {
        if let Some(value) = value_at(view, column, row) {
            *counts.entry(value.into_owned()).or_insert(0) += 1;
        }
    }
    let best = counts.values().copied().max()?;
    counts.into_iter().find(|(_, c)| *c == best).map(|(v, _)| v)
}
pub fn is_gig_participant(value: &str) -> bool {
    selections(value, Some(&GIG_ECONOMY))
        .iter()
        .any(|label| label != GIG_NOT_INTERESTED)
}
pub fn compute(view: &TableView<'_>, resolver: &ColumnResolver<'_>, high_salary_floor: u32) -> Kpis {
    let resolution = resolver.resolve_all(KPI_FIELDS);
    let col = |key: &str| resolution.resolved.get(key).map(String::as_str);
    let employment = col("employment_status");
    Kpis {
        total_records: view.row_count(),
        employment_rate: rate(view, employment, |v| classify_employment(v) == EmploymentClass::Employed),
        unemployment_rate: rate(view, employment, |v| classify_employment(v) == EmploymentClass::Unemployed),
        field_alignment_rate: rate(view, col("job_type"), |v| v.to_lowercase().contains("dalam bidang")),
        quick_employment_rate: rate(view, col("time_to_employment"), |v| {
            let lowered = v.to_lowercase();
            lowered.contains("< 3 bulan") || lowered.contains("kurang")
        }),
        avg_income_range: mode(view, col("household_income")),
        high_salary_rate: rate(view, col("current_salary"), |v| {
            salary_floor(v).is_some_and(|floor| floor >= high_salary_floor)
        }),
        internship_participation_rate: rate(view, col("internship"), |v| v.to_lowercase().starts_with("ya")),
        gig_participation_rate: rate(view, col("gig_economy"), is_gig_participant),
        diagnostic: (!resolution.is_complete()).then(|| resolution.clone()),
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn employment_classes_are_exclusive() {
        assert_eq!(classify_employment("Ya"), EmploymentClass::Employed);
        assert_eq!(classify_employment("Ya, bekerja sepenuh masa"), EmploymentClass::Employed);
        assert_eq!(classify_employment("Tidak bekerja"), EmploymentClass::Unemployed);
        assert_eq!(classify_employment("Sedang mencari kerja"), EmploymentClass::Unemployed);
        assert_eq!(classify_employment("Melanjutkan pengajian"), EmploymentClass::Unknown);
    }
    #[test]
    fn salary_floors() {
        assert_eq!(salary_floor("RM4000-RM4999"), Some(4000));
        assert_eq!(salary_floor("RM5,000 ke atas"), Some(5000));
        assert_eq!(salary_floor("Lebih daripada RM5000"), Some(5000));
        assert_eq!(salary_floor("Kurang daripada RM1,500"), Some(0));
        assert_eq!(salary_floor("RM3,000 - RM4,999"), Some(3000));
        assert_eq!(salary_floor("Tiada pendapatan"), None);
    }
    #[test]
    fn gig_not_interested_is_not_participation() {
        assert!(!is_gig_participant("Saya tidak bercadang untuk terlibat dalam mana-mana pekerjaan bebas"));
        assert!(is_gig_participant("Ekonomi Gig: Pembuatan kandungan (YouTube, TikTok, streaming)"));
    }
}
