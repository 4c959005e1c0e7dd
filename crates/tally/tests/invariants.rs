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
use proptest::prelude::*;
use tally::{EngineConfig, FilterSpec, SurveyEngine, TableQuery, WorkingTable};
const HEADERS: [&str; 9] = [
    "Tahun graduasi anda?",
    "Jantina anda?",
    "Adakah anda kini bekerja?",
    "Apakah cabaran utama yang anda hadapi dalam mendapatkan pekerjaan?",
    "Apakah jenis pekerjaan anda sekarang",
    "Apakah sektor pekerjaan anda?",
    "Apakah industri pekerjaan anda sekarang?",
    "Berapakah julat gaji bulanan anda sekarang?",
    "Jika bekerja, berapa lama selepas tamat pengajian anda mendapat pekerjaan pertama?",
];
const YEARS: &[&str] = &["2021", "2022", "2023", ""];
const GENDERS: &[&str] = &["Lelaki", "Perempuan", ""];
const STATUS: &[&str] = &["Ya", "Tidak", "Tidak Dinyatakan", ""];
const CHALLENGES: &[&str] = &[
    "Tiada pengalaman kerja yang mencukupi",
    "Gaji yang ditawarkan terlalu rendah; Keadaan ekonomi semasa menyukarkan peluang pekerjaan",
    "sesuatu yang lain | Terlalu banyak persaingan dalam bidang saya",
    "",
];
const JOB_TYPES: &[&str] = &[
    "Bekerja dalam bidang pengajian",
    "Bekerja luar bidang pengajian",
    "Mengusahakan perniagaan sendiri",
    "Tidak bekerja",
    "",
];
const SECTORS: &[&str] = &["Sektor Kerajaan", "Sektor Keusahawanan", "Perniagaan mikro", "NGO", ""];
const INDUSTRIES: &[&str] = &["Perakaunan & Audit", "Pendidikan & Latihan", "Ekonomi Gig & Freelancing", ""];
const SALARIES: &[&str] = &["RM5,000 ke atas", "RM3,000 - RM4,999", "RM1,500 - RM2,999", ""];
const TIMES: &[&str] = &["Kurang dari 3 bulan", "1 - 2 tahun", "Lebih dari 1 tahun", ""];
type Row = [&'static str; 9];
fn row_strategy() -> impl Strategy<Value = Row> {
    (
        prop::sample::select(YEARS),
        prop::sample::select(GENDERS),
        prop::sample::select(STATUS),
        prop::sample::select(CHALLENGES),
        prop::sample::select(JOB_TYPES),
        prop::sample::select(SECTORS),
        prop::sample::select(INDUSTRIES),
        prop::sample::select(SALARIES),
        prop::sample::select(TIMES),
    )
        .prop_map(|(y, g, s, c, j, sec, i, sal, t)| [y, g, s, c, j, sec, i, sal, t])
}
fn subset_strategy(pool: &'static [&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(pool, 0..=pool.len())
}
fn engine(rows: &[Row]) -> SurveyEngine {
    SurveyEngine::new(WorkingTable::from_rows("generated", &HEADERS, rows).unwrap())
}
fn spec(years: &[&str], genders: &[&str]) -> FilterSpec {
    let mut spec = FilterSpec::new();
    if !years.is_empty() {
        spec.insert("graduation_year", years.iter().copied());
    }
    if !genders.is_empty() {
        spec.insert("gender", genders.iter().copied());
    }
    spec
}
fn passes(row: &Row, years: &[&str], genders: &[&str]) -> bool {
    let accepts = |allowed: &[&str], cell: &str| {
        let allowed: Vec<&str> = allowed.iter().copied().filter(|v| !v.is_empty()).collect();
        allowed.is_empty() || allowed.contains(&cell)
    };
    accepts(years, row[0]) && accepts(genders, row[1])
}
fn present(cell: &str) -> bool {
    !cell.trim().is_empty() && !cell.eq_ignore_ascii_case("tidak dinyatakan")
}
fn sum(payload: &tally::ChartPayload) -> u64 {
    if payload.is_no_data() {
        0
    } else {
        payload.datasets.iter().map(|d| d.total()).sum()
    }
}
proptest! {
    #[test]
    fn totals_agree_across_operations(
        rows in prop::collection::vec(row_strategy(), 0..25),
        years in subset_strategy(YEARS),
        genders in subset_strategy(GENDERS),
    ) {
        let engine = engine(&rows);
        let filters = spec(&years, &genders);
        let kept: Vec<&Row> = rows.iter().filter(|r| passes(r, &years, &genders)).collect();
        let kpis = engine.kpis(&filters);
        prop_assert_eq!(kpis.total_records, kept.len());
        let table = engine.table(&filters, &TableQuery::new(1, usize::MAX)).unwrap();
        prop_assert_eq!(table.pagination.total, kpis.total_records);
        let status = engine.distribution("employment_status", &filters, None);
        let expected = kept.iter().filter(|r| present(r[2])).count() as u64;
        prop_assert_eq!(sum(&status), expected);
        let challenges = engine.multi_select("job_challenges", &filters, None);
        let responses = challenges
            .analysis
            .as_ref()
            .and_then(|a| a["total_survey_responses"].as_u64())
            .unwrap_or(0);
        prop_assert!(responses as usize <= kpis.total_records);
        prop_assert_eq!(responses, kept.iter().filter(|r| present(r[3])).count() as u64);
        let cross = engine.cross_tab("gender", "employment_status", &filters);
        let both = kept.iter().filter(|r| present(r[1]) && present(r[2])).count() as u64;
        prop_assert_eq!(sum(&cross), both);
    }
    #[test]
    fn quality_bands_and_criteria_cover_every_graduate(
        rows in prop::collection::vec(row_strategy(), 0..25),
        years in subset_strategy(YEARS),
    ) {
        let engine = engine(&rows).with_config(EngineConfig::default().with_static_time_distribution(false));
        let payload = engine.quality_insights(&spec(&years, &[]));
        let total = payload.meta.total_graduates;
        prop_assert_eq!(payload.quality_bands.iter().map(|b| b.count).sum::<usize>(), total);
        for criterion in &payload.criteria {
            prop_assert_eq!(criterion.distribution_total(), total);
        }
    }
    #[test]
    fn repeated_requests_are_identical(
        rows in prop::collection::vec(row_strategy(), 0..25),
        years in subset_strategy(YEARS),
    ) {
        let engine = engine(&rows);
        let filters = spec(&years, &[]);
        let first = serde_json::to_value(engine.kpis(&filters)).unwrap();
        let second = serde_json::to_value(engine.kpis(&filters)).unwrap();
        prop_assert_eq!(first, second);
        let strip = |mut value: serde_json::Value| {
            if let Some(meta) = value.get_mut("meta").and_then(|m| m.as_object_mut()) {
                meta.remove("generated_at");
            }
            value
        };
        let a = strip(serde_json::to_value(engine.quality_insights(&filters)).unwrap());
        let b = strip(serde_json::to_value(engine.quality_insights(&filters)).unwrap());
        prop_assert_eq!(a, b);
        let c = serde_json::to_string(&engine.multi_select("job_challenges", &filters, None)).unwrap();
        let d = serde_json::to_string(&engine.multi_select("job_challenges", &filters, None)).unwrap();
        prop_assert_eq!(c, d);
    }
    #[test]
    fn adding_filters_never_grows_the_subset(
        rows in prop::collection::vec(row_strategy(), 0..25),
        years in subset_strategy(YEARS),
        genders in subset_strategy(GENDERS),
    ) {
        let engine = engine(&rows);
        let narrow = engine.kpis(&spec(&years, &genders)).total_records;
        let wide = engine.kpis(&spec(&years, &[])).total_records;
        prop_assert!(narrow <= wide);
    }
}
