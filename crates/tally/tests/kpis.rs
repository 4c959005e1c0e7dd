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
use tally::{FilterSpec, SurveyEngine, WorkingTable};
const HEADERS: [&str; 7] = [
    "Adakah anda kini bekerja?",
    "Apakah jenis pekerjaan anda sekarang",
    "Jika bekerja, berapa lama selepas tamat pengajian anda mendapat pekerjaan pertama?",
    "Pendapatan isi rumah bulanan keluarga anda?",
    "Berapakah julat gaji bulanan anda sekarang?",
    "Adakah anda menjalani internship/praktikal sebelum tamat pengajian?",
    "Apakah bentuk pekerjaan bebas yang anda ceburi sekarang atau bercadang untuk ceburi dalam masa terdekat?",
];
const ROWS: [[&str; 7]; 5] = [
    [
        "Ya",
        "Bekerja dalam bidang pengajian",
        "Kurang dari 3 bulan",
        "RM4,850 - RM7,099",
        "RM5,000 ke atas",
        "Ya, dengan elaun",
        "e-hailing",
    ],
    [
        "Tidak",
        "Bekerja luar bidang pengajian",
        "< 3 bulan",
        "RM4,850 - RM7,099",
        "RM4000-RM4999",
        "Ya",
        "Saya tidak bercadang untuk terlibat dalam mana-mana pekerjaan bebas",
    ],
    [
        "Sedang mencari kerja",
        "Bekerja dalam bidang pengajian",
        "Kurang daripada 1 bulan",
        "RM2,500 - RM4,849",
        "RM1,500 - RM2,999",
        "Tidak",
        "",
    ],
    [
        "Ya",
        "Mengusahakan perniagaan sendiri",
        "1 - 2 tahun",
        "RM4,850 - RM7,099",
        "",
        "Tidak pernah",
        "e-hailing",
    ],
    ["Tidak Dinyatakan", "", "", "RM2,500 - RM4,849", "", "Ya", ""],
];
fn engine() -> SurveyEngine {
    SurveyEngine::new(WorkingTable::from_rows("kpis", &HEADERS, &ROWS).unwrap())
}
#[test]
fn every_kpi_has_a_known_answer() {
    let kpis = engine().kpis(&FilterSpec::new());
    assert_eq!(kpis.total_records, 5);
    assert_eq!(kpis.employment_rate, 50.0);
    assert_eq!(kpis.unemployment_rate, 50.0);
    assert_eq!(kpis.field_alignment_rate, 50.0);
    assert_eq!(kpis.quick_employment_rate, 75.0);
    assert_eq!(kpis.avg_income_range.as_deref(), Some("RM4,850 - RM7,099"));
    assert_eq!(kpis.high_salary_rate, 66.7);
    assert_eq!(kpis.internship_participation_rate, 60.0);
    assert_eq!(kpis.gig_participation_rate, 66.7);
    assert!(kpis.diagnostic.is_none());
}
#[test]
fn kpis_follow_the_filtered_subset() {
    let kpis = engine().kpis(&FilterSpec::new().with("employment_status", ["Ya"]));
    assert_eq!(kpis.total_records, 2);
    assert_eq!(kpis.employment_rate, 100.0);
    assert_eq!(kpis.unemployment_rate, 0.0);
    assert_eq!(kpis.quick_employment_rate, 50.0);
    assert_eq!(kpis.internship_participation_rate, 50.0);
    assert_eq!(kpis.gig_participation_rate, 100.0);
}
#[test]
fn empty_subset_reports_zero_rates() {
    let kpis = engine().kpis(&FilterSpec::new().with("employment_status", ["Bekerja separuh masa"]));
    assert_eq!(kpis.total_records, 0);
    for rate in [
        kpis.employment_rate,
        kpis.unemployment_rate,
        kpis.field_alignment_rate,
        kpis.quick_employment_rate,
        kpis.high_salary_rate,
        kpis.internship_participation_rate,
        kpis.gig_participation_rate,
    ] {
        assert_eq!(rate, 0.0);
    }
    assert_eq!(kpis.avg_income_range, None);
}
