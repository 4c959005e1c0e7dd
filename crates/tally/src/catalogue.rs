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
//! Dashboard sections and the charts each one draws.
//!
//! Sections only declare which logical keys and canonical sets a chart uses;
//! [`crate::SurveyEngine::chart`] runs the matching aggregation.
use crate::categories::{default_order, orders, set_for, CategorySet};
use crate::quality::QUALITY_FIELDS;
use serde::Serialize;
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartKind {
    Distribution {
        key: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        order: Option<&'static [&'static str]>,
    },
    MultiSelect {
        key: &'static str,
        /// Key of a [`CategorySet`]; `None` counts raw fragments.
        #[serde(skip_serializing_if = "Option::is_none")]
        set: Option<&'static str>,
    },
    CrossTab {
        row: &'static str,
        column: &'static str,
    },
    DualSeries {
        first: &'static str,
        second: &'static str,
    },
}
impl ChartKind {
    pub fn keys(&self) -> Vec<&'static str> {
        match *self {
            Self::Distribution { key, .. } | Self::MultiSelect { key, .. } => vec![key],
            Self::CrossTab { row, column } => vec![row, column],
            Self::DualSeries { first, second } => vec![first, second],
        }
    }
    pub fn category_set(&self) -> Option<&'static CategorySet> {
        match *self {
            Self::MultiSelect { set: Some(set), .. } => set_for(set),
            _ => None,
        }
    }
    pub fn order(&self) -> Option<&'static [&'static str]> {
        match *self {
            Self::Distribution { order: Some(order), .. } => Some(order),
            Self::Distribution { key, .. } => default_order(key),
            _ => None,
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(flatten)]
    pub kind: ChartKind,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [&'static str],
    pub charts: &'static [ChartSpec],
}
const fn distribution(id: &'static str, title: &'static str, key: &'static str) -> ChartSpec {
    ChartSpec {
        id,
        title,
        kind: ChartKind::Distribution { key, order: None },
    }
}
const fn ordered(id: &'static str, title: &'static str, key: &'static str, order: &'static [&'static str]) -> ChartSpec {
    ChartSpec {
        id,
        title,
        kind: ChartKind::Distribution { key, order: Some(order) },
    }
}
const fn multi(id: &'static str, title: &'static str, key: &'static str, set: Option<&'static str>) -> ChartSpec {
    ChartSpec {
        id,
        title,
        kind: ChartKind::MultiSelect { key, set },
    }
}
const fn cross(id: &'static str, title: &'static str, row: &'static str, column: &'static str) -> ChartSpec {
    ChartSpec {
        id,
        title,
        kind: ChartKind::CrossTab { row, column },
    }
}
pub static SECTIONS: &[Section] = &[
    Section {
        id: "demografi",
        name: "Demografi & Latar Belakang Akademik",
        description: "Maklumat demografi dan latar belakang akademik responden",
        fields: &["graduation_year", "age", "gender", "institution", "field_of_study"],
        charts: &[
            distribution("gender-distribution", "Taburan Jantina", "gender"),
            distribution("institution-distribution", "Institusi Pendidikan", "institution"),
            distribution("field-of-study", "Bidang Pengajian", "field_of_study"),
            cross("age-by-graduation-year", "Umur Mengikut Tahun Graduasi", "graduation_year", "age"),
        ],
    },
    Section {
        id: "sosioekonomi",
        name: "Sosioekonomi Graduan",
        description: "Status sosioekonomi dan pembiayaan pendidikan",
        fields: &[
            "household_income",
            "father_occupation",
            "mother_occupation",
            "education_financing",
            "financing_advantage",
            "debt_career_impact",
        ],
        charts: &[
            distribution("income-distribution", "Pendapatan Isi Rumah", "household_income"),
            distribution("father-occupation", "Pekerjaan Bapa", "father_occupation"),
            distribution("mother-occupation", "Pekerjaan Ibu", "mother_occupation"),
            multi("financing-methods", "Kaedah Pembiayaan Pendidikan", "education_financing", Some("education_financing_groups")),
            distribution("financing-advantage", "Kelebihan Pembiayaan", "financing_advantage"),
            distribution("debt-career-impact", "Kesan Hutang Terhadap Kerjaya", "debt_career_impact"),
        ],
    },
    Section {
        id: "status_pekerjaan",
        name: "Status Pekerjaan & Kesesuaian dengan Bidang Pengajian",
        description: "Status pekerjaan semasa dan kesesuaian dengan bidang pengajian",
        fields: &[
            "employment_status",
            "work_status",
            "time_to_employment",
            "job_type",
            "success_factors",
            "out_of_field_reason",
        ],
        charts: &[
            ordered("employment-status", "Status Bekerja", "employment_status", orders::YES_NO),
            distribution("work-status", "Status Pekerjaan", "work_status"),
            distribution("time-to-employment", "Tempoh Mendapat Pekerjaan", "time_to_employment"),
            distribution("job-type", "Jenis Pekerjaan", "job_type"),
            multi("success-factors", "Faktor Mendapat Pekerjaan", "success_factors", Some("success_factors")),
            multi("success-factor-groups", "Saluran Mendapat Pekerjaan", "success_factors", Some("success_factor_groups")),
        ],
    },
    Section {
        id: "industri_gaji",
        name: "Sektor, Industri & Gaji Graduan",
        description: "Maklumat sektor pekerjaan, industri dan gaji",
        fields: &["current_salary", "expected_salary", "employment_sectors", "industry"],
        charts: &[
            distribution("current-salary", "Julat Gaji Semasa", "current_salary"),
            ChartSpec {
                id: "salary-comparison",
                title: "Gaji Semasa Berbanding Jangkaan",
                kind: ChartKind::DualSeries {
                    first: "current_salary",
                    second: "expected_salary",
                },
            },
            distribution("employment-sectors", "Sektor Pekerjaan", "employment_sectors"),
            distribution("industry", "Industri", "industry"),
        ],
    },
    Section {
        id: "kebolehpasaran",
        name: "Faktor Mempengaruhi Kebolehpasaran Graduan",
        description: "Faktor-faktor yang mempengaruhi kebolehpasaran graduan",
        fields: &["professional_cert", "academic_skills_needed", "university_preparation"],
        charts: &[
            distribution("professional-certificates", "Sijil Profesional", "professional_cert"),
            multi("additional-skills", "Kemahiran Tambahan Diminta Majikan", "academic_skills_needed", None),
            distribution("university-preparedness", "Persediaan Universiti", "university_preparation"),
        ],
    },
    Section {
        id: "graduan_bidang",
        name: "Graduan Mengikut Bidang dan Tahun Graduasi",
        description: "Taburan graduan mengikut bidang dan tahun graduasi",
        fields: &["graduation_year", "field_of_study", "institution"],
        charts: &[cross("field-by-year", "Bidang Mengikut Tahun Graduasi", "graduation_year", "field_of_study")],
    },
    Section {
        id: "luar_bidang",
        name: "Graduan Bekerja di Luar Bidang",
        description: "Analisis graduan yang bekerja di luar bidang pengajian",
        fields: &["job_type", "out_of_field_reason", "field_of_study"],
        charts: &[
            multi("out-of-field-reasons", "Sebab Bekerja Luar Bidang", "out_of_field_reason", None),
            cross("institution-reasons", "Sebab Mengikut Institusi", "institution", "out_of_field_reason"),
        ],
    },
    Section {
        id: "internship",
        name: "Internship dan Cabaran Mendapat Kerja",
        description: "Maklumat mengenai internship dan cabaran mencari kerja",
        fields: &["internship", "job_challenges"],
        charts: &[
            distribution("internship-participation", "Penyertaan Internship", "internship"),
            multi("job-challenges", "Cabaran Mendapat Pekerjaan", "job_challenges", Some("job_challenges")),
            multi("job-challenge-groups", "Kategori Cabaran", "job_challenges", Some("job_challenge_groups")),
        ],
    },
    Section {
        id: "ekonomi_gig",
        name: "Trend Ekonomi Gig/Keusahawanan",
        description: "Trend keusahawanan dan ekonomi gig di kalangan graduan",
        fields: &["gig_economy", "support_needed"],
        charts: &[
            multi("gig-types", "Bentuk Pekerjaan Bebas", "gig_economy", Some("gig_economy")),
            multi("support-needed", "Sokongan Diperlukan", "support_needed", Some("support_needed")),
        ],
    },
    Section {
        id: "kualiti_graduan",
        name: "Kualiti Graduan",
        description: "Penilaian enam kriteria kualiti graduan",
        fields: QUALITY_FIELDS,
        charts: &[],
    },
];
pub fn section(id: &str) -> Option<&'static Section> {
    SECTIONS.iter().find(|s| s.id == id)
}
pub fn chart(id: &str) -> Option<&'static ChartSpec> {
    SECTIONS.iter().flat_map(|s| s.charts.iter()).find(|c| c.id == id)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::field;
    use std::collections::HashSet;
    #[test]
    fn chart_ids_are_unique() {
        let mut seen = HashSet::new();
        for spec in SECTIONS.iter().flat_map(|s| s.charts.iter()) {
            assert!(seen.insert(spec.id), "duplicate chart id {}", spec.id);
        }
    }
    #[test]
    fn every_key_and_set_is_registered() {
        for section in SECTIONS {
            for key in section.fields {
                assert!(field(key).is_some(), "{key} not registered");
            }
            for spec in section.charts {
                for key in spec.kind.keys() {
                    assert!(field(key).is_some(), "{key} not registered");
                }
                if let ChartKind::MultiSelect { set: Some(set), .. } = spec.kind {
                    assert!(set_for(set).is_some(), "{set} not a category set");
                }
            }
        }
    }
    #[test]
    fn distribution_falls_back_to_default_order() {
        let spec = chart("current-salary").unwrap();
        assert_eq!(spec.kind.order(), Some(orders::SALARY_BRACKETS));
        assert!(chart("nope").is_none());
    }
}
