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
//! Logical field registry and the column resolver.
//!
//! Aggregation code never names a physical survey column. It asks for a logical key
//! (`graduation_year`, `job_type`, ...) and the resolver maps it onto whatever the
//! loaded export calls that question.
use crate::data::WorkingTable;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;
#[derive(Debug, Clone, Copy)]
pub struct LogicalField {
    pub key: &'static str,
    pub title: &'static str,
    /// Physical names in preference order, tried verbatim first.
    pub candidates: &'static [&'static str],
    /// Lower-case fragments for the fuzzy pass.
    pub keywords: &'static [&'static str],
}
pub static FIELDS: &[LogicalField] = &[
    LogicalField {
        key: "employment_status",
        title: "Status Bekerja",
        candidates: &["Adakah anda kini bekerja?", "Adakah anda kini bekerja? "],
        keywords: &["kini bekerja"],
    },
    LogicalField {
        key: "work_status",
        title: "Status Pekerjaan",
        candidates: &["Apakah status pekerjaan anda sekarang?", "Apakah status pekerjaan anda sekarang? "],
        keywords: &["status pekerjaan"],
    },
    LogicalField {
        key: "job_type",
        title: "Jenis Pekerjaan",
        candidates: &["Apakah jenis pekerjaan anda sekarang", "Apakah jenis pekerjaan anda sekarang?"],
        keywords: &["jenis pekerjaan"],
    },
    LogicalField {
        key: "time_to_employment",
        title: "Tempoh Mendapat Pekerjaan",
        candidates: &["Jika bekerja, berapa lama selepas tamat pengajian anda mendapat pekerjaan pertama?"],
        keywords: &["mendapat pekerjaan pertama"],
    },
    LogicalField {
        key: "field_of_study",
        title: "Bidang Pengajian",
        candidates: &["Bidang pengajian utama anda?", "Bidang pengajian utama anda? "],
        keywords: &["bidang pengajian utama"],
    },
    LogicalField {
        key: "graduation_year",
        title: "Tahun Graduasi",
        candidates: &["Tahun graduasi anda?", "Tahun graduasi anda? ", "Tahun graduasi anda"],
        keywords: &["tahun graduasi"],
    },
    LogicalField {
        key: "current_salary",
        title: "Gaji Semasa",
        candidates: &["Berapakah julat gaji bulanan anda sekarang?"],
        keywords: &["julat gaji bulanan"],
    },
    LogicalField {
        key: "expected_salary",
        title: "Jangkaan Gaji",
        candidates: &["Apakah jangkaan gaji permulaan yang anda anggap sesuai dengan kelulusan anda?"],
        keywords: &["jangkaan gaji"],
    },
    LogicalField {
        key: "out_of_field_reason",
        title: "Sebab Bekerja Luar Bidang",
        candidates: &["Apakah sebab utama jika anda tidak bekerja dalam bidang pengajian?"],
        keywords: &["tidak bekerja dalam bidang"],
    },
    LogicalField {
        key: "academic_skills_needed",
        title: "Keperluan Kemahiran Akademik",
        candidates: &["Jika anda bekerja di luar bidang pengajian, adakah pekerjaan tersebut masih memerlukan kemahiran akademik anda?"],
        keywords: &["kemahiran akademik"],
    },
    LogicalField {
        key: "job_challenges",
        title: "Cabaran Mendapatkan Pekerjaan",
        candidates: &["Apakah cabaran utama yang anda hadapi dalam mendapatkan pekerjaan?"],
        keywords: &["cabaran utama"],
    },
    LogicalField {
        key: "success_factors",
        title: "Faktor Mendapat Pekerjaan",
        candidates: &["Apakah faktor utama yang membantu anda mendapat pekerjaan tersebut?"],
        keywords: &["faktor utama yang membantu"],
    },
    LogicalField {
        key: "employment_sectors",
        title: "Sektor Pekerjaan",
        candidates: &["Apakah sektor pekerjaan anda?", "Apakah sektor pekerjaan anda? "],
        keywords: &["sektor pekerjaan"],
    },
    LogicalField {
        key: "industry",
        title: "Industri Pekerjaan",
        candidates: &["Apakah industri pekerjaan anda sekarang?"],
        keywords: &["industri pekerjaan"],
    },
    LogicalField {
        key: "professional_cert",
        title: "Sijil Profesional",
        candidates: &["Adakah anda memiliki sijil profesional tambahan selain ijazah/diploma?"],
        keywords: &["sijil profesional"],
    },
    LogicalField {
        key: "internship",
        title: "Latihan Industri",
        candidates: &["Adakah anda menjalani internship/praktikal sebelum tamat pengajian?"],
        keywords: &["internship", "praktikal sebelum"],
    },
    LogicalField {
        key: "university_preparation",
        title: "Persediaan Universiti",
        candidates: &["Sejauh mana anda bersetuju bahawa universiti telah menyediakan anda untuk pasaran kerja?"],
        keywords: &["universiti telah menyediakan"],
    },
    LogicalField {
        key: "gig_economy",
        title: "Ekonomi Gig",
        candidates: &["Apakah bentuk pekerjaan bebas yang anda ceburi sekarang atau bercadang untuk ceburi dalam masa terdekat?"],
        keywords: &["pekerjaan bebas"],
    },
    LogicalField {
        key: "support_needed",
        title: "Sokongan Diperlukan",
        candidates: &["Apakah bantuan atau sokongan yang anda rasa perlu untuk berjaya dalam keusahawanan dan ekonomi gig?"],
        keywords: &["bantuan atau sokongan"],
    },
    LogicalField {
        key: "gender",
        title: "Jantina",
        candidates: &["Jantina anda?", "Jantina anda? ", "Jantina anda"],
        keywords: &["jantina"],
    },
    LogicalField {
        key: "age",
        title: "Umur",
        candidates: &["Umur anda?", "Umur anda? ", "Umur anda"],
        keywords: &["umur"],
    },
    LogicalField {
        key: "institution",
        title: "Institusi",
        candidates: &["Institusi pendidikan MARA yang anda hadiri?", "Institusi pendidikan MARA yang anda hadiri? "],
        keywords: &["institusi pendidikan"],
    },
    LogicalField {
        key: "household_income",
        title: "Pendapatan Isi Rumah",
        candidates: &["Pendapatan isi rumah bulanan keluarga anda?"],
        keywords: &["pendapatan isi rumah"],
    },
    LogicalField {
        key: "father_occupation",
        title: "Pekerjaan Bapa",
        candidates: &["Pekerjaan bapa anda", "Pekerjaan bapa anda?"],
        keywords: &["pekerjaan bapa"],
    },
    LogicalField {
        key: "mother_occupation",
        title: "Pekerjaan Ibu",
        candidates: &["Pekerjaan ibu anda?", "Pekerjaan ibu anda"],
        keywords: &["pekerjaan ibu"],
    },
    LogicalField {
        key: "education_financing",
        title: "Pembiayaan Pendidikan",
        candidates: &["Bagaimana anda membiayai pendidikan anda?"],
        keywords: &["membiayai pendidikan"],
    },
    LogicalField {
        key: "financing_advantage",
        title: "Kelebihan Pembiayaan",
        candidates: &["Adakah jenis pembiayaan ini memberi kelebihan dalam mencari kerja?"],
        keywords: &["kelebihan dalam mencari kerja"],
    },
    LogicalField {
        key: "debt_career_impact",
        title: "Kesan Hutang Terhadap Kerjaya",
        candidates: &["Jika anda mempunyai pinjaman pendidikan, adakah beban hutang mempengaruhi pilihan kerjaya anda?"],
        keywords: &["beban hutang"],
    },
];
pub fn field(key: &str) -> Option<&'static LogicalField> {
    FIELDS.iter().find(|f| f.key == key)
}
/// Human title for a key: the registry title, else the key itself.
pub fn title_for(key: &str) -> &str {
    field(key).map_or(key, |f| f.title)
}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub resolved: IndexMap<String, String>,
    pub unresolved: Vec<String>,
}
impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}
#[derive(Debug, Clone, Copy)]
pub struct ColumnResolver<'a> {
    columns: &'a [String],
    trim_variants: bool,
}
impl<'a> ColumnResolver<'a> {
    pub fn new(table: &'a WorkingTable) -> Self {
        Self {
            columns: table.column_names(),
            trim_variants: true,
        }
    }
    /// When false, `"Jantina anda? "` and `"Jantina anda?"` are different questions.
    pub fn with_trimmed_variants(mut self, identical: bool) -> Self {
        self.trim_variants = identical;
        self
    }
    /// Registered keys go exact candidates first, then keyword scan. Unregistered
    /// keys are accepted as physical column names.
    pub fn resolve(&self, key: &str) -> Option<&'a str> {
        let found = match field(key) {
            Some(logical) => self
                .exact(logical.candidates)
                .or_else(|| self.fuzzy(logical)),
            None => self.exact(&[key]),
        };
        match found {
            Some(column) => debug!(key, column, "column resolved"),
            None => debug!(key, "column unresolved"),
        }
        found
    }
    pub fn resolve_all<S: AsRef<str>>(&self, keys: &[S]) -> Resolution {
        let mut resolution = Resolution::default();
        for key in keys {
            let key = key.as_ref();
            match self.resolve(key) {
                Some(column) => {
                    resolution.resolved.insert(key.to_string(), column.to_string());
                }
                None => resolution.unresolved.push(key.to_string()),
            }
        }
        resolution
    }
    fn exact(&self, candidates: &[&str]) -> Option<&'a str> {
        for candidate in candidates {
            if let Some(column) = self.columns.iter().find(|c| c.as_str() == *candidate) {
                return Some(column.as_str());
            }
        }
        if !self.trim_variants {
            return None;
        }
        candidates.iter().find_map(|candidate| {
            self.columns
                .iter()
                .find(|c| c.trim() == candidate.trim())
                .map(String::as_str)
        })
    }
    /// A column whose name is only a whitespace variant of a candidate is a
    /// different question when trimmed variants are not identical.
    fn is_whitespace_variant(column: &str, candidates: &[&str]) -> bool {
        candidates
            .iter()
            .any(|candidate| column != *candidate && column.trim() == candidate.trim())
    }
    /// Column name contains a keyword, or a keyword contains the whole column name.
    fn fuzzy(&self, logical: &LogicalField) -> Option<&'a str> {
        self.columns
            .iter()
            .filter(|column| self.trim_variants || !Self::is_whitespace_variant(column, logical.candidates))
            .find(|column| {
                let lowered = column.trim().to_lowercase();
                !lowered.is_empty()
                    && logical
                        .keywords
                        .iter()
                        .any(|k| lowered.contains(k) || k.contains(lowered.as_str()))
            })
            .map(String::as_str)
    }
}
