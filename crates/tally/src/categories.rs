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
//! Canonical answer sets for the survey's multi-select and bracketed questions.
//!
//! Each set is plain data: adding a label means adding a row here, the kernel
//! does not change.
use serde::Serialize;
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedPolicy {
    /// Keep the fragment, title-cased.
    TitleCase,
    /// Count it under [`OTHERS_LABEL`].
    Others,
    /// Drop it.
    Ignore,
}
pub const OTHERS_LABEL: &str = "Others";
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Category {
    pub label: &'static str,
    /// Extra raw phrasings that map onto `label`.
    pub aliases: &'static [&'static str],
}
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategorySet {
    pub key: &'static str,
    pub categories: &'static [Category],
    pub ignored: &'static [&'static str],
    pub unmapped: UnmappedPolicy,
}
impl CategorySet {
    pub fn labels(&self) -> Vec<&'static str> {
        self.categories.iter().map(|c| c.label).collect()
    }
    pub fn is_ignored(&self, fragment: &str) -> bool {
        self.ignored.iter().any(|m| m.eq_ignore_ascii_case(fragment.trim()))
    }
}
const fn cat(label: &'static str) -> Category {
    Category { label, aliases: &[] }
}
const fn alias(label: &'static str, aliases: &'static [&'static str]) -> Category {
    Category { label, aliases }
}
const NOT_APPLICABLE: &[&str] = &["tidak berkenaan", "tiada berkenaan", "not applicable", "n/a", "tiada"];
pub static JOB_CHALLENGES: CategorySet = CategorySet {
    key: "job_challenges",
    categories: &[
        cat("Tiada pengalaman kerja yang mencukupi"),
        cat("Terlalu banyak persaingan dalam bidang saya"),
        cat("Kekurangan kemahiran yang dicari majikan"),
        cat("Gaji yang ditawarkan terlalu rendah"),
        cat("Saya tidak tahu bagaimana mencari pekerjaan yang sesuai"),
        cat("Tiada rangkaian atau hubungan yang boleh membantu saya mendapatkan pekerjaan"),
        cat("Kriteria pekerjaan tidak sesuai dengan kelayakan akademik saya"),
        cat("Kebanyakan syarikat lebih memilih pekerja yang sudah berpengalaman"),
        cat("Tiada peluang pekerjaan dalam bidang saya di kawasan tempat tinggal saya"),
        cat("Saya perlu menjaga keluarga dan sukar untuk bekerja di luar kawasan"),
        cat("Proses permohonan kerja terlalu kompleks atau mengambil masa yang lama"),
        cat("Keadaan ekonomi semasa menyukarkan peluang pekerjaan"),
    ],
    ignored: NOT_APPLICABLE,
    unmapped: UnmappedPolicy::Others,
};
pub static JOB_CHALLENGE_GROUPS: CategorySet = CategorySet {
    key: "job_challenge_groups",
    categories: &[
        alias(
            "Tiada Pengalaman",
            &[
                "Tiada pengalaman kerja yang mencukupi",
                "Kebanyakan syarikat lebih memilih pekerja yang sudah berpengalaman",
            ],
        ),
        alias(
            "Pasaran Pekerjaan",
            &[
                "Terlalu banyak persaingan dalam bidang saya",
                "Gaji yang ditawarkan terlalu rendah",
                "Keadaan ekonomi semasa menyukarkan peluang pekerjaan",
            ],
        ),
        alias(
            "Ketidakpadanan Kemahiran",
            &[
                "Kekurangan kemahiran yang dicari majikan",
                "Kriteria pekerjaan tidak sesuai dengan kelayakan akademik saya",
            ],
        ),
        alias("Tiada Pengetahuan", &["Saya tidak tahu bagaimana mencari pekerjaan yang sesuai"]),
        alias(
            "Tiada Rangkaian",
            &["Tiada rangkaian atau hubungan yang boleh membantu saya mendapatkan pekerjaan"],
        ),
        alias(
            "Kekangan Struktur",
            &[
                "Tiada peluang pekerjaan dalam bidang saya di kawasan tempat tinggal saya",
                "Proses permohonan kerja terlalu kompleks atau mengambil masa yang lama",
            ],
        ),
        alias(
            "Kekangan Personal",
            &["Saya perlu menjaga keluarga dan sukar untuk bekerja di luar kawasan"],
        ),
    ],
    ignored: NOT_APPLICABLE,
    unmapped: UnmappedPolicy::Others,
};
pub static SUCCESS_FACTORS: CategorySet = CategorySet {
    key: "success_factors",
    categories: &[
        cat("Melalui latihan industri / praktikal"),
        cat("Permohonan terus kepada syarikat (JobStreet, LinkedIn, laman web syarikat)"),
        cat("Program kerajaan (contoh: MySTEP, Protege, SL1M)"),
        cat("Rangkaian peribadi / kenalan (pensyarah, alumni, keluarga, rakan)"),
        cat("Melalui pameran kerjaya atau job fair"),
        cat("Tawaran daripada syarikat sebelum tamat pengajian"),
        cat("Dihubungi oleh perekrut atau headhunter"),
        cat("Memulakan perniagaan sendiri / bekerja dalam ekonomi gig"),
    ],
    ignored: NOT_APPLICABLE,
    unmapped: UnmappedPolicy::Others,
};
pub static SUCCESS_FACTOR_GROUPS: CategorySet = CategorySet {
    key: "success_factor_groups",
    categories: &[
        alias(
            "Saluran Rasmi",
            &[
                "Permohonan terus kepada syarikat (JobStreet, LinkedIn, laman web syarikat)",
                "Program kerajaan (contoh: MySTEP, Protege, SL1M)",
                "Melalui pameran kerjaya atau job fair",
            ],
        ),
        alias(
            "Saluran Informal / Sosial",
            &[
                "Rangkaian peribadi / kenalan (pensyarah, alumni, keluarga, rakan)",
                "Dihubungi oleh perekrut atau headhunter",
            ],
        ),
        alias(
            "Laluan Berasaskan Institusi Pendidikan",
            &[
                "Melalui latihan industri / praktikal",
                "Tawaran daripada syarikat sebelum tamat pengajian",
            ],
        ),
        alias(
            "Laluan Kendiri / Keusahawanan",
            &["Memulakan perniagaan sendiri / bekerja dalam ekonomi gig"],
        ),
    ],
    ignored: NOT_APPLICABLE,
    unmapped: UnmappedPolicy::Others,
};
pub static SUPPORT_NEEDED: CategorySet = CategorySet {
    key: "support_needed",
    categories: &[
        cat("Latihan teknikal dalam bidang spesifik (design, coding, pemasaran digital)"),
        cat("Bimbingan dalam pengurusan kewangan dan cukai untuk pekerja gig"),
        cat("Platform khas untuk graduan MARA dalam ekonomi gig"),
        cat("Pinjaman atau geran untuk membangunkan perniagaan gig"),
        cat("Perlindungan sosial (KWSP, PERKESO, insurans)"),
    ],
    ignored: NOT_APPLICABLE,
    unmapped: UnmappedPolicy::TitleCase,
};
pub const GIG_NOT_INTERESTED: &str = "Tidak Berminat";
pub static GIG_ECONOMY: CategorySet = CategorySet {
    key: "gig_economy",
    categories: &[
        alias(
            "Penghantaran",
            &["Ekonomi Gig: Penghantaran & e-hailing (Grab, FoodPanda, Lalamove)", "e-hailing"],
        ),
        alias(
            "Usahawan",
            &["Keusahawanan: Mengusahakan perniagaan sendiri (produk, perkhidmatan, syarikat)"],
        ),
        alias(
            "Pendidikan",
            &["Ekonomi Gig: Pendidikan & konsultasi (tutor online, coaching, kursus digital)"],
        ),
        alias(
            "Pembuatan Kandungan",
            &["Ekonomi Gig: Pembuatan kandungan (YouTube, TikTok, streaming)"],
        ),
        alias(
            "Digital",
            &["Ekonomi Gig: Freelancing digital (design, copywriting, programming, social media marketing)"],
        ),
        alias(
            "E-commerce",
            &["Ekonomi Gig: E-commerce & dropshipping (Shopee, Lazada, TikTok Shop)", "dropshipping"],
        ),
        alias(
            GIG_NOT_INTERESTED,
            &[
                "Saya tidak bercadang untuk terlibat dalam mana-mana pekerjaan bebas",
                "tidak bercadang",
                "tidak terlibat",
            ],
        ),
    ],
    ignored: &[],
    unmapped: UnmappedPolicy::TitleCase,
};
pub static EDUCATION_FINANCING_GROUPS: CategorySet = CategorySet {
    key: "education_financing_groups",
    categories: &[
        alias("Biasiswa / Tajaan", &["biasiswa", "scholarship", "grant", "tajaan"]),
        alias("Pinjaman", &["pinjaman", "loan", "ptptn"]),
        alias("Keluarga", &["keluarga", "ibu bapa", "family"]),
        alias("Sendiri", &["sendiri", "simpanan", "self"]),
    ],
    ignored: NOT_APPLICABLE,
    unmapped: UnmappedPolicy::Others,
};
pub static ALL_SETS: &[&CategorySet] = &[
    &JOB_CHALLENGES,
    &JOB_CHALLENGE_GROUPS,
    &SUCCESS_FACTORS,
    &SUCCESS_FACTOR_GROUPS,
    &SUPPORT_NEEDED,
    &GIG_ECONOMY,
    &EDUCATION_FINANCING_GROUPS,
];
/// Default canonical set for a logical key, if the question is multi-select.
pub fn set_for(key: &str) -> Option<&'static CategorySet> {
    ALL_SETS.iter().copied().find(|s| s.key == key)
}
/// Display orders for single-choice bracketed questions.
pub mod orders {
    pub const SALARY_BRACKETS: &[&str] = &[
        "RM1000-RM1999",
        "RM2000-RM2999",
        "RM3000-RM3999",
        "RM4000-RM4999",
        "RM5000 ke atas",
    ];
    pub const TIME_TO_EMPLOYMENT: &[&str] = &[
        "Kurang dari 3 bulan",
        "3 - 6 bulan",
        "7 - 12 bulan",
        "Lebih dari 1 tahun",
    ];
    pub const LIKERT: &[&str] = &[
        "Sangat setuju",
        "Setuju",
        "Neutral",
        "Tidak setuju",
        "Sangat tidak setuju",
    ];
    pub const YES_NO: &[&str] = &["Ya", "Tidak"];
}
/// Order for a key when the caller does not pass one.
pub fn default_order(key: &str) -> Option<&'static [&'static str]> {
    match key {
        "current_salary" | "expected_salary" => Some(orders::SALARY_BRACKETS),
        "time_to_employment" => Some(orders::TIME_TO_EMPLOYMENT),
        "university_preparation" => Some(orders::LIKERT),
        "internship" | "professional_cert" => Some(orders::YES_NO),
        _ => None,
    }
}
