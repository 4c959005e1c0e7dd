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
//! The six graduate-quality criteria. Each scorer is a pure function of one
//! respondent's lower-cased answers and returns 0, 1 or 2.
use crate::normalize::label_key;
/// Label-key fragments of the top salary bracket ("RM5,000 ke atas").
pub const QUALITY_TOP_SALARY_KEYS: &[&str] = &["rm5000", "keatas"];
/// Label key of the only bracket worth one point; dash style and spacing are already folded.
pub const QUALITY_MID_SALARY_KEY: &str = "rm3000-rm4999";
/// Lower-cased answers one row contributes to scoring; empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSignals {
    pub job_type: String,
    pub work_status: String,
    pub sector: String,
    pub industry: String,
    pub salary: String,
    pub time_to_employment: String,
}
impl RowSignals {
    pub fn new(
        job_type: &str,
        work_status: &str,
        sector: &str,
        industry: &str,
        salary: &str,
        time_to_employment: &str,
    ) -> Self {
        let lower = |s: &str| s.trim().to_lowercase();
        Self {
            job_type: lower(job_type),
            work_status: lower(work_status),
            sector: lower(sector),
            industry: lower(industry),
            salary: lower(salary),
            time_to_employment: lower(time_to_employment),
        }
    }
}
fn has_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
pub fn score_job_alignment(row: &RowSignals) -> u8 {
    let job = row.job_type.as_str();
    let status = row.work_status.as_str();
    if has_any(job, &["luar bidang", "tidak bekerja", "ekonomi gig"]) {
        return 0;
    }
    if job.contains("mengusahakan perniagaan") {
        return if status.contains("usahawan") || row.sector.contains("keusahawanan") {
            2
        } else {
            1
        };
    }
    if !job.contains("dalam bidang") {
        return 0;
    }
    if status.contains("pekerja tetap") || status.contains("usahawan") {
        2
    } else if status.contains("pekerja kontrak") {
        1
    } else if status.contains("ekonomi gig") {
        0
    } else {
        1
    }
}
pub fn score_salary(row: &RowSignals) -> u8 {
    if row.salary.is_empty() {
        return 0;
    }
    let key = label_key(&row.salary);
    if has_any(&key, QUALITY_TOP_SALARY_KEYS) {
        2
    } else if key == QUALITY_MID_SALARY_KEY {
        1
    } else {
        0
    }
}
pub fn score_employer(row: &RowSignals) -> u8 {
    let sector = row.sector.as_str();
    if has_any(sector, &["ekonomi gig", "tidak bekerja", "mikro"]) {
        0
    } else if sector.contains("keusahawanan") {
        1
    } else if has_any(sector, &["glc", "multinasional", "saham", "swasta", "kerajaan"]) {
        2
    } else {
        1
    }
}
const WITHIN_A_YEAR: &[&str] = &[
    "kurangdari3bulan",
    "kurangdaripada1bulan",
    "1-3bulan",
    "3-6bulan",
    "4-6bulan",
    "6-12bulan",
    "7-12bulan",
];
const ONE_TO_TWO_YEARS: &[&str] = &["1tahun", "2tahun", "1-2tahun", "13-24bulan"];
const OVER_A_YEAR: &[&str] = &["lebihdari1tahun", "lebihdarisatutahun", "lebihdaripada1tahun", ">1tahun"];
/// Longer-than-a-year answers are checked first: "lebih dari 1 tahun" also contains "1 tahun".
pub fn score_time_to_employment(row: &RowSignals) -> u8 {
    let key = label_key(&row.time_to_employment);
    if key.is_empty() || has_any(&key, OVER_A_YEAR) {
        0
    } else if has_any(&key, WITHIN_A_YEAR) {
        2
    } else if has_any(&key, ONE_TO_TWO_YEARS) {
        1
    } else {
        0
    }
}
pub const STRATEGIC_INDUSTRIES: &[&str] = &[
    "teknologi maklumat & telekomunikasi",
    "kewangan, perbankan & insurans",
    "perubatan, farmasi & penjagaan kesihatan",
    "perakaunan & audit",
    "komunikasi, media & penyiaran",
    "logistik, pengangkutan & rantaian bekalan",
];
pub const LOW_IMPACT_INDUSTRIES: &[&str] = &["ekonomi gig & freelancing", "pertanian, perladangan & sumber asli"];
pub const SUPPORTIVE_INDUSTRIES: &[&str] = &[
    "perniagaan, keusahawanan & perdagangan",
    "jualan, pemasaran & pengiklanan",
    "pendidikan & latihan",
    "pelancongan, hospitaliti & pengurusan acara",
    "sektor awam & perkhidmatan kerajaan",
    "seni, reka bentuk & kreatif digital",
];
pub fn score_industry(row: &RowSignals) -> u8 {
    let industry = row.industry.as_str();
    if has_any(industry, LOW_IMPACT_INDUSTRIES) {
        0
    } else if has_any(industry, STRATEGIC_INDUSTRIES) {
        2
    } else {
        // supportive, unlisted and unanswered alike
        1
    }
}
pub fn score_entrepreneurial(row: &RowSignals) -> u8 {
    let job = row.job_type.as_str();
    let status = row.work_status.as_str();
    if job.contains("ekonomi gig") || status.contains("ekonomi gig") {
        return 0;
    }
    if status.contains("usahawan") {
        return 2;
    }
    let runs_business = job.contains("mengusahakan perniagaan");
    let entrepreneur_sector = row.sector.contains("keusahawanan");
    match (runs_business, entrepreneur_sector) {
        (true, true) => 2,
        (true, false) | (false, true) => 1,
        (false, false) => 0,
    }
}
/// Static description of one criterion plus its scorer.
#[derive(Debug, Clone, Copy)]
pub struct Criterion {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub icon_bg: &'static str,
    /// Labels for scores 2, 1 and 0, in that order.
    pub score_labels: [&'static str; 3],
    pub score: fn(&RowSignals) -> u8,
}
impl Criterion {
    pub fn label_for(&self, score: u8) -> &'static str {
        match score {
            2 => self.score_labels[0],
            1 => self.score_labels[1],
            _ => self.score_labels[2],
        }
    }
}
pub const JOB_ALIGNMENT: &str = "job_alignment";
pub const SALARY_PROGRESSION: &str = "salary_progression";
pub const EMPLOYER_QUALITY: &str = "employer_quality";
pub const TIME_TO_EMPLOYMENT: &str = "time_to_employment";
pub const INDUSTRY_RELEVANCE: &str = "industry_relevance";
pub const ENTREPRENEURIAL_IMPACT: &str = "entrepreneurial_impact";
pub static CRITERIA: [Criterion; 6] = [
    Criterion {
        id: JOB_ALIGNMENT,
        title: "Jawatan & Padanan Bidang",
        description: "Menilai tahap jawatan dan keselarasan bidang pekerjaan graduan.",
        icon: "fas fa-user-tie",
        icon_bg: "bg-gradient-to-br from-blue-500 to-indigo-600",
        score_labels: [
            "Eksekutif / Pakar (Dalam Bidang)",
            "Eksekutif (Luar Bidang)",
            "Tidak relevan / Bawah Eksekutif",
        ],
        score: score_job_alignment,
    },
    Criterion {
        id: SALARY_PROGRESSION,
        title: "Gaji Semasa & Perkembangan",
        description: "Mengukur daya saing gaji graduan berbanding penanda aras pasaran.",
        icon: "fas fa-money-bill-wave",
        icon_bg: "bg-gradient-to-br from-emerald-500 to-green-600",
        score_labels: ["RM5,000 ke atas", "RM3,000 - RM4,999", "< RM3,000"],
        score: score_salary,
    },
    Criterion {
        id: EMPLOYER_QUALITY,
        title: "Jenis Syarikat / Majikan",
        description: "Menilai struktur organisasi dan peluang perkembangan kerjaya.",
        icon: "fas fa-building",
        icon_bg: "bg-gradient-to-br from-purple-500 to-indigo-500",
        score_labels: [
            "GLC / MNC / syarikat tersenarai",
            "SME / syarikat tempatan",
            "Mikro / tidak berdaftar",
        ],
        score: score_employer,
    },
    Criterion {
        id: TIME_TO_EMPLOYMENT,
        title: "Tempoh Mendapat Pekerjaan",
        description: "Pelbagai masa graduan memasuki pasaran kerja selepas graduasi.",
        icon: "fas fa-stopwatch",
        icon_bg: "bg-gradient-to-br from-cyan-500 to-blue-500",
        score_labels: ["< 1 tahun", "1 tahun - 3 tahun", "> 3 tahun"],
        score: score_time_to_employment,
    },
    Criterion {
        id: INDUSTRY_RELEVANCE,
        title: "Jenis Industri Strategik",
        description: "Menilai penjajaran industri dengan sektor berimpak tinggi.",
        icon: "fas fa-industry",
        icon_bg: "bg-gradient-to-br from-amber-500 to-orange-500",
        score_labels: [
            "Industri strategik (High Growth High Value)",
            "Industri Perkhidmatan Umum (perkhidmatan sokongan/ pentadbiran)",
            "Industri Asas Ekonomi (pertanian asas, peruncitan kecil)",
        ],
        score: score_industry,
    },
    Criterion {
        id: ENTREPRENEURIAL_IMPACT,
        title: "Graduan Sebagai Pencipta Pekerjaan",
        description: "Kadar graduan menjadi usahawan dan menjana peluang pekerjaan.",
        icon: "fas fa-seedling",
        icon_bg: "bg-gradient-to-br from-teal-500 to-emerald-500",
        score_labels: [
            "Berniaga dan menggaji pekerja lain",
            "Berniaga sendiri (solo)",
            "Tiada aktiviti keusahawanan",
        ],
        score: score_entrepreneurial,
    },
];
/// Per-criterion scores of one row, in [`CRITERIA`] order.
pub fn score_row(row: &RowSignals) -> [u8; 6] {
    let mut scores = [0u8; 6];
    for (slot, criterion) in scores.iter_mut().zip(CRITERIA.iter()) {
        *slot = (criterion.score)(row);
    }
    scores
}
#[cfg(test)]
mod tests {
    use super::*;
    fn row(job: &str, status: &str, sector: &str, industry: &str, salary: &str, time: &str) -> RowSignals {
        RowSignals::new(job, status, sector, industry, salary, time)
    }
    #[test]
    fn job_alignment_rules() {
        assert_eq!(score_job_alignment(&row("Bekerja dalam bidang pengajian", "Pekerja tetap", "", "", "", "")), 2);
        assert_eq!(score_job_alignment(&row("Bekerja dalam bidang pengajian", "Pekerja kontrak", "", "", "", "")), 1);
        assert_eq!(score_job_alignment(&row("Bekerja dalam bidang pengajian", "Pekerja ekonomi gig", "", "", "", "")), 0);
        assert_eq!(score_job_alignment(&row("Bekerja dalam bidang pengajian", "", "", "", "", "")), 1);
        assert_eq!(score_job_alignment(&row("Bekerja luar bidang pengajian", "Pekerja tetap", "", "", "", "")), 0);
        assert_eq!(score_job_alignment(&row("Mengusahakan perniagaan sendiri", "", "", "", "", "")), 1);
        assert_eq!(score_job_alignment(&row("", "Pekerja tetap", "", "", "", "")), 0);
    }
    #[test]
    fn salary_rules_accept_dash_variants() {
        let s = |v: &str| score_salary(&row("", "", "", "", v, ""));
        assert_eq!(s("RM5,000 ke atas"), 2);
        assert_eq!(s("RM3,000 - RM4,999"), 1);
        assert_eq!(s("RM3,000 \u{2013} RM4,999"), 1);
        assert_eq!(s("RM3000 - RM4999"), 1);
        assert_eq!(s("RM4000-RM4999"), 0);
        assert_eq!(s("RM3000-RM3999"), 0);
        assert_eq!(s("RM1,500 - RM2,999"), 0);
        assert_eq!(s("Kurang daripada RM1,500"), 0);
        assert_eq!(s(""), 0);
    }
    #[test]
    fn employer_rules() {
        let s = |v: &str| score_employer(&row("", "", v, "", "", ""));
        assert_eq!(s("GLC (Government-Linked Companies)"), 2);
        assert_eq!(s("Sektor Kerajaan"), 2);
        assert_eq!(s("Perniagaan mikro"), 0);
        assert_eq!(s("Sektor Keusahawanan (Menjalankan perniagaan sendiri)"), 1);
        assert_eq!(s("NGO/Nonprofit"), 1);
        assert_eq!(s(""), 1);
    }
    #[test]
    fn time_rules_check_long_waits_first() {
        let s = |v: &str| score_time_to_employment(&row("", "", "", "", "", v));
        assert_eq!(s("Kurang dari 3 bulan"), 2);
        assert_eq!(s("3 - 6 bulan"), 2);
        assert_eq!(s("7 - 12 bulan"), 2);
        assert_eq!(s("1 - 2 tahun"), 1);
        assert_eq!(s("Lebih dari 1 tahun"), 0);
        assert_eq!(s(""), 0);
    }
    #[test]
    fn industry_and_entrepreneur_rules() {
        assert_eq!(score_industry(&row("", "", "", "Kewangan, Perbankan & Insurans", "", "")), 2);
        assert_eq!(score_industry(&row("", "", "", "Pendidikan & Latihan", "", "")), 1);
        assert_eq!(score_industry(&row("", "", "", "Pertanian, Perladangan & Sumber Asli", "", "")), 0);
        assert_eq!(score_industry(&row("", "", "", "Pembuatan", "", "")), 1);
        assert_eq!(score_industry(&row("", "", "", "", "", "")), 1);
        assert_eq!(score_entrepreneurial(&row("Mengusahakan perniagaan sendiri", "", "", "", "", "")), 1);
        assert_eq!(score_entrepreneurial(&row("", "", "Sektor Keusahawanan", "", "", "")), 1);
        assert_eq!(
            score_entrepreneurial(&row("Mengusahakan perniagaan sendiri", "", "Sektor Keusahawanan", "", "", "")),
            2
        );
        assert_eq!(score_entrepreneurial(&row("", "Usahawan", "", "", "", "")), 2);
        assert_eq!(score_entrepreneurial(&row("", "Pekerja ekonomi gig", "Sektor Keusahawanan", "", "", "")), 0);
    }
    #[test]
    fn unanswered_sector_and_industry_take_the_default() {
        let r = row("Bekerja dalam bidang pengajian", "Pekerja tetap", "", "", "RM5,000 ke atas", "3 - 6 bulan");
        assert_eq!(score_row(&r), [2, 2, 1, 2, 1, 0]);
        assert_eq!(score_row(&r).iter().sum::<u8>(), 8);
    }
}
