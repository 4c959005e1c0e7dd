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
//! Cell canonicalization: absent detection, multi-select decomposition and
//! mapping fragments onto a [`CategorySet`].
use crate::categories::{CategorySet, UnmappedPolicy, OTHERS_LABEL};
use crate::data::TableView;
use std::borrow::Cow;
pub const SEPARATORS: &[char] = &[',', ';', '|', '\n'];
/// Fragments this short (in characters) are noise from stray separators.
pub const MAX_NOISE_FRAGMENT: usize = 2;
const ABSENT_MARKERS: &[&str] = &["tidak dinyatakan", "nan"];
/// Trimmed cell text, or `None` for the ABSENT sentinel.
pub fn clean(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || ABSENT_MARKERS.iter().any(|m| m.eq_ignore_ascii_case(trimmed)) {
        None
    } else {
        Some(trimmed)
    }
}
fn clean_cow(raw: Cow<'_, str>) -> Option<Cow<'_, str>> {
    match raw {
        Cow::Borrowed(s) => clean(s).map(Cow::Borrowed),
        Cow::Owned(s) => clean(&s).map(|c| Cow::Owned(c.to_string())),
    }
}
/// Canonical value of `column` at absolute `row`.
pub fn value_at<'a>(view: &TableView<'a>, column: &str, row: usize) -> Option<Cow<'a, str>> {
    view.raw_text(column, row).and_then(clean_cow)
}
/// Lower-cased convenience for keyword rules.
pub fn lowered_at(view: &TableView<'_>, column: Option<&str>, row: usize) -> String {
    column
        .and_then(|c| value_at(view, c, row))
        .map(|v| v.to_lowercase())
        .unwrap_or_default()
}
/// Comparison key for labels: case, spacing, thousands separators and dash style ignored.
pub fn label_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
/// Splits a multi-select cell into trimmed fragments, dropping noise.
pub fn decompose(cell: &str) -> Vec<&str> {
    cell.split(SEPARATORS)
        .map(str::trim)
        .filter(|f| f.chars().count() > MAX_NOISE_FRAGMENT)
        .collect()
}
pub fn title_case(fragment: &str) -> String {
    fragment
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
/// First category whose label or alias contains the fragment or is contained by it.
pub fn match_category(set: &CategorySet, fragment: &str) -> Option<&'static str> {
    let lowered = fragment.to_lowercase();
    set.categories
        .iter()
        .find(|category| {
            std::iter::once(&category.label)
                .chain(category.aliases.iter())
                .any(|phrase| {
                    let phrase = phrase.to_lowercase();
                    lowered.contains(&phrase) || phrase.contains(&lowered)
                })
        })
        .map(|category| category.label)
}
/// Pulls out canonical phrases that themselves contain separators before the cell
/// is split, so `"Rangkaian peribadi / kenalan (pensyarah, alumni, ...)"` stays whole.
fn extract_whole_phrases(cell: &str, set: &CategorySet) -> (String, Vec<&'static str>) {
    let mut remaining = cell.to_string();
    let mut found = Vec::new();
    for category in set.categories {
        for phrase in std::iter::once(&category.label).chain(category.aliases.iter()) {
            if !phrase.contains(SEPARATORS) {
                continue;
            }
            let needle = phrase.to_ascii_lowercase();
            while let Some(pos) = remaining.to_ascii_lowercase().find(&needle) {
                remaining.replace_range(pos..pos + needle.len(), ",");
                if !found.contains(&category.label) {
                    found.push(category.label);
                }
            }
        }
    }
    (remaining, found)
}
/// Selections of one cell. Without a set the fragments are returned verbatim;
/// with a set each label appears at most once, in first-seen order.
pub fn selections(cell: &str, set: Option<&CategorySet>) -> Vec<String> {
    let Some(set) = set else {
        return decompose(cell).into_iter().map(str::to_string).collect();
    };
    let (remaining, whole) = extract_whole_phrases(cell, set);
    let mut out: Vec<String> = whole.into_iter().map(str::to_string).collect();
    for fragment in decompose(&remaining) {
        if set.is_ignored(fragment) {
            continue;
        }
        let label = match match_category(set, fragment) {
            Some(label) => label.to_string(),
            None => match set.unmapped {
                UnmappedPolicy::TitleCase => title_case(fragment),
                UnmappedPolicy::Others => OTHERS_LABEL.to_string(),
                UnmappedPolicy::Ignore => continue,
            },
        };
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{GIG_ECONOMY, JOB_CHALLENGES, SUCCESS_FACTORS, SUPPORT_NEEDED};
    #[test]
    fn absent_markers() {
        assert_eq!(clean("  "), None);
        assert_eq!(clean("Tidak Dinyatakan"), None);
        assert_eq!(clean("NaN"), None);
        assert_eq!(clean(" Ya "), Some("Ya"));
    }
    #[test]
    fn decompose_splits_on_every_separator_and_drops_noise() {
        assert_eq!(
            decompose("Alpha, Beta;Gamma | Delta\nEpsilon,ab, ,"),
            vec!["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]
        );
    }
    #[test]
    fn label_key_ignores_formatting() {
        assert_eq!(label_key("RM3,000 \u{2013} RM4,999"), label_key("rm3000-rm4999"));
    }
    #[test]
    fn canonical_phrases_with_commas_are_not_split() {
        let cell = "Rangkaian peribadi / kenalan (pensyarah, alumni, keluarga, rakan), Melalui pameran kerjaya atau job fair";
        assert_eq!(
            selections(cell, Some(&SUCCESS_FACTORS)),
            vec![
                "Rangkaian peribadi / kenalan (pensyarah, alumni, keluarga, rakan)".to_string(),
                "Melalui pameran kerjaya atau job fair".to_string(),
            ]
        );
    }
    #[test]
    fn unmapped_policies() {
        assert_eq!(selections("sesuatu yang lain", Some(&JOB_CHALLENGES)), vec![OTHERS_LABEL.to_string()]);
        assert_eq!(selections("mentor industri", Some(&SUPPORT_NEEDED)), vec!["Mentor Industri".to_string()]);
        assert!(selections("Tidak berkenaan", Some(&JOB_CHALLENGES)).is_empty());
    }
    #[test]
    fn gig_aliases_map_to_short_labels() {
        let cell = "Ekonomi Gig: Penghantaran & e-hailing (Grab, FoodPanda, Lalamove), Ekonomi Gig: E-commerce & dropshipping (Shopee, Lazada, TikTok Shop)";
        assert_eq!(
            selections(cell, Some(&GIG_ECONOMY)),
            vec!["Penghantaran".to_string(), "E-commerce".to_string()]
        );
        assert_eq!(
            selections("Saya tidak bercadang untuk terlibat dalam mana-mana pekerjaan bebas", Some(&GIG_ECONOMY)),
            vec!["Tidak Berminat".to_string()]
        );
    }
}
