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
pub mod aggregate;
pub mod catalogue;
pub mod categories;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod health;
pub mod metrics;
pub mod normalize;
pub mod projection;
pub mod quality;
pub mod resolver;
pub use catalogue::{ChartKind, ChartSpec, Section, SECTIONS};
pub use chart::{ChartPayload, Dataset, TableRow, NO_DATA_LABEL};
pub use config::EngineConfig;
pub use data::{CsvLoader, TableView, WorkingTable, XlsxLoader};
pub use error::{ConfigError, DataError, QueryError, Result, TallyError};
pub use filter::{FilterEngine, FilterOutcome, FilterSpec};
pub use health::{DataHealth, SummaryStats};
pub use metrics::Kpis;
pub use projection::{Row, SortDirection, TablePayload, TableQuery};
pub use quality::QualityPayload;
pub use resolver::{ColumnResolver, Resolution};
use aggregate::sort_labels;
use categories::{default_order, set_for, CategorySet};
use indexmap::IndexMap;
use resolver::title_for;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
/// Keys offered as dashboard filters when the caller does not name any.
pub const FILTER_KEYS: &[&str] = &[
    "graduation_year",
    "gender",
    "age",
    "institution",
    "field_of_study",
    "employment_status",
    "work_status",
    "employment_sectors",
    "household_income",
    "education_financing",
];
/// Read-only query surface over one loaded survey. Cloning is cheap; the table is shared.
#[derive(Debug, Clone)]
pub struct SurveyEngine {
    table: Arc<WorkingTable>,
    config: EngineConfig,
}
impl SurveyEngine {
    pub fn new(table: WorkingTable) -> Self {
        Self::from_shared(Arc::new(table))
    }
    pub fn from_shared(table: Arc<WorkingTable>) -> Self {
        Self {
            table,
            config: EngineConfig::default(),
        }
    }
    pub fn load<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let path = path.as_ref();
        let table = if data::is_workbook_path(path) {
            XlsxLoader::new().load_path(path)?
        } else {
            CsvLoader::new().load_path(path)?
        };
        info!(rows = table.row_count(), columns = table.column_count(), "survey engine ready");
        Ok(Self::new(table).with_config(config))
    }
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
    pub fn working_table(&self) -> &WorkingTable {
        &self.table
    }
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    pub fn resolver(&self) -> ColumnResolver<'_> {
        ColumnResolver::new(&self.table).with_trimmed_variants(self.config.trailing_space_variants_identical)
    }
    pub fn subset(&self, filters: &FilterSpec) -> FilterOutcome<'_> {
        FilterEngine::new(self.resolver()).apply(&self.table, filters)
    }
    fn missing(&self, keys: &[&str], dataset_label: &str) -> Option<ChartPayload> {
        let resolution = self.resolver().resolve_all(keys);
        if resolution.is_complete() {
            return None;
        }
        warn!(unresolved = ?resolution.unresolved, "chart column unresolved; returning empty payload");
        Some(ChartPayload::no_data(dataset_label).with_diagnostic(resolution))
    }
    /// One-column value counts. `labels` fixes the label order; without it the
    /// key's bracket order applies, else descending count.
    pub fn distribution(&self, key: &str, filters: &FilterSpec, labels: Option<&[&str]>) -> ChartPayload {
        let title = title_for(key);
        if let Some(sentinel) = self.missing(&[key], title) {
            return sentinel;
        }
        let resolver = self.resolver();
        let Some(column) = resolver.resolve(key) else {
            return ChartPayload::no_data(title);
        };
        let subset = self.subset(filters);
        let order = labels.or_else(|| default_order(key));
        aggregate::distribution(&subset.view, column, title, order)
    }
    /// Multi-select counts, canonicalised by the key's category set when it has one.
    pub fn multi_select(&self, key: &str, filters: &FilterSpec, labels: Option<&[&str]>) -> ChartPayload {
        self.multi_select_with(key, set_for(key), filters, labels)
    }
    fn multi_select_with(
        &self,
        key: &str,
        set: Option<&CategorySet>,
        filters: &FilterSpec,
        labels: Option<&[&str]>,
    ) -> ChartPayload {
        let title = title_for(key);
        if let Some(sentinel) = self.missing(&[key], title) {
            return sentinel;
        }
        let resolver = self.resolver();
        let Some(column) = resolver.resolve(key) else {
            return ChartPayload::no_data(title);
        };
        let subset = self.subset(filters);
        aggregate::multi_select(&subset.view, column, title, set, labels)
    }
    pub fn cross_tab(&self, row_key: &str, column_key: &str, filters: &FilterSpec) -> ChartPayload {
        let title = title_for(row_key);
        if let Some(sentinel) = self.missing(&[row_key, column_key], title) {
            return sentinel;
        }
        let resolver = self.resolver();
        let (Some(row_col), Some(column_col)) = (resolver.resolve(row_key), resolver.resolve(column_key)) else {
            return ChartPayload::no_data(title);
        };
        let subset = self.subset(filters);
        aggregate::cross_tab(&subset.view, row_col, column_col, title)
    }
    pub fn dual_series(&self, first: &str, second: &str, filters: &FilterSpec) -> ChartPayload {
        let (label_a, label_b) = (title_for(first), title_for(second));
        if let Some(sentinel) = self.missing(&[first, second], &format!("{label_a} / {label_b}")) {
            return sentinel;
        }
        let resolver = self.resolver();
        let (Some(col_a), Some(col_b)) = (resolver.resolve(first), resolver.resolve(second)) else {
            return ChartPayload::no_data(label_a);
        };
        let subset = self.subset(filters);
        aggregate::dual_series(&subset.view, (col_a, label_a), (col_b, label_b))
    }
    pub fn kpis(&self, filters: &FilterSpec) -> Kpis {
        let subset = self.subset(filters);
        if subset.view.is_empty() {
            debug!("kpi subset empty");
        }
        metrics::compute(&subset.view, &self.resolver(), self.config.high_salary_kpi_floor)
    }
    pub fn quality_insights(&self, filters: &FilterSpec) -> QualityPayload {
        let subset = self.subset(filters);
        quality::compute(&subset.view, &self.resolver(), &self.config)
    }
    /// Requested columns may be logical keys or physical names.
    fn physical_columns(&self, query: &TableQuery) -> TableQuery {
        let resolver = self.resolver();
        let columns = query
            .columns
            .iter()
            .map(|c| resolver.resolve(c).map_or_else(|| c.clone(), str::to_string))
            .collect();
        TableQuery {
            columns,
            sort: query
                .sort
                .as_ref()
                .map(|(c, dir)| (resolver.resolve(c).map_or_else(|| c.clone(), str::to_string), *dir)),
            ..query.clone()
        }
    }
    pub fn table(&self, filters: &FilterSpec, query: &TableQuery) -> Result<TablePayload> {
        let subset = self.subset(filters);
        projection::table(&subset.view, &self.physical_columns(query), self.config.max_per_page)
    }
    pub fn export_rows(&self, filters: &FilterSpec, query: &TableQuery) -> (Vec<String>, Vec<Row>) {
        let subset = self.subset(filters);
        projection::export_rows(&subset.view, &self.physical_columns(query), self.config.max_export_rows)
    }
    /// Sorted distinct values per resolvable key, over the whole table.
    pub fn available_filter_values<S: AsRef<str>>(&self, keys: &[S]) -> IndexMap<String, Vec<String>> {
        let resolver = self.resolver();
        let view = self.table.view();
        let mut values = IndexMap::new();
        for key in keys {
            let key = key.as_ref();
            let Some(column) = resolver.resolve(key) else {
                debug!(key, "filter key unresolved; no values offered");
                continue;
            };
            let mut labels: Vec<String> = aggregate::value_counts(&view, column).into_keys().collect();
            sort_labels(&mut labels);
            values.insert(key.to_string(), labels);
        }
        values
    }
    /// Runs one catalogue chart by id.
    pub fn chart(&self, id: &str, filters: &FilterSpec) -> Result<ChartPayload> {
        let spec = catalogue::chart(id).ok_or_else(|| QueryError::UnknownChart { id: id.to_string() })?;
        let payload = match spec.kind {
            ChartKind::Distribution { key, .. } => self.distribution(key, filters, spec.kind.order()),
            ChartKind::MultiSelect { key, .. } => self.multi_select_with(key, spec.kind.category_set(), filters, None),
            ChartKind::CrossTab { row, column } => self.cross_tab(row, column, filters),
            ChartKind::DualSeries { first, second } => self.dual_series(first, second, filters),
        };
        Ok(payload)
    }
    pub fn sections(&self) -> &'static [Section] {
        SECTIONS
    }
    pub fn summary(&self, filters: &FilterSpec) -> SummaryStats {
        health::summary(&self.subset(filters), &self.resolver())
    }
    pub fn data_health(&self) -> DataHealth {
        health::data_health(&self.table)
    }
}
