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
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
pub const ENV_PREFIX: &str = "TALLY";
/// Engine-wide knobs. Every field has a default so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Report the fixed 0 / 17.9 / 82.1 time-to-employment distribution instead
    /// of the computed one. Composite scores always use the computed rule.
    pub static_time_distribution: bool,
    pub default_per_page: usize,
    pub max_per_page: usize,
    pub max_export_rows: usize,
    /// Columns differing only by surrounding whitespace are the same question.
    pub trailing_space_variants_identical: bool,
    /// Lowest monthly salary (RM) counted by the `high_salary_rate` KPI.
    pub high_salary_kpi_floor: u32,
}
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            static_time_distribution: true,
            default_per_page: 50,
            max_per_page: 1000,
            max_export_rows: 10_000,
            trailing_space_variants_identical: true,
            high_salary_kpi_floor: crate::metrics::KPI_HIGH_SALARY_FLOOR,
        }
    }
}
impl EngineConfig {
    /// Layers an optional TOML file and `TALLY_*` environment variables over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let loaded: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(ConfigError::from)?
            .try_deserialize()
            .map_err(ConfigError::from)?;
        loaded.validate()?;
        Ok(loaded)
    }
    pub fn validate(&self) -> Result<()> {
        if self.default_per_page == 0 || self.default_per_page > self.max_per_page {
            return Err(ConfigError::InvalidValue {
                field: "default_per_page".to_string(),
                reason: format!("must be between 1 and max_per_page ({})", self.max_per_page),
            }
            .into());
        }
        if self.max_export_rows == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_export_rows".to_string(),
                reason: "must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }
    pub fn with_static_time_distribution(mut self, enabled: bool) -> Self {
        self.static_time_distribution = enabled;
        self
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "static_time_distribution = false\nmax_export_rows = 500").unwrap();
        let cfg = EngineConfig::load(Some(file.path())).unwrap();
        assert!(!cfg.static_time_distribution);
        assert_eq!(cfg.max_export_rows, 500);
        assert_eq!(cfg.default_per_page, 50);
    }
    #[test]
    fn rejects_zero_page_size() {
        let cfg = EngineConfig {
            default_per_page: 0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
