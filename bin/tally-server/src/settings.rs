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
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tally::EngineConfig;
pub const ENV_PREFIX: &str = "TALLY_SERVER";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    pub data_path: Option<PathBuf>,
    pub engine: EngineConfig,
}
impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            data_path: None,
            engine: EngineConfig::default(),
        }
    }
}
impl ServerSettings {
    /// Optional TOML file, then `TALLY_SERVER_*` variables (`TALLY_SERVER_ENGINE__MAX_PER_PAGE`).
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.engine.validate()?;
        Ok(settings)
    }
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address '{}': {e}", self.bind))
    }
}
