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
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally::{FilterSpec, SurveyEngine};
use tally_server::{build_router, ServerSettings};
use tracing::{info, warn};
#[derive(Parser, Debug, Clone)]
#[command(name = "tally-server", about = "Graduate survey aggregation service")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}
#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Load the survey and serve the dashboard API.
    Serve {
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print headline KPIs and the data-health report for a survey file.
    Inspect {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();
    match Cli::parse().cmd {
        Command::Serve { data, bind, config } => serve(data, bind, config).await,
        Command::Inspect { data, config } => inspect(data, config),
    }
}
async fn serve(data: Option<PathBuf>, bind: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let mut settings = ServerSettings::load(config.as_deref())?;
    if let Some(bind) = bind {
        settings.bind = bind;
    }
    let data_path = data
        .or_else(|| settings.data_path.clone())
        .ok_or_else(|| anyhow::anyhow!("no survey file: pass --data or set data_path"))?;
    let engine = SurveyEngine::load(&data_path, settings.engine.clone())?;
    info!(
        path = %data_path.display(),
        static_time_distribution = settings.engine.static_time_distribution,
        "survey loaded"
    );
    let app = build_router(engine);
    let addr = settings.bind_addr()?;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            warn!(error = %e, %addr, "bind failed, using ephemeral");
            tokio::net::TcpListener::bind("127.0.0.1:0").await?
        }
    };
    let local = listener.local_addr()?;
    info!(%local, "tally-server listening");
    tokio::select! { r = axum::serve(listener, app) => r?, _ = tokio::signal::ctrl_c() => {} }
    info!("tally-server shutting down");
    Ok(())
}
fn inspect(data: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let settings = ServerSettings::load(config.as_deref())?;
    let engine = SurveyEngine::load(&data, settings.engine)?;
    let report = serde_json::json!({
        "kpis": engine.kpis(&FilterSpec::new()),
        "health": engine.data_health(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
