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
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tally::{FilterSpec, SortDirection, SurveyEngine, TableQuery, TallyError, FILTER_KEYS};
use tracing::{debug, error, warn};
use uuid::Uuid;
/// Query keys that shape the response rather than filter rows.
pub const RESERVED_KEYS: &[&str] = &["page", "per_page", "search", "sort_by", "sort_dir", "columns", "labels", "format"];
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: &'static str,
    pub request_id: String,
    #[serde(skip)]
    status: StatusCode,
}
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST",
            request_id: Uuid::new_v4().to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }
}
impl From<TallyError> for ApiError {
    fn from(e: TallyError) -> Self {
        let request_id = Uuid::new_v4().to_string();
        if e.is_client_error() {
            warn!(error = %e, %request_id, "rejected query");
            Self {
                error: e.to_string(),
                code: "INVALID_QUERY",
                request_id,
                status: StatusCode::BAD_REQUEST,
            }
        } else {
            error!(error = %e, %request_id, "request failed");
            Self {
                error: e.to_string(),
                code: "INTERNAL_FAILURE",
                request_id,
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }
}
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}
type ApiResult<T> = Result<T, ApiError>;
/// Query string split into filters and response-shaping parameters.
#[derive(Debug, Default)]
pub struct RequestParams {
    pub filters: FilterSpec,
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub columns: Vec<String>,
    pub labels: Vec<String>,
    pub format: Option<String>,
}
impl RequestParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => params.page = Some(value),
                "per_page" => params.per_page = Some(value),
                "search" => params.search = Some(value),
                "sort_by" => params.sort_by = Some(value),
                "sort_dir" => params.sort_dir = Some(value),
                "columns" => params.columns.push(value),
                "labels" => params.labels.push(value),
                "format" => params.format = Some(value),
                _ => params.filters.insert(key, [value]),
            }
        }
        params
    }
    fn labels(&self) -> Option<Vec<&str>> {
        (!self.labels.is_empty()).then(|| self.labels.iter().map(String::as_str).collect())
    }
    fn number(raw: Option<&str>, name: &str, default: usize) -> ApiResult<usize> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|_| ApiError::bad_request(format!("{name} must be a positive integer"))),
        }
    }
    pub fn table_query(&self, default_per_page: usize) -> ApiResult<TableQuery> {
        let page = Self::number(self.page.as_deref(), "page", 1)?;
        let per_page = Self::number(self.per_page.as_deref(), "per_page", default_per_page)?;
        let mut query = TableQuery::new(page, per_page).with_columns(self.columns.iter().cloned());
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query = query.with_search(search);
        }
        if let Some(column) = self.sort_by.as_deref().filter(|s| !s.trim().is_empty()) {
            let direction = match self.sort_dir.as_deref() {
                None => SortDirection::Asc,
                Some(raw) => raw
                    .parse()
                    .map_err(|()| ApiError::bad_request("sort_dir must be 'asc' or 'desc'"))?,
            };
            query = query.with_sort(column, direction);
        }
        Ok(query)
    }
}
type Params = Query<Vec<(String, String)>>;
pub fn build_router(engine: SurveyEngine) -> Router {
    Router::new()
        .route("/api/kpis", get(kpis))
        .route("/api/quality", get(quality))
        .route("/api/charts/{id}", get(chart))
        .route("/api/distribution/{key}", get(distribution))
        .route("/api/multi-select/{key}", get(multi_select))
        .route("/api/cross-tab/{row}/{col}", get(cross_tab))
        .route("/api/dual-series/{a}/{b}", get(dual_series))
        .route("/api/table", get(table))
        .route("/api/filters", get(filters))
        .route("/api/summary", get(summary))
        .route("/api/health", get(health))
        .route("/api/sections", get(sections))
        .route("/api/export", get(export))
        .with_state(engine)
}
async fn kpis(State(engine): State<SurveyEngine>, Query(pairs): Params) -> impl IntoResponse {
    let params = RequestParams::from_pairs(pairs);
    Json(engine.kpis(&params.filters))
}
async fn quality(State(engine): State<SurveyEngine>, Query(pairs): Params) -> impl IntoResponse {
    let params = RequestParams::from_pairs(pairs);
    Json(engine.quality_insights(&params.filters))
}
async fn chart(
    State(engine): State<SurveyEngine>,
    Path(id): Path<String>,
    Query(pairs): Params,
) -> ApiResult<impl IntoResponse> {
    let params = RequestParams::from_pairs(pairs);
    let payload = engine.chart(&id, &params.filters)?;
    let rows = payload.table_rows();
    Ok(Json(json!({ "chart": payload, "table": rows })))
}
async fn distribution(
    State(engine): State<SurveyEngine>,
    Path(key): Path<String>,
    Query(pairs): Params,
) -> impl IntoResponse {
    let params = RequestParams::from_pairs(pairs);
    Json(engine.distribution(&key, &params.filters, params.labels().as_deref()))
}
async fn multi_select(
    State(engine): State<SurveyEngine>,
    Path(key): Path<String>,
    Query(pairs): Params,
) -> impl IntoResponse {
    let params = RequestParams::from_pairs(pairs);
    Json(engine.multi_select(&key, &params.filters, params.labels().as_deref()))
}
async fn cross_tab(
    State(engine): State<SurveyEngine>,
    Path((row, col)): Path<(String, String)>,
    Query(pairs): Params,
) -> impl IntoResponse {
    let params = RequestParams::from_pairs(pairs);
    Json(engine.cross_tab(&row, &col, &params.filters))
}
async fn dual_series(
    State(engine): State<SurveyEngine>,
    Path((a, b)): Path<(String, String)>,
    Query(pairs): Params,
) -> impl IntoResponse {
    let params = RequestParams::from_pairs(pairs);
    Json(engine.dual_series(&a, &b, &params.filters))
}
async fn table(State(engine): State<SurveyEngine>, Query(pairs): Params) -> ApiResult<impl IntoResponse> {
    let params = RequestParams::from_pairs(pairs);
    let query = params.table_query(engine.config().default_per_page)?;
    Ok(Json(engine.table(&params.filters, &query)?))
}
async fn filters(State(engine): State<SurveyEngine>, Query(pairs): Params) -> impl IntoResponse {
    let params = RequestParams::from_pairs(pairs);
    let values = if params.columns.is_empty() {
        engine.available_filter_values(FILTER_KEYS)
    } else {
        engine.available_filter_values(params.columns.as_slice())
    };
    Json(values)
}
async fn summary(State(engine): State<SurveyEngine>, Query(pairs): Params) -> impl IntoResponse {
    let params = RequestParams::from_pairs(pairs);
    Json(engine.summary(&params.filters))
}
async fn health(State(engine): State<SurveyEngine>) -> impl IntoResponse {
    Json(engine.data_health())
}
async fn sections(State(engine): State<SurveyEngine>) -> impl IntoResponse {
    Json(engine.sections())
}
fn to_csv(columns: &[String], rows: &[tally::Row]) -> Result<Vec<u8>, TallyError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let write_error = |e: csv::Error| TallyError::internal(format!("csv export failed: {e}"));
    writer.write_record(columns).map_err(write_error)?;
    for row in rows {
        writer
            .write_record(columns.iter().map(|c| row.get(c).map_or("", String::as_str)))
            .map_err(write_error)?;
    }
    writer
        .into_inner()
        .map_err(|e| TallyError::internal(format!("csv export failed: {e}")))
}
async fn export(State(engine): State<SurveyEngine>, Query(pairs): Params) -> ApiResult<Response> {
    let params = RequestParams::from_pairs(pairs);
    let query = params.table_query(engine.config().default_per_page)?;
    let (columns, rows) = engine.export_rows(&params.filters, &query);
    debug!(rows = rows.len(), format = ?params.format, "export requested");
    match params.format.as_deref().unwrap_or("json") {
        "json" => Ok(Json(json!({ "columns": columns, "data": rows, "total": rows.len() })).into_response()),
        "csv" => {
            let body = to_csv(&columns, &rows)?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (header::CONTENT_DISPOSITION, "attachment; filename=\"survey_export.csv\""),
                ],
                body,
            )
                .into_response())
        }
        other => Err(ApiError::bad_request(format!("unsupported export format '{other}'"))),
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn reserved_keys_are_not_filters() {
        let pairs = vec![
            ("graduation_year".to_string(), "2023".to_string()),
            ("graduation_year".to_string(), "2024".to_string()),
            ("page".to_string(), "2".to_string()),
            ("columns".to_string(), "gender".to_string()),
        ];
        let params = RequestParams::from_pairs(pairs);
        assert_eq!(params.filters.keys().collect::<Vec<_>>(), vec!["graduation_year"]);
        assert_eq!(params.page.as_deref(), Some("2"));
        assert_eq!(params.columns, vec!["gender".to_string()]);
        for key in RESERVED_KEYS {
            let params = RequestParams::from_pairs(vec![((*key).to_string(), "x".to_string())]);
            assert!(params.filters.is_empty(), "{key} leaked into filters");
        }
    }
    #[test]
    fn bad_paging_is_a_client_error() {
        let params = RequestParams::from_pairs(vec![("page".to_string(), "abc".to_string())]);
        let err = params.table_query(50).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
