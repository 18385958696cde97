//! 대시보드 API 라우트
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/dashboard?names=삼성전자,카카오&start=2024-01-01&end=2024-01-31`
//!
//! 선택한 종목의 지표, 라인 차트, 캔들스틱 차트를 한 번에 반환합니다.
//! 해석된 종목이 없어도 200 응답이며 `halted`에 안내 문구가 들어갑니다.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use kospi_core::parse_date;
use kospi_dashboard::DashboardView;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::{into_api_error, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 대시보드 쿼리.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// 쉼표로 구분한 종목명 (선택 순서 유지)
    #[serde(default)]
    pub names: Option<String>,

    /// 시작일 (YYYY-MM-DD 또는 YYYYMMDD, 기본 설정값)
    #[serde(default)]
    pub start: Option<String>,

    /// 종료일 (기본 오늘)
    #[serde(default)]
    pub end: Option<String>,
}

impl DashboardQuery {
    fn selection(&self) -> Vec<String> {
        self.names
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// 대시보드 렌더링.
///
/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardView>> {
    debug!("대시보드 요청: {:?}", query);

    let start = parse_query_date("start", query.start.as_deref())?;
    let end = parse_query_date("end", query.end.as_deref())?;

    let range = state
        .dashboard
        .date_range(start, end)
        .map_err(into_api_error)?;

    let view = state
        .dashboard
        .render(&query.selection(), range)
        .await
        .map_err(into_api_error)?;

    debug!(halted = view.is_halted(), metrics = view.metrics.len(), "대시보드 응답");
    Ok(Json(view))
}

/// 날짜 쿼리 파싱. 실패하면 어느 필드가 잘못됐는지 `details`에 담습니다.
fn parse_query_date(field: &'static str, value: Option<&str>) -> ApiResult<Option<NaiveDate>> {
    let Some(value) = value else {
        return Ok(None);
    };
    parse_date(value).map(Some).map_err(|e| {
        let (status, Json(body)) = into_api_error(e);
        let details = serde_json::json!({ "field": field, "value": value });
        (
            status,
            Json(ApiErrorResponse::with_details(body.code, body.message, details)),
        )
    })
}

pub fn dashboard_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_dashboard))
}
