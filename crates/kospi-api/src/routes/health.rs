//! 헬스 체크 endpoint.
//!
//! - `GET /health` - 프로세스 생존 여부
//! - `GET /health/ready` - 종목 목록과 일봉 소스 상태

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use kospi_core::Market;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 서비스 전체 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Healthy,
    /// 종목 목록이 비어 랭킹과 선택을 제공할 수 없음
    Degraded,
}

/// 준비 상태 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub state: ServiceState,
    pub version: String,
    pub uptime_secs: i64,
    /// 응답 시각 (RFC 3339)
    pub checked_at: String,
    pub listing: ListingStatus,
    /// 일봉 소스 이름 (naver, krx, memory)
    pub series_source: String,
}

/// 세션 시작 시 로드한 종목 목록 요약.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListingStatus {
    pub market: Market,
    pub entries: usize,
    /// 비어 있을 때만 채워짐
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

impl ListingStatus {
    fn of(state: &AppState) -> Self {
        let listing = state.dashboard.listing();
        Self {
            market: listing.market(),
            entries: listing.len(),
            problem: listing
                .is_empty()
                .then(|| "종목 목록이 비어 있습니다".to_string()),
        }
    }
}

/// 생존 확인.
pub async fn liveness() -> &'static str {
    "OK"
}

/// 준비 상태 확인. 목록이 비어 있으면 503입니다.
pub async fn readiness(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let listing = ListingStatus::of(&state);
    let (service, code) = match listing.problem {
        None => (ServiceState::Healthy, StatusCode::OK),
        Some(_) => (ServiceState::Degraded, StatusCode::SERVICE_UNAVAILABLE),
    };

    let body = ReadinessResponse {
        state: service,
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        checked_at: chrono::Utc::now().to_rfc3339(),
        listing,
        series_source: state.dashboard.series_source_name().to_string(),
    };
    (code, Json(body))
}

pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(liveness))
        .route("/ready", get(readiness))
}
