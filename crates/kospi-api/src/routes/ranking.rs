//! 시가총액 랭킹 API 라우트
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/ranking/top` - 시가총액 상위 종목 (오름차순)

use axum::{extract::State, routing::get, Json, Router};
use kospi_dashboard::RankingChart;
use std::sync::Arc;

use crate::state::AppState;

/// 시가총액 랭킹 차트 데이터.
///
/// GET /api/v1/ranking/top
pub async fn get_top_ranked(State(state): State<Arc<AppState>>) -> Json<RankingChart> {
    Json(state.dashboard.ranking())
}

pub fn ranking_router() -> Router<Arc<AppState>> {
    Router::new().route("/top", get(get_top_ranked))
}
