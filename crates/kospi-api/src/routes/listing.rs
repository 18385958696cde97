//! 종목 목록 API 라우트
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/listing?search=&limit=` - 종목 검색 (선택 위젯 옵션)

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use kospi_core::{ListingEntry, Market};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::state::AppState;

/// 기본 반환 개수.
const DEFAULT_LIMIT: usize = 50;

/// 최대 반환 개수.
const MAX_LIMIT: usize = 5000;

/// 종목 검색 쿼리.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    /// 종목명 또는 종목코드 일부
    #[serde(default)]
    pub search: Option<String>,

    /// 반환 개수 (기본 50, 최대 5000)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// 종목 목록 응답.
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub market: Market,
    /// 전체 종목 수
    pub total: usize,
    /// 검색 결과 (목록 순서)
    pub entries: Vec<ListingEntry>,
}

/// 종목 검색.
///
/// GET /api/v1/listing
pub async fn search_listing(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingQuery>,
) -> Json<ListingResponse> {
    debug!("종목 검색 요청: {:?}", query);

    let listing = state.dashboard.listing();
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let entries = listing
        .search(query.search.as_deref().unwrap_or(""), limit)
        .into_iter()
        .cloned()
        .collect();

    Json(ListingResponse {
        market: listing.market(),
        total: listing.len(),
        entries,
    })
}

pub fn listing_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(search_listing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> serde_json::Value {
        let app = listing_router().with_state(Arc::new(create_test_state()));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_search_by_name() {
        // "삼성" URL 인코딩
        let json = get_json("/?search=%EC%82%BC%EC%84%B1").await;
        assert_eq!(json["market"], "KOSPI");
        assert_eq!(json["total"], 12);
        let names: Vec<_> = json["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["삼성전자", "삼성바이오로직스"]);
    }

    #[tokio::test]
    async fn test_limit_and_default() {
        let json = get_json("/?limit=3").await;
        assert_eq!(json["entries"].as_array().unwrap().len(), 3);

        let json = get_json("/").await;
        assert_eq!(json["entries"].as_array().unwrap().len(), 12);
    }
}
