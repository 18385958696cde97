//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/v1/listing` - 종목 검색
//! - `/api/v1/ranking` - 시가총액 랭킹
//! - `/api/v1/dashboard` - 지표, 라인 차트, 캔들스틱 차트

pub mod dashboard;
pub mod health;
pub mod listing;
pub mod ranking;

pub use dashboard::{dashboard_router, DashboardQuery};
pub use health::{health_router, ListingStatus, ReadinessResponse, ServiceState};
pub use listing::{listing_router, ListingQuery, ListingResponse};
pub use ranking::ranking_router;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // API v1 엔드포인트
        .nest("/api/v1/listing", listing_router())
        .nest("/api/v1/ranking", ranking_router())
        .nest("/api/v1/dashboard", dashboard_router())
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

    #[tokio::test]
    async fn test_routes_are_mounted() {
        for uri in [
            "/health",
            "/health/ready",
            "/api/v1/listing",
            "/api/v1/ranking/top",
            "/api/v1/dashboard?start=2024-01-01&end=2024-01-31",
        ] {
            let app = create_api_router().with_state(Arc::new(create_test_state()));
            let response = app
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_api_router().with_state(Arc::new(create_test_state()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
