//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::http::StatusCode;
use axum::Json;
use kospi_core::DashboardError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "INVALID_INPUT",
///   "message": "잘못된 입력: 시작 날짜(2024-02-01)가 종료 날짜(2024-01-01)보다 늦습니다",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_INPUT", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 도메인 에러를 HTTP 상태 코드와 에러 응답으로 변환합니다.
pub fn into_api_error(err: DashboardError) -> (StatusCode, Json<ApiErrorResponse>) {
    let (status, code) = match &err {
        DashboardError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
        DashboardError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        DashboardError::Network(_) | DashboardError::Upstream(_) => {
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
        }
        DashboardError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
        DashboardError::Data(_) | DashboardError::Serialization(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "DATA_ERROR")
        }
        DashboardError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    if status.is_server_error() {
        tracing::error!(code, error = %err, "요청 처리 실패");
    } else {
        tracing::debug!(code, error = %err, "잘못된 요청");
    }

    (status, Json(ApiErrorResponse::new(code, err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert!(error.timestamp.is_some());
        assert!(error.details.is_none());
        assert_eq!(error.to_string(), "[TEST_ERROR] Test message");
    }

    #[test]
    fn test_with_details_serialization() {
        let error = ApiErrorResponse::with_details(
            "INVALID_INPUT",
            "bad",
            serde_json::json!({"field": "start"}),
        );
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains(r#""details":{"field":"start"}"#));
    }

    #[test]
    fn test_status_mapping() {
        let (status, body) = into_api_error(DashboardError::InvalidInput("x".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_INPUT");

        let (status, _) = into_api_error(DashboardError::Upstream("x".into()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = into_api_error(DashboardError::Internal("x".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
