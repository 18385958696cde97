//! 데이터 모듈 오류 타입.

use kospi_core::DashboardError;
use thiserror::Error;

/// 데이터 소스 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 요청 실패
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// 외부 API가 실패 상태를 반환함
    #[error("{source_name} 응답 오류: HTTP {status}")]
    Status { source_name: &'static str, status: u16 },

    /// 데이터 가져오기 오류 (외부 소스)
    #[error("데이터 가져오기 실패: {0}")]
    FetchError(String),

    /// 응답 파싱 오류
    #[error("파싱 실패: {0}")]
    ParseError(String),

    /// 잘못된 데이터 형식
    #[error("잘못된 데이터: {0}")]
    InvalidData(String),

    /// 설정 오류
    #[error("설정 오류: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

impl From<DataError> for DashboardError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Http(e) => DashboardError::Network(e.to_string()),
            e @ DataError::Status { .. } => DashboardError::Upstream(e.to_string()),
            DataError::FetchError(msg) => DashboardError::Upstream(msg),
            DataError::ParseError(msg) | DataError::InvalidData(msg) => {
                DashboardError::Data(msg)
            }
            DataError::ConfigError(msg) => DashboardError::Config(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_dashboard_error() {
        let err: DashboardError = DataError::Status {
            source_name: "KRX",
            status: 503,
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "외부 API 에러: KRX 응답 오류: HTTP 503");

        let err: DashboardError = DataError::ParseError("bad".into()).into();
        assert!(matches!(err, DashboardError::Data(_)));
    }
}
