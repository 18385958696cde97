//! 대시보드 시스템의 에러 타입.
//!
//! 렌더링 과정에서 발생하는 실패는 대부분 진단 메시지로 흡수되며,
//! 이 타입은 설정 오류나 잘못된 입력처럼 호출자에게 전달되어야 하는
//! 경우에만 사용됩니다.

use thiserror::Error;

/// 핵심 대시보드 에러.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 소스 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 외부 API 응답 에러
    #[error("외부 API 에러: {0}")]
    Upstream(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 대시보드 작업을 위한 Result 타입.
pub type DashboardResult<T> = Result<T, DashboardError>;

impl DashboardError {
    /// 일시적인 장애로 볼 수 있는 에러인지 확인합니다.
    ///
    /// 재시도는 하지 않으며 로그 분류에만 사용합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DashboardError::Network(_) | DashboardError::Upstream(_)
        )
    }

    /// 사용자 입력 문제로 인한 에러인지 확인합니다.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DashboardError::InvalidInput(_) | DashboardError::NotFound(_)
        )
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for DashboardError {
    fn from(err: config::ConfigError) -> Self {
        DashboardError::Config(err.to_string())
    }
}
