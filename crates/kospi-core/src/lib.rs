//! # KOSPI Core
//!
//! KOSPI 대시보드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 대시보드 전반에서 사용되는 기본 타입을 제공합니다:
//! - 종목 목록(Listing)과 종목명 정규화
//! - 일봉 시계열 및 조회 기간
//! - 시장 구분 (KOSPI/KOSDAQ)
//! - 금액 표시 형식
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;
