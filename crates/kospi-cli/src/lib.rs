//! KOSPI 대시보드 터미널 도구.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 시가총액 랭킹 출력
//! - 종목 검색
//! - 선택 종목의 지표, 종가, 캔들스틱 출력 (표 또는 JSON)

pub mod commands;

pub use commands::*;
