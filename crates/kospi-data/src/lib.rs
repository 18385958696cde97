//! 시장 데이터 소스.
//!
//! 이 crate는 다음을 제공합니다:
//! - 종목 목록 / 일봉 시계열 소스 트레이트
//! - KRX 정보데이터시스템 클라이언트 (종목 목록, 개별종목 시세)
//! - 네이버 차트 API 클라이언트 (일봉 시세)
//! - 메모리 기반 소스 (테스트, 오프라인 데모)

pub mod error;
pub mod provider;

pub use error::{DataError, Result};
pub use provider::{
    build_listing_source, build_series_source, load_listing, KrxClient, ListingSource,
    MemoryListingSource, MemorySeriesSource, NaverChartClient, RawListing, SeriesSource,
};
