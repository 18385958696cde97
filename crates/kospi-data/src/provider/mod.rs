//! 데이터 Provider 모듈.
//!
//! ## 종목 목록
//! - `ListingSource`: 시장 전체 종목 목록 (종목코드, 종목명, 시가총액)
//! - `KrxClient`: KRX 정보데이터시스템 전종목 시세 (MDCSTAT01501)
//!
//! ## 일봉 시계열
//! - `SeriesSource`: 종목별 일봉 OHLC
//! - `NaverChartClient`: 네이버 차트 API (`siseJson.naver`, 기본값)
//! - `KrxClient`: KRX 정보데이터시스템 개별종목 시세 (MDCSTAT01701)

pub mod krx;
pub mod memory;
pub mod naver;

pub use krx::KrxClient;
pub use memory::{MemoryListingSource, MemorySeriesSource};
pub use naver::NaverChartClient;

use std::sync::Arc;

use async_trait::async_trait;
use kospi_core::{DailyBar, DataConfig, DateRange, Listing, ListingEntry, Market, SeriesSourceKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// 외부 소스에서 받은 정규화 전 종목 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    /// 단축코드
    pub code: String,
    /// 종목명 (원본 그대로)
    pub name: String,
    /// 시가총액 (원)
    pub market_cap: Decimal,
    /// 소속 시장명 (예: KOSPI)
    #[serde(default)]
    pub market_name: Option<String>,
    /// 종가
    #[serde(default)]
    pub close: Option<Decimal>,
}

/// 종목 목록 Provider trait.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 시장 전체 종목 목록 조회.
    async fn fetch_listing(&self, market: Market) -> Result<Vec<RawListing>>;
}

/// 일봉 시계열 Provider trait.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 기간(양 끝 포함) 동안의 일봉 조회.
    ///
    /// 거래 기록이 없으면 빈 벡터를 반환합니다.
    async fn fetch_daily(&self, code: &str, range: DateRange) -> Result<Vec<DailyBar>>;
}

/// 종목 목록을 가져와 정규화된 [`Listing`]으로 만듭니다.
///
/// 세션 시작 시 한 번 호출됩니다.
pub async fn load_listing(source: &dyn ListingSource, market: Market) -> Result<Listing> {
    let raw = source.fetch_listing(market).await?;
    let fetched = raw.len();

    let listing = Listing::new(
        market,
        raw.into_iter()
            .map(|r| ListingEntry::new(r.code, &r.name, r.market_cap)),
    );

    tracing::info!(
        source = source.name(),
        market = %market,
        fetched,
        entries = listing.len(),
        "종목 목록 로드 완료"
    );
    Ok(listing)
}

/// 설정에 따른 종목 목록 소스.
pub fn build_listing_source(config: &DataConfig) -> Result<Arc<dyn ListingSource>> {
    Ok(Arc::new(KrxClient::from_config(config)?))
}

/// 설정에 따른 일봉 시계열 소스.
pub fn build_series_source(config: &DataConfig) -> Result<Arc<dyn SeriesSource>> {
    let source: Arc<dyn SeriesSource> = match config.series_source {
        SeriesSourceKind::Naver => Arc::new(NaverChartClient::from_config(config)?),
        SeriesSourceKind::Krx => Arc::new(KrxClient::from_config(config)?),
    };
    tracing::debug!(source = source.name(), "시계열 소스 선택");
    Ok(source)
}
