//! 메모리 기반 데이터 소스.
//!
//! 네트워크 없이 파이프라인을 돌려볼 때 사용합니다.

use std::collections::HashMap;

use async_trait::async_trait;
use kospi_core::{DailyBar, DateRange, Market};

use super::{ListingSource, RawListing, SeriesSource};
use crate::error::{DataError, Result};

/// 고정된 종목 목록을 돌려주는 소스.
#[derive(Debug, Clone, Default)]
pub struct MemoryListingSource {
    entries: Vec<RawListing>,
}

impl MemoryListingSource {
    pub fn new(entries: Vec<RawListing>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl ListingSource for MemoryListingSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_listing(&self, _market: Market) -> Result<Vec<RawListing>> {
        Ok(self.entries.clone())
    }
}

/// 종목별로 미리 넣어 둔 일봉을 기간으로 잘라 돌려주는 소스.
///
/// 등록되지 않은 종목은 빈 시계열, [`MemorySeriesSource::with_failure`]로
/// 지정한 종목은 에러를 돌려줍니다.
#[derive(Debug, Clone, Default)]
pub struct MemorySeriesSource {
    series: HashMap<String, Vec<DailyBar>>,
    failures: HashMap<String, String>,
}

impl MemorySeriesSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 종목의 일봉 등록.
    pub fn with_series(mut self, code: impl Into<String>, bars: Vec<DailyBar>) -> Self {
        self.series.insert(code.into(), bars);
        self
    }

    /// 조회 시 실패할 종목 등록.
    pub fn with_failure(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(code.into(), message.into());
        self
    }
}

#[async_trait]
impl SeriesSource for MemorySeriesSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_daily(&self, code: &str, range: DateRange) -> Result<Vec<DailyBar>> {
        if let Some(message) = self.failures.get(code) {
            return Err(DataError::FetchError(message.clone()));
        }

        let mut bars: Vec<DailyBar> = self
            .series
            .get(code)
            .map(|bars| {
                bars.iter()
                    .filter(|b| range.contains(b.date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn bar(day: u32) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: Decimal::ONE,
            high: Decimal::ONE,
            low: Decimal::ONE,
            close: Decimal::ONE,
            volume: 0,
        }
    }

    #[tokio::test]
    async fn test_memory_series_filters_range() {
        let source = MemorySeriesSource::new()
            .with_series("A", vec![bar(5), bar(1), bar(10)])
            .with_failure("B", "boom");

        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .unwrap();

        let bars = source.fetch_daily("A", range).await.unwrap();
        assert_eq!(bars.len(), 2);
        assert!(bars[0].date < bars[1].date);

        assert!(source.fetch_daily("Z", range).await.unwrap().is_empty());
        assert!(source.fetch_daily("B", range).await.is_err());
    }
}
