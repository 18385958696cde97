//! 종목별 일봉 조회.
//!
//! 소스 에러는 여기서 흡수됩니다. 호출자는 항상 [`FetchOutcome`]을 받고
//! 실패 내용은 [`Diagnostics`]로 전달됩니다. 재시도는 하지 않습니다.

use std::sync::Arc;

use kospi_core::{DashboardError, DateRange, PriceSeries};
use kospi_data::SeriesSource;

use crate::diagnostics::Diagnostics;
use crate::resolver::StockPair;

/// 조회 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 일봉이 한 개 이상 있음
    Data(PriceSeries),
    /// 기간 내 기록이 없거나 조회에 실패함
    Empty,
}

impl FetchOutcome {
    pub fn series(&self) -> Option<&PriceSeries> {
        match self {
            FetchOutcome::Data(series) => Some(series),
            FetchOutcome::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FetchOutcome::Empty)
    }
}

/// 종목과 조회 결과 한 쌍.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedSeries {
    pub pair: StockPair,
    pub outcome: FetchOutcome,
}

/// 일봉 조회기.
#[derive(Clone)]
pub struct SeriesFetcher {
    source: Arc<dyn SeriesSource>,
}

impl SeriesFetcher {
    pub fn new(source: Arc<dyn SeriesSource>) -> Self {
        Self { source }
    }

    /// 사용 중인 소스 이름.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// 한 종목의 일봉을 조회합니다.
    pub async fn fetch(&self, code: &str, range: DateRange, diags: &mut Diagnostics) -> FetchOutcome {
        match self.source.fetch_daily(code, range).await {
            Ok(bars) if bars.is_empty() => {
                tracing::debug!(code, "기간 내 일봉 없음");
                FetchOutcome::Empty
            }
            Ok(bars) => FetchOutcome::Data(PriceSeries::new(code, bars)),
            Err(e) => {
                let err = DashboardError::from(e);
                tracing::debug!(code, retryable = err.is_retryable(), "일봉 조회 실패");
                diags.error(format!("{} 데이터 로드 실패: {}", code, err));
                FetchOutcome::Empty
            }
        }
    }

    /// 여러 종목을 순서대로 하나씩 조회합니다.
    pub async fn fetch_all(
        &self,
        pairs: &[StockPair],
        range: DateRange,
        diags: &mut Diagnostics,
    ) -> Vec<FetchedSeries> {
        let mut fetched = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let outcome = self.fetch(&pair.code, range, diags).await;
            fetched.push(FetchedSeries {
                pair: pair.clone(),
                outcome,
            });
        }
        fetched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticLevel;
    use chrono::NaiveDate;
    use kospi_core::DailyBar;
    use kospi_data::MemorySeriesSource;
    use rust_decimal::Decimal;

    fn bar(day: u32) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: Decimal::ONE,
            high: Decimal::ONE,
            low: Decimal::ONE,
            close: Decimal::from(day),
            volume: 0,
        }
    }

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_outcomes() {
        let source = MemorySeriesSource::new()
            .with_series("A", vec![bar(3), bar(2)])
            .with_failure("B", "connection reset");
        let fetcher = SeriesFetcher::new(Arc::new(source));
        let mut diags = Diagnostics::new();

        let a = fetcher.fetch("A", range(), &mut diags).await;
        assert_eq!(a.series().unwrap().len(), 2);
        assert!(diags.is_empty());

        // 기록 없음: 진단 없이 Empty
        assert!(fetcher.fetch("C", range(), &mut diags).await.is_empty());
        assert!(diags.is_empty());

        // 실패: Empty + 에러 진단
        assert!(fetcher.fetch("B", range(), &mut diags).await.is_empty());
        assert_eq!(diags.count(DiagnosticLevel::Error), 1);
        assert!(diags.items()[0].message.starts_with("B 데이터 로드 실패: "));
        assert!(diags.items()[0].message.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_pairs() {
        let source = MemorySeriesSource::new().with_series("A", vec![bar(1)]);
        let fetcher = SeriesFetcher::new(Arc::new(source));
        let mut diags = Diagnostics::new();
        let pairs = vec![
            StockPair { code: "Z".into(), name: "제트".into() },
            StockPair { code: "A".into(), name: "에이".into() },
        ];

        let fetched = fetcher.fetch_all(&pairs, range(), &mut diags).await;
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0].pair.name, "제트");
        assert!(fetched[0].outcome.is_empty());
        assert_eq!(fetched[1].pair.name, "에이");
        assert!(!fetched[1].outcome.is_empty());
    }
}
