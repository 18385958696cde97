//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! 대시보드 컨텍스트는 서버 시작 시 한 번 만들어지고 이후 읽기 전용이므로
//! 잠금 없이 `Arc`로 공유됩니다.

use std::sync::Arc;

use kospi_dashboard::DashboardContext;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 종목 목록, 일봉 소스, 표시 설정
    pub dashboard: Arc<DashboardContext>,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    pub fn new(dashboard: DashboardContext) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}

/// 테스트용 상태.
///
/// 종목 12개와 그중 세 종목(삼성전자, SK하이닉스, 카카오)의 2024년 1월
/// 일봉을 가진 메모리 소스를 사용합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use chrono::NaiveDate;
    use kospi_core::{DailyBar, DashboardConfig, Listing, ListingEntry, Market};
    use kospi_data::MemorySeriesSource;

    let names = [
        ("005930", "삼성전자"),
        ("000660", "SK하이닉스"),
        ("373220", "LG에너지솔루션"),
        ("207940", "삼성바이오로직스"),
        ("005380", "현대차"),
        ("000270", "기아"),
        ("068270", "셀트리온"),
        ("005490", "POSCO홀딩스"),
        ("035420", "NAVER"),
        ("051910", "LG화학"),
        ("035720", "카카오"),
        ("105560", "KB금융"),
    ];
    let listing = Listing::new(
        Market::Kospi,
        names.iter().enumerate().map(|(i, (code, name))| {
            let cap = 1_000_000_000_000_i64 * (100 - i as i64);
            ListingEntry::new(*code, name, cap.into())
        }),
    );

    let bars = |base: i64, days: std::ops::RangeInclusive<u32>| -> Vec<DailyBar> {
        days.filter_map(|d| {
            let close = base + i64::from(d) * 100;
            Some(DailyBar {
                date: NaiveDate::from_ymd_opt(2024, 1, d)?,
                open: close.into(),
                high: (close + 500).into(),
                low: (close - 500).into(),
                close: close.into(),
                volume: 1_000,
            })
        })
        .collect()
    };

    let series = MemorySeriesSource::new()
        .with_series("005930", bars(70_000, 2..=12))
        .with_series("000660", bars(130_000, 2..=12))
        .with_series("035720", bars(50_000, 5..=9))
        .with_failure("005380", "upstream timeout");

    AppState::new(DashboardContext::new(
        listing,
        Arc::new(series),
        DashboardConfig::default(),
    ))
}
