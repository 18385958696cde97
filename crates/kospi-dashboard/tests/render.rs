//! 렌더링 파이프라인 통합 테스트.

use std::sync::Arc;

use chrono::NaiveDate;
use kospi_core::{DailyBar, DashboardConfig, DashboardError, DateRange, Listing, ListingEntry, Market};
use kospi_dashboard::{
    CandleSection, DashboardContext, DiagnosticLevel, LineSection, MetricCard,
};
use kospi_data::MemorySeriesSource;
use rust_decimal::Decimal;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn range() -> DateRange {
    DateRange::new(date(1), date(31)).unwrap()
}

fn bars(days: impl IntoIterator<Item = u32>, base: i64) -> Vec<DailyBar> {
    days.into_iter()
        .map(|d| {
            let close = Decimal::from(base + d as i64 * 100);
            DailyBar {
                date: date(d),
                open: close,
                high: close + Decimal::from(500),
                low: close - Decimal::from(500),
                close,
                volume: 1_000,
            }
        })
        .collect()
}

/// 종목 12개짜리 목록.
fn listing() -> Listing {
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
    Listing::new(
        Market::Kospi,
        names.iter().enumerate().map(|(i, (code, name))| {
            ListingEntry::new(*code, name, Decimal::from(1_000_000_000_000_i64 * (100 - i as i64)))
        }),
    )
}

fn selection(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_three_valid_one_unknown() {
    let series = MemorySeriesSource::new()
        .with_series("005930", bars(2..=12, 70_000))
        .with_series("000660", bars(2..=12, 130_000))
        .with_series("035720", bars(5..=9, 50_000));
    let ctx = DashboardContext::new(listing(), Arc::new(series), DashboardConfig::default());

    let view = ctx
        .render(&selection(&["삼성전자", "없는회사", "SK하이닉스", "카카오"]), range())
        .await
        .unwrap();

    assert!(!view.is_halted());
    assert_eq!(view.ranking.bars.len(), 10);
    assert_eq!(view.resolutions.len(), 4);
    assert_eq!(view.resolutions[0].echo(), "선택 : 삼성전자 -> 코드 : [005930]");
    assert_eq!(view.resolutions[1].echo(), "선택 : 없는회사 -> 코드 : []");

    let warnings: Vec<_> = view
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("없는회사"));

    assert_eq!(view.metrics.len(), 3);
    assert_eq!(view.candles.len(), 3);

    match view.line.as_ref().unwrap() {
        LineSection::Merged { table } => {
            assert_eq!(table.labels(), vec!["삼성전자", "SK하이닉스", "카카오"]);
            assert_eq!(table.rows.len(), 11);
            let first = &table.rows[0];
            assert_eq!(first.date, date(2));
            assert_eq!(first.values[2], None);
        }
        other => panic!("unexpected line section: {:?}", other),
    }
}

#[tokio::test]
async fn test_single_selection_with_empty_series() {
    let ctx = DashboardContext::new(
        listing(),
        Arc::new(MemorySeriesSource::new()),
        DashboardConfig::default(),
    );

    let view = ctx.render(&selection(&["카카오"]), range()).await.unwrap();

    assert_eq!(
        view.line,
        Some(LineSection::Unavailable {
            message: "데이터를 불러올 수 없습니다.".to_string()
        })
    );
    assert!(matches!(
        &view.candles[0],
        CandleSection::Unavailable { message, .. } if message == "카카오 캔들스틱 차트를 불러올 수 없습니다."
    ));
    assert!(matches!(&view.metrics[0], MetricCard::Insufficient { .. }));
    // 기록 없음은 진단 메시지를 남기지 않음
    assert!(view.diagnostics.is_empty());
}

#[tokio::test]
async fn test_fetch_failure_is_contained() {
    let series = MemorySeriesSource::new()
        .with_series("005930", bars(2..=3, 70_000))
        .with_failure("000660", "timeout");
    let ctx = DashboardContext::new(listing(), Arc::new(series), DashboardConfig::default());

    let view = ctx
        .render(&selection(&["삼성전자", "SK하이닉스"]), range())
        .await
        .unwrap();

    let errors: Vec<_> = view
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("000660 데이터 로드 실패"));

    match view.line.as_ref().unwrap() {
        LineSection::Merged { table } => assert_eq!(table.labels(), vec!["삼성전자"]),
        other => panic!("unexpected line section: {:?}", other),
    }
    match &view.metrics[0] {
        MetricCard::Ready { delta, .. } => assert_eq!(*delta, Decimal::from(100)),
        other => panic!("unexpected card: {:?}", other),
    }
}

#[tokio::test]
async fn test_nothing_resolved_halts() {
    let ctx = DashboardContext::new(
        listing(),
        Arc::new(MemorySeriesSource::new()),
        DashboardConfig::default(),
    );

    for names in [selection(&[]), selection(&["없는회사", "또없는회사"])] {
        let view = ctx.render(&names, range()).await.unwrap();
        assert_eq!(
            view.halted.as_deref(),
            Some("종목 코드를 찾을 수 없습니다. 종목을 다시 선택해주세요.")
        );
        assert!(view.line.is_none());
        assert!(view.metrics.is_empty());
        assert!(view.candles.is_empty());
        // 랭킹은 선택과 무관하게 표시
        assert_eq!(view.ranking.bars.len(), 10);
    }
}

#[tokio::test]
async fn test_too_many_selections_rejected() {
    let settings = DashboardConfig {
        max_selections: 2,
        ..Default::default()
    };
    let ctx = DashboardContext::new(listing(), Arc::new(MemorySeriesSource::new()), settings);

    let err = ctx
        .render(&selection(&["삼성전자", "기아", "카카오"]), range())
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::InvalidInput(_)));
}

#[test]
fn test_date_range_defaults() {
    let ctx = DashboardContext::new(
        listing(),
        Arc::new(MemorySeriesSource::new()),
        DashboardConfig::default(),
    );

    let range = ctx.date_range(None, Some(date(31))).unwrap();
    assert_eq!(range.start, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());

    let range = ctx.date_range(None, None).unwrap();
    assert!(range.end >= NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

    assert!(ctx.date_range(Some(date(10)), Some(date(5))).is_err());
}

#[test]
fn test_view_serializes() {
    let ctx = DashboardContext::new(
        listing(),
        Arc::new(MemorySeriesSource::new()),
        DashboardConfig::default(),
    );
    let json = serde_json::to_value(ctx.ranking()).unwrap();
    assert_eq!(json["title"], "KOSPI 시가총액 TOP10");
    assert_eq!(json["bars"].as_array().unwrap().len(), 10);
    assert_eq!(json["bars"][9]["label"], "100.0조");
}
