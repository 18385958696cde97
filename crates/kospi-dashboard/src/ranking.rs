//! 시가총액 랭킹.

use std::cmp::Ordering;

use kospi_core::{format_cap, scale_cap, DashboardConfig, Listing, ListingEntry, Market};
use rust_decimal::Decimal;
use serde::Serialize;

/// 가로 막대 차트의 막대 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingBar {
    pub code: String,
    pub name: String,
    /// 시가총액 (원)
    pub market_cap: Decimal,
    /// 표시 단위로 나눈 값
    pub scaled: Decimal,
    /// 막대 라벨 (예: "412.3조")
    pub label: String,
}

/// 시가총액 랭킹 차트.
#[derive(Debug, Clone, Serialize)]
pub struct RankingChart {
    pub title: String,
    /// x축 제목 (시가총액)
    pub x_title: String,
    /// y축 제목 (종목명)
    pub y_title: String,
    /// 시가총액 오름차순
    pub bars: Vec<RankingBar>,
}

impl RankingChart {
    /// 목록에서 랭킹 차트를 만듭니다.
    pub fn build(listing: &Listing, settings: &DashboardConfig) -> Self {
        let bars = top_by_market_cap(listing.entries(), settings.top_n)
            .into_iter()
            .map(|e| RankingBar {
                code: e.code.clone(),
                name: e.name.clone(),
                market_cap: e.market_cap,
                scaled: scale_cap(e.market_cap, settings.cap_divisor),
                label: format_cap(e.market_cap, settings.cap_divisor, &settings.cap_unit),
            })
            .collect();

        Self {
            title: ranking_title(listing.market(), settings.top_n),
            x_title: format!("시가총액 ({})", settings.cap_unit),
            y_title: "종목명".to_string(),
            bars,
        }
    }
}

/// 랭킹 차트 제목 (예: "KOSPI 시가총액 TOP10").
fn ranking_title(market: Market, top_n: usize) -> String {
    format!("{} 시가총액 TOP{}", market, top_n)
}

/// 시가총액 상위 `n`개를 오름차순으로 반환합니다.
///
/// 시가총액이 같으면 종목코드가 작은 쪽이 상위입니다.
/// 항목이 `n`개보다 적으면 전부 반환합니다.
pub fn top_by_market_cap(entries: &[ListingEntry], n: usize) -> Vec<&ListingEntry> {
    let mut ranked: Vec<&ListingEntry> = entries.iter().collect();
    ranked.sort_by(|a, b| rank_order(a, b));
    ranked.truncate(n);
    ranked.reverse();
    ranked
}

/// 상위 순서 (시가총액 내림차순, 종목코드 오름차순).
fn rank_order(a: &ListingEntry, b: &ListingEntry) -> Ordering {
    b.market_cap
        .cmp(&a.market_cap)
        .then_with(|| a.code.cmp(&b.code))
}
