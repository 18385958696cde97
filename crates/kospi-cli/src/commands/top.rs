//! 시가총액 랭킹 출력.

use kospi_dashboard::RankingChart;
use rust_decimal::prelude::ToPrimitive;

use super::format::{pad_left, pad_right};

/// 막대 최대 길이 (칸).
const BAR_WIDTH: usize = 30;

/// 랭킹 차트를 가로 막대 표로 그립니다.
///
/// 차트 데이터는 오름차순이므로 가장 큰 종목이 맨 위에 오도록 뒤집어 출력합니다.
pub fn render_ranking(chart: &RankingChart) -> String {
    let mut out = format!("{}\n", chart.title);
    if chart.bars.is_empty() {
        out.push_str("  (종목 없음)\n");
        return out;
    }

    let max = chart
        .bars
        .iter()
        .filter_map(|b| b.scaled.to_f64())
        .fold(0.0_f64, f64::max);
    let name_width = chart
        .bars
        .iter()
        .map(|b| super::format::display_width(&b.name))
        .max()
        .unwrap_or(0);

    for (rank, bar) in chart.bars.iter().rev().enumerate() {
        let len = match bar.scaled.to_f64() {
            Some(v) if max > 0.0 => ((v / max) * BAR_WIDTH as f64).round() as usize,
            _ => 0,
        };
        out.push_str(&format!(
            "{:>3}. {} {} {} {}\n",
            rank + 1,
            pad_right(&bar.name, name_width),
            bar.code,
            pad_left(&bar.label, 9),
            "█".repeat(len),
        ));
    }
    out.push_str(&format!("  x: {} / y: {}\n", chart.x_title, chart.y_title));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kospi_core::{DashboardConfig, Listing, ListingEntry, Market};
    use rust_decimal::Decimal;

    fn listing() -> Listing {
        Listing::new(
            Market::Kospi,
            vec![
                ListingEntry::new("000660", "SK하이닉스", Decimal::from(150_000_000_000_000_i64)),
                ListingEntry::new("005930", "삼성전자", Decimal::from(400_000_000_000_000_i64)),
                ListingEntry::new("035720", "카카오", Decimal::from(20_000_000_000_000_i64)),
            ],
        )
    }

    #[test]
    fn test_largest_first() {
        let chart = RankingChart::build(&listing(), &DashboardConfig::default());
        let text = render_ranking(&chart);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "KOSPI 시가총액 TOP10");
        assert!(lines[1].contains("1. 삼성전자"));
        assert!(lines[1].contains("400.0조"));
        assert!(lines[1].ends_with(&"█".repeat(BAR_WIDTH)));
        assert!(lines[3].contains("3. 카카오"));
        assert!(lines[4].contains("시가총액 (조)"));
    }

    #[test]
    fn test_empty_listing() {
        let chart = RankingChart::build(
            &Listing::new(Market::Kospi, Vec::new()),
            &DashboardConfig::default(),
        );
        assert!(render_ranking(&chart).contains("종목 없음"));
    }
}
