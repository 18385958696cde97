//! 대시보드 렌더링 결과 출력.

use anyhow::Result;
use kospi_core::DecimalExt;
use kospi_dashboard::{CandleSection, DashboardView, DiagnosticLevel, LineSection, MetricCard};
use rust_decimal::Decimal;

use super::format::{display_width, pad_left, pad_right, OutputFormat};
use super::top::render_ranking;

/// 표 출력 설정.
#[derive(Debug, Clone, Copy)]
pub struct ShowConfig {
    /// 출력 형식
    pub format: OutputFormat,
    /// 차트 표마다 보여줄 최근 행 수 (0 = 전체)
    pub rows: usize,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            rows: 20,
        }
    }
}

/// 렌더링 결과를 설정된 형식으로 그립니다.
pub fn render_view(view: &DashboardView, config: &ShowConfig) -> Result<String> {
    match config.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)? + "\n"),
        OutputFormat::Table => Ok(render_table(view, config.rows)),
    }
}

fn render_table(view: &DashboardView, rows: usize) -> String {
    let mut out = format!("# {}\n\n", view.title);
    out.push_str(&render_ranking(&view.ranking));
    out.push('\n');

    out.push_str(&format!(
        "기간: {} ~ {}\n",
        view.range.start.format("%Y-%m-%d"),
        view.range.end.format("%Y-%m-%d")
    ));
    for resolution in &view.resolutions {
        out.push_str(&resolution.echo());
        out.push('\n');
    }

    if let Some(message) = &view.halted {
        out.push_str(&format!("\n{}\n", message));
        render_diagnostics(view, &mut out);
        return out;
    }

    out.push_str("\n## 지표\n");
    for card in &view.metrics {
        match card {
            MetricCard::Ready {
                pair,
                value_text,
                delta_text,
                ..
            } => out.push_str(&format!(
                "{}  {}  ({})\n",
                pad_right(&pair.name, 16),
                pad_left(value_text, 12),
                delta_text
            )),
            MetricCard::Insufficient { message, .. } => {
                out.push_str(&format!("[경고] {}\n", message))
            }
        }
    }

    let [line_tab, candle_tab] = view.tabs();
    out.push_str(&format!("\n## {}\n", line_tab));
    match &view.line {
        Some(LineSection::Single { pair, points }) => {
            let header = vec![pair.name.clone()];
            let body: Vec<_> = points
                .iter()
                .map(|(date, close)| (date.format("%Y-%m-%d").to_string(), vec![cell(Some(*close))]))
                .collect();
            render_grid(&header, tail(&body, rows), &mut out);
        }
        Some(LineSection::Merged { table }) => {
            let header: Vec<String> = table.labels().into_iter().map(str::to_string).collect();
            let body: Vec<_> = table
                .rows
                .iter()
                .map(|row| {
                    (
                        row.date.format("%Y-%m-%d").to_string(),
                        row.values.iter().map(|v| cell(*v)).collect(),
                    )
                })
                .collect();
            render_grid(&header, tail(&body, rows), &mut out);
        }
        Some(LineSection::Unavailable { message }) => {
            out.push_str(&format!("[경고] {}\n", message))
        }
        None => {}
    }

    out.push_str(&format!("\n## {}\n", candle_tab));
    for section in &view.candles {
        match section {
            CandleSection::Chart { title, bars, .. } => {
                out.push_str(&format!("### {}\n", title));
                let header: Vec<String> = ["시가", "고가", "저가", "종가", "거래량"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                let body: Vec<_> = bars
                    .iter()
                    .map(|b| {
                        (
                            b.date.format("%Y-%m-%d").to_string(),
                            vec![
                                cell(Some(b.open)),
                                cell(Some(b.high)),
                                cell(Some(b.low)),
                                cell(Some(b.close)),
                                cell(Some(Decimal::from(b.volume))),
                            ],
                        )
                    })
                    .collect();
                render_grid(&header, tail(&body, rows), &mut out);
            }
            CandleSection::Unavailable { message, .. } => {
                out.push_str(&format!("[경고] {}\n", message))
            }
        }
    }

    render_diagnostics(view, &mut out);
    out
}

fn render_diagnostics(view: &DashboardView, out: &mut String) {
    if view.diagnostics.is_empty() {
        return;
    }
    out.push_str("\n## 알림\n");
    for diag in &view.diagnostics {
        let tag = match diag.level {
            DiagnosticLevel::Info => "정보",
            DiagnosticLevel::Warning => "경고",
            DiagnosticLevel::Error => "에러",
        };
        out.push_str(&format!("[{}] {}\n", tag, diag.message));
    }
}

fn cell(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_grouped_string())
}

fn tail<T>(rows: &[T], n: usize) -> &[T] {
    if n == 0 || rows.len() <= n {
        rows
    } else {
        &rows[rows.len() - n..]
    }
}

/// 날짜 열과 값 열로 이뤄진 표.
fn render_grid(header: &[String], body: &[(String, Vec<String>)], out: &mut String) {
    let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
    for (_, values) in body {
        for (w, v) in widths.iter_mut().zip(values) {
            *w = (*w).max(display_width(v));
        }
    }

    out.push_str(&pad_right("날짜", 10));
    for (h, w) in header.iter().zip(&widths) {
        out.push_str("  ");
        out.push_str(&pad_left(h, *w));
    }
    out.push('\n');

    for (date, values) in body {
        out.push_str(&pad_right(date, 10));
        for (v, w) in values.iter().zip(&widths) {
            out.push_str("  ");
            out.push_str(&pad_left(v, *w));
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kospi_core::{DailyBar, DashboardConfig, DateRange, Listing, ListingEntry, Market};
    use kospi_dashboard::DashboardContext;
    use kospi_data::MemorySeriesSource;
    use std::sync::Arc;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn bars(days: impl IntoIterator<Item = u32>, base: i64) -> Vec<DailyBar> {
        days.into_iter()
            .map(|d| {
                let close = Decimal::from(base + d as i64 * 100);
                DailyBar {
                    date: date(d),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 12_345,
                }
            })
            .collect()
    }

    fn context() -> DashboardContext {
        let listing = Listing::new(
            Market::Kospi,
            vec![
                ListingEntry::new("005930", "삼성전자", Decimal::from(400_000_000_000_000_i64)),
                ListingEntry::new("000660", "SK하이닉스", Decimal::from(150_000_000_000_000_i64)),
                ListingEntry::new("035720", "카카오", Decimal::from(20_000_000_000_000_i64)),
            ],
        );
        let series = MemorySeriesSource::new()
            .with_series("005930", bars(4..=8, 70_000))
            .with_series("000660", bars(6..=8, 150_000))
            .with_series("035720", bars([8], 40_000));
        DashboardContext::new(listing, Arc::new(series), DashboardConfig::default())
    }

    async fn render(names: &[&str]) -> DashboardView {
        let selection: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        let range = DateRange::new(date(1), date(31)).unwrap();
        context().render(&selection, range).await.unwrap()
    }

    #[tokio::test]
    async fn test_table_merged() {
        let view = render(&["삼성전자", "SK하이닉스", "카카오"]).await;
        let text = render_view(&view, &ShowConfig::default()).unwrap();

        assert!(text.starts_with("# KOSPI 주식 차트 대시보드"));
        assert!(text.contains("기간: 2024-03-01 ~ 2024-03-31"));
        assert!(text.contains("선택 : 삼성전자 -> 코드 : [005930]"));
        assert!(text.contains("70,800원"));
        assert!(text.contains("(100원)"));
        assert!(text.contains("[경고] 카카오 데이터가 충분하지 않습니다."));
        assert!(text.contains("## 라인 차트"));
        assert!(text.contains("### SK하이닉스 캔들스틱 차트"));
        // 삼성전자만 있는 날짜는 다른 열이 비어 있음
        let row = text
            .lines()
            .find(|l| l.starts_with("2024-03-04"))
            .unwrap();
        assert!(row.contains("70,400"));
        assert!(row.trim_end().ends_with('-'));
    }

    #[tokio::test]
    async fn test_table_row_limit() {
        let view = render(&["삼성전자"]).await;
        let config = ShowConfig {
            rows: 2,
            ..Default::default()
        };
        let text = render_view(&view, &config).unwrap();
        // 라인 차트 2행 + 캔들 2행
        assert_eq!(text.lines().filter(|l| l.starts_with("2024-03-")).count(), 4);
        assert!(!text.contains("2024-03-06"));
    }

    #[tokio::test]
    async fn test_table_halted() {
        let view = render(&["없는회사"]).await;
        let text = render_view(&view, &ShowConfig::default()).unwrap();

        assert!(text.contains("종목 코드를 찾을 수 없습니다. 종목을 다시 선택해주세요."));
        assert!(text.contains("[경고] '없는회사' 종목을 목록에서 찾을 수 없습니다."));
        assert!(!text.contains("## 지표"));
    }

    #[tokio::test]
    async fn test_json_output() {
        let view = render(&["카카오"]).await;
        let config = ShowConfig {
            format: OutputFormat::Json,
            rows: 0,
        };
        let text = render_view(&view, &config).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["line"]["kind"], "single");
        assert_eq!(json["metrics"][0]["kind"], "insufficient");
    }
}
