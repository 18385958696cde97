//! 종목 검색 출력.

use kospi_core::{format_cap, DashboardConfig, ListingEntry};

use super::format::{display_width, pad_left, pad_right};

/// 검색 결과를 표로 그립니다.
pub fn render_search(entries: &[&ListingEntry], settings: &DashboardConfig) -> String {
    if entries.is_empty() {
        return "검색 결과가 없습니다.\n".to_string();
    }

    let name_width = entries
        .iter()
        .map(|e| display_width(&e.name))
        .max()
        .unwrap_or(0)
        .max(display_width("종목명"));

    let mut out = format!(
        "{}  {}  {}\n",
        pad_right("종목코드", 8),
        pad_right("종목명", name_width),
        pad_left("시가총액", 10),
    );
    for entry in entries {
        out.push_str(&format!(
            "{}  {}  {}\n",
            pad_right(&entry.code, 8),
            pad_right(&entry.name, name_width),
            pad_left(
                &format_cap(entry.market_cap, settings.cap_divisor, &settings.cap_unit),
                10
            ),
        ));
    }
    out.push_str(&format!("총 {}건\n", entries.len()));
    out
}
