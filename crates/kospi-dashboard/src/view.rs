//! 한 번의 렌더링 결과.

use kospi_core::DateRange;
use serde::Serialize;

use crate::aggregator::{CandleSection, LineSection};
use crate::diagnostics::Diagnostic;
use crate::metrics::MetricCard;
use crate::ranking::RankingChart;
use crate::resolver::Resolution;

/// 페이지 제목.
pub const PAGE_TITLE: &str = "KOSPI 주식 차트 대시보드";

/// 라인 차트 탭 이름.
pub const LINE_TAB: &str = "라인 차트";

/// 캔들스틱 차트 탭 이름.
pub const CANDLE_TAB: &str = "캔들스틱 차트";

/// 대시보드 화면 전체.
///
/// 해석된 종목이 없으면 `halted`에 안내 문구가 들어가고 지표와 차트
/// 섹션은 비어 있습니다.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub range: DateRange,
    pub ranking: RankingChart,
    /// 선택마다 한 줄
    pub resolutions: Vec<Resolution>,
    pub halted: Option<String>,
    pub metrics: Vec<MetricCard>,
    pub line: Option<LineSection>,
    pub candles: Vec<CandleSection>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DashboardView {
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// 탭 이름 (라인, 캔들스틱).
    pub fn tabs(&self) -> [&'static str; 2] {
        [LINE_TAB, CANDLE_TAB]
    }
}
