//! # KOSPI Dashboard
//!
//! 종목 선택부터 차트 데이터까지의 렌더링 파이프라인.
//!
//! 한 번의 렌더링은 다음 순서로 진행됩니다:
//! 1. 시가총액 랭킹 ([`ranking`])
//! 2. 선택한 종목명 → 종목코드 ([`resolver`])
//! 3. 종목별 일봉 조회 ([`fetcher`])
//! 4. 지표, 라인 차트, 캔들스틱 차트 구성 ([`aggregator`], [`metrics`])
//!
//! 실패는 대부분 [`Diagnostics`]와 각 섹션의 경고로 흡수되며 렌더링은
//! 항상 [`DashboardView`]를 돌려줍니다.

pub mod aggregator;
pub mod context;
pub mod diagnostics;
pub mod fetcher;
pub mod metrics;
pub mod ranking;
pub mod resolver;
pub mod view;

pub use aggregator::{
    candle_sections, collect_close, line_section, merge_close, AggregateError, CandleSection,
    LineSection, MergedRow, MergedTable,
};
pub use context::DashboardContext;
pub use diagnostics::{Diagnostic, DiagnosticLevel, Diagnostics};
pub use fetcher::{FetchOutcome, FetchedSeries, SeriesFetcher};
pub use metrics::{metric_cards, MetricCard};
pub use ranking::{top_by_market_cap, RankingBar, RankingChart};
pub use resolver::{resolve_selection, Resolution, ResolvedSelection, StockPair};
pub use view::{DashboardView, PAGE_TITLE};
