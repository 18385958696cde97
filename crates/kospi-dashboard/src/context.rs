//! 세션 컨텍스트와 렌더링.

use std::sync::Arc;

use chrono::NaiveDate;
use kospi_core::{AppConfig, DashboardConfig, DashboardResult, DateRange, Listing};
use kospi_data::{load_listing, ListingSource, SeriesSource};
use tracing::Instrument;

use crate::aggregator::{candle_sections, line_section};
use crate::diagnostics::Diagnostics;
use crate::fetcher::SeriesFetcher;
use crate::metrics::metric_cards;
use crate::ranking::RankingChart;
use crate::resolver::{resolve_selection, validate_selection, HALT_MESSAGE};
use crate::view::{DashboardView, PAGE_TITLE};

/// 세션 동안 바뀌지 않는 대시보드 상태.
///
/// 종목 목록은 생성 시 한 번만 로드되고 이후 읽기 전용입니다.
/// 여러 요청이 `Arc`로 공유해도 잠금이 필요 없습니다.
#[derive(Clone)]
pub struct DashboardContext {
    listing: Arc<Listing>,
    fetcher: SeriesFetcher,
    settings: DashboardConfig,
}

impl DashboardContext {
    pub fn new(listing: Listing, series: Arc<dyn SeriesSource>, settings: DashboardConfig) -> Self {
        Self {
            listing: Arc::new(listing),
            fetcher: SeriesFetcher::new(series),
            settings,
        }
    }

    /// 목록 소스에서 종목 목록을 받아 컨텍스트를 만듭니다.
    pub async fn load(
        listing_source: &dyn ListingSource,
        series: Arc<dyn SeriesSource>,
        config: &AppConfig,
    ) -> DashboardResult<Self> {
        let listing = load_listing(listing_source, config.data.market).await?;
        Ok(Self::new(listing, series, config.dashboard.clone()))
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn settings(&self) -> &DashboardConfig {
        &self.settings
    }

    /// 일봉 소스 이름.
    pub fn series_source_name(&self) -> &str {
        self.fetcher.source_name()
    }

    /// 시가총액 랭킹 차트.
    pub fn ranking(&self) -> RankingChart {
        RankingChart::build(&self.listing, &self.settings)
    }

    /// 조회 기간. 비어 있는 쪽은 기본값(시작일 설정값, 오늘)을 사용합니다.
    pub fn date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> DashboardResult<DateRange> {
        let start = start.unwrap_or(self.settings.default_start);
        let end = match end {
            Some(end) => end,
            None => self.settings.today()?,
        };
        DateRange::new(start, end)
    }

    /// 선택과 기간으로 대시보드를 한 번 렌더링합니다.
    ///
    /// 종목마다 한 번씩 순서대로 조회하고, 그 결과를 지표와 두 차트 탭이
    /// 함께 사용합니다. 선택 개수가 설정을 넘으면 에러입니다.
    pub async fn render(&self, selection: &[String], range: DateRange) -> DashboardResult<DashboardView> {
        validate_selection(selection, self.settings.max_selections)?;

        let span = kospi_core::render_span!("render", selection.len(), range.start, range.end);
        Ok(self.render_pass(selection, range).instrument(span).await)
    }

    async fn render_pass(&self, selection: &[String], range: DateRange) -> DashboardView {
        let mut diags = Diagnostics::new();
        let resolved = resolve_selection(&self.listing, selection, &mut diags);

        let mut view = DashboardView {
            title: PAGE_TITLE.to_string(),
            range,
            ranking: self.ranking(),
            resolutions: resolved.resolutions.clone(),
            halted: None,
            metrics: Vec::new(),
            line: None,
            candles: Vec::new(),
            diagnostics: Vec::new(),
        };

        if resolved.is_empty() {
            tracing::info!(
                selected = selection.len(),
                unmatched = resolved.unmatched().count(),
                "해석된 종목 없음, 렌더링 중단"
            );
            view.halted = Some(HALT_MESSAGE.to_string());
            view.diagnostics = diags.into_vec();
            return view;
        }

        let fetched = self.fetcher.fetch_all(&resolved.pairs, range, &mut diags).await;

        view.metrics = metric_cards(&fetched);
        view.line = Some(line_section(&fetched));
        view.candles = candle_sections(&fetched);
        view.diagnostics = diags.into_vec();

        tracing::info!(
            resolved = resolved.pairs.len(),
            with_data = fetched.iter().filter(|f| !f.outcome.is_empty()).count(),
            diagnostics = view.diagnostics.len(),
            "렌더링 완료"
        );
        view
    }
}
