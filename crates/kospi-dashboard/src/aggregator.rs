//! 시계열 병합과 차트 섹션 구성.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use kospi_core::{DailyBar, DateRange};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::diagnostics::Diagnostics;
use crate::fetcher::{FetchedSeries, SeriesFetcher};
use crate::resolver::StockPair;

/// 종목이 하나일 때 데이터가 없으면 보여주는 메시지.
pub const SINGLE_UNAVAILABLE: &str = "데이터를 불러올 수 없습니다.";

/// 여러 종목을 병합할 데이터가 없으면 보여주는 메시지.
pub const MERGED_UNAVAILABLE: &str = "선택한 종목의 데이터를 불러올 수 없습니다.";

/// 병합 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// 데이터가 있는 종목이 하나도 없음
    #[error("병합할 데이터가 없습니다")]
    NoData,
}

/// 날짜 하나의 종가 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedRow {
    pub date: NaiveDate,
    /// `columns`와 같은 순서. 해당 날짜에 기록이 없으면 `None`.
    pub values: Vec<Option<Decimal>>,
}

/// 날짜 기준으로 외부 조인한 종가 표.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedTable {
    /// 데이터가 있는 종목 (선택 순서)
    pub columns: Vec<StockPair>,
    /// 날짜 오름차순
    pub rows: Vec<MergedRow>,
}

impl MergedTable {
    /// 열 라벨 (표시 이름).
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// 데이터가 있는 종목들의 종가를 날짜로 외부 조인합니다.
///
/// 열 순서는 입력 순서이며, 열마다 종목 이름이 붙습니다.
/// 데이터가 있는 종목이 없으면 [`AggregateError::NoData`]입니다.
pub fn merge_close(fetched: &[FetchedSeries]) -> Result<MergedTable, AggregateError> {
    let surviving: Vec<_> = fetched
        .iter()
        .filter_map(|f| f.outcome.series().map(|s| (&f.pair, s)))
        .collect();

    if surviving.is_empty() {
        return Err(AggregateError::NoData);
    }

    let width = surviving.len();
    let mut by_date: BTreeMap<NaiveDate, Vec<Option<Decimal>>> = BTreeMap::new();
    for (col, (_, series)) in surviving.iter().enumerate() {
        for (date, close) in series.closes() {
            by_date.entry(date).or_insert_with(|| vec![None; width])[col] = Some(close);
        }
    }

    Ok(MergedTable {
        columns: surviving.iter().map(|(pair, _)| (*pair).clone()).collect(),
        rows: by_date
            .into_iter()
            .map(|(date, values)| MergedRow { date, values })
            .collect(),
    })
}

/// 종목들을 조회한 뒤 종가를 병합합니다.
pub async fn collect_close(
    fetcher: &SeriesFetcher,
    pairs: &[StockPair],
    range: DateRange,
    diags: &mut Diagnostics,
) -> Result<MergedTable, AggregateError> {
    let fetched = fetcher.fetch_all(pairs, range, diags).await;
    merge_close(&fetched)
}

/// 라인 차트 탭.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineSection {
    /// 종목이 하나일 때의 단일 종가 차트
    Single {
        pair: StockPair,
        points: Vec<(NaiveDate, Decimal)>,
    },
    /// 여러 종목의 병합 종가 차트
    Merged { table: MergedTable },
    /// 그릴 데이터가 없음
    Unavailable { message: String },
}

/// 조회 결과로 라인 차트 탭을 구성합니다.
///
/// 종목이 정확히 하나면 병합 없이 그 종목의 종가를 그대로 사용합니다.
pub fn line_section(fetched: &[FetchedSeries]) -> LineSection {
    if let [only] = fetched {
        return match only.outcome.series() {
            Some(series) => LineSection::Single {
                pair: only.pair.clone(),
                points: series.closes().collect(),
            },
            None => {
                tracing::warn!(code = %only.pair.code, "{}", SINGLE_UNAVAILABLE);
                LineSection::Unavailable {
                    message: SINGLE_UNAVAILABLE.to_string(),
                }
            }
        };
    }

    match merge_close(fetched) {
        Ok(table) => LineSection::Merged { table },
        Err(AggregateError::NoData) => {
            tracing::warn!(count = fetched.len(), "{}", MERGED_UNAVAILABLE);
            LineSection::Unavailable {
                message: MERGED_UNAVAILABLE.to_string(),
            }
        }
    }
}

/// 캔들스틱 차트 탭의 종목 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandleSection {
    Chart {
        pair: StockPair,
        title: String,
        x_title: String,
        y_title: String,
        bars: Vec<DailyBar>,
    },
    Unavailable {
        pair: StockPair,
        message: String,
    },
}

/// 종목마다 독립적인 캔들스틱 섹션을 만듭니다.
pub fn candle_sections(fetched: &[FetchedSeries]) -> Vec<CandleSection> {
    fetched
        .iter()
        .map(|f| match f.outcome.series() {
            Some(series) => CandleSection::Chart {
                pair: f.pair.clone(),
                title: format!("{} 캔들스틱 차트", f.pair.name),
                x_title: "날짜".to_string(),
                y_title: "가격(원)".to_string(),
                bars: series.bars().to_vec(),
            },
            None => {
                let message = format!("{} 캔들스틱 차트를 불러올 수 없습니다.", f.pair.name);
                tracing::warn!(code = %f.pair.code, "{}", message);
                CandleSection::Unavailable {
                    pair: f.pair.clone(),
                    message,
                }
            }
        })
        .collect()
}
