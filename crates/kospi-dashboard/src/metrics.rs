//! 현재가와 전일 대비 지표.

use kospi_core::format_won;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::fetcher::FetchedSeries;
use crate::resolver::StockPair;

/// 종목 하나의 지표 카드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricCard {
    Ready {
        pair: StockPair,
        /// 최근 종가
        value: Decimal,
        /// 최근 종가 - 직전 종가
        delta: Decimal,
        value_text: String,
        delta_text: String,
    },
    /// 일봉이 두 개 미만
    Insufficient { pair: StockPair, message: String },
}

impl MetricCard {
    pub fn pair(&self) -> &StockPair {
        match self {
            MetricCard::Ready { pair, .. } | MetricCard::Insufficient { pair, .. } => pair,
        }
    }
}

/// 조회 결과마다 지표 카드를 만듭니다.
pub fn metric_cards(fetched: &[FetchedSeries]) -> Vec<MetricCard> {
    fetched.iter().map(metric_card).collect()
}

fn metric_card(fetched: &FetchedSeries) -> MetricCard {
    let closes = fetched.outcome.series().and_then(|s| s.last_two_closes());

    match closes {
        Some((prev, last)) => {
            let delta = last - prev;
            MetricCard::Ready {
                pair: fetched.pair.clone(),
                value: last,
                delta,
                value_text: format_won(last),
                delta_text: format_won(delta),
            }
        }
        None => {
            let message = format!("{} 데이터가 충분하지 않습니다.", fetched.pair.name);
            tracing::warn!(code = %fetched.pair.code, "{}", message);
            MetricCard::Insufficient {
                pair: fetched.pair.clone(),
                message,
            }
        }
    }
}
