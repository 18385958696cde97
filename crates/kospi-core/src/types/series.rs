//! 일봉 시계열 및 조회 기간.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// 일봉 한 개.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량 (소스가 제공하지 않으면 0)
    #[serde(default)]
    pub volume: i64,
}

/// 한 종목의 일봉 시계열 (날짜 오름차순).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// 종목코드
    pub code: String,
    bars: Vec<DailyBar>,
}

impl PriceSeries {
    /// 시계열을 생성합니다. 일봉은 날짜순으로 정렬되고 같은 날짜는
    /// 마지막 값만 남습니다.
    pub fn new(code: impl Into<String>, mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by(|later, earlier| {
            if later.date == earlier.date {
                std::mem::swap(later, earlier);
                true
            } else {
                false
            }
        });

        Self {
            code: code.into(),
            bars,
        }
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 최근 두 일봉의 종가 (전일, 당일).
    pub fn last_two_closes(&self) -> Option<(Decimal, Decimal)> {
        match self.bars.as_slice() {
            [.., prev, last] => Some((prev.close, last.close)),
            _ => None,
        }
    }

    /// (날짜, 종가) 목록.
    pub fn closes(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.bars.iter().map(|b| (b.date, b.close))
    }
}

/// 시작일과 종료일을 모두 포함하는 조회 기간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// 기간을 생성합니다. 시작일이 종료일보다 늦으면 에러입니다.
    pub fn new(start: NaiveDate, end: NaiveDate) -> DashboardResult<Self> {
        if start > end {
            return Err(DashboardError::InvalidInput(format!(
                "시작 날짜({})가 종료 날짜({})보다 늦습니다",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// 날짜가 기간 안에 있는지 확인합니다.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// `YYYYMMDD` 형식의 (시작, 종료) 문자열.
    pub fn compact_strings(&self) -> (String, String) {
        (
            self.start.format("%Y%m%d").to_string(),
            self.end.format("%Y%m%d").to_string(),
        )
    }
}

/// `YYYY-MM-DD` 또는 `YYYYMMDD` 형식의 날짜 파싱.
pub fn parse_date(s: &str) -> DashboardResult<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .map_err(|e| DashboardError::InvalidInput(format!("날짜 형식 오류 '{}': {}", s, e)))
}
