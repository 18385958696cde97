//! 네이버 차트 API 클라이언트.
//!
//! 국내 주식 일봉을 `siseJson.naver`에서 조회합니다.
//!
//! 응답은 JSON이 아니라 JavaScript 배열 리터럴입니다. 첫 행은 작은따옴표로
//! 감싼 헤더(`'날짜', '시가', '고가', '저가', '종가', '거래량', ...`)이고
//! 이후 행이 날짜 오름차순 데이터입니다.
//!
//! ```text
//! [['날짜', '시가', '고가', '저가', '종가', '거래량', '외국인소진율'],
//! ["20240102", 78200, 79800, 78200, 79600, 17142847, 53.33],
//! ]
//! ```

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use kospi_core::{DailyBar, DataConfig, DateRange};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use super::SeriesSource;
use crate::error::{DataError, Result};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// 네이버 차트 API 클라이언트.
pub struct NaverChartClient {
    client: reqwest::Client,
    base_url: String,
}

impl NaverChartClient {
    /// 새 클라이언트 생성.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// 설정에서 클라이언트 생성.
    pub fn from_config(config: &DataConfig) -> Result<Self> {
        Self::new(&config.naver_url, Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl SeriesSource for NaverChartClient {
    fn name(&self) -> &str {
        "naver"
    }

    async fn fetch_daily(&self, code: &str, range: DateRange) -> Result<Vec<DailyBar>> {
        let url = format!("{}/siseJson.naver", self.base_url);
        let (start, end) = range.compact_strings();

        debug!(code, start = %start, end = %end, "네이버 일봉 요청");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", code),
                ("requestType", "1"),
                ("startTime", start.as_str()),
                ("endTime", end.as_str()),
                ("timeframe", "day"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataError::Status {
                source_name: "Naver",
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let bars = parse_sise_json(&body)?;

        debug!(code, count = bars.len(), "네이버 일봉 조회 완료");
        Ok(bars)
    }
}

/// `siseJson.naver` 응답 본문 파싱.
fn parse_sise_json(body: &str) -> Result<Vec<DailyBar>> {
    let normalized = strip_trailing_comma(&body.trim().replace('\'', "\""));
    if normalized.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<Vec<Value>> = serde_json::from_str(&normalized)
        .map_err(|e| DataError::ParseError(format!("네이버 차트 응답 파싱 실패: {}", e)))?;

    let mut bars = Vec::with_capacity(rows.len().saturating_sub(1));
    // 첫 행은 헤더
    for row in rows.iter().skip(1) {
        if row.len() < 5 {
            return Err(DataError::InvalidData(format!(
                "열 개수 부족 ({}개): {:?}",
                row.len(),
                row
            )));
        }

        let date = parse_date_cell(&row[0])?;
        let close = parse_number_cell(&row[4])?;

        let volume = match row.get(5) {
            Some(cell) => i64::try_from(parse_number_cell(cell)?.trunc()).unwrap_or(0),
            None => 0,
        };

        bars.push(DailyBar {
            date,
            open: parse_number_cell(&row[1])?,
            high: parse_number_cell(&row[2])?,
            low: parse_number_cell(&row[3])?,
            close,
            volume,
        });
    }

    bars.sort_by_key(|b| b.date);
    Ok(bars)
}

/// 마지막 행 뒤의 쉼표 제거 (`...],\n]` → `...]\n]`).
fn strip_trailing_comma(s: &str) -> String {
    match s.strip_suffix(']') {
        Some(inner) => {
            let inner = inner.trim_end();
            format!("{}]", inner.strip_suffix(',').unwrap_or(inner))
        }
        None => s.to_string(),
    }
}

fn parse_date_cell(cell: &Value) -> Result<NaiveDate> {
    let raw = match cell {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(DataError::ParseError(format!("날짜 값이 아님: {}", other)));
        }
    };
    NaiveDate::parse_from_str(&raw, "%Y%m%d")
        .map_err(|e| DataError::ParseError(format!("날짜 파싱 실패: {} - {}", raw, e)))
}

fn parse_number_cell(cell: &Value) -> Result<Decimal> {
    match cell {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map_err(|e| DataError::ParseError(format!("숫자 파싱 실패: {} - {}", n, e))),
        Value::String(s) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Value::String(s) => Decimal::from_str(&s.trim().replace(',', ""))
            .map_err(|e| DataError::ParseError(format!("숫자 파싱 실패: {} - {}", s, e))),
        Value::Null => Ok(Decimal::ZERO),
        other => Err(DataError::ParseError(format!("숫자 값이 아님: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rust_decimal_macros::dec;

    const BODY: &str = "\n [['날짜', '시가', '고가', '저가', '종가', '거래량', '외국인소진율'],\n\
        [\"20240103\", 78500, 78800, 77000, 77000, 21753644, 53.31],\n\
        [\"20240102\", 78200, 79800, 78200, 79600, 17142847, 53.33],\n\n]\n";

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_sise_json() {
        let bars = parse_sise_json(BODY).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].open, dec!(78200));
        assert_eq!(bars[0].close, dec!(79600));
        assert_eq!(bars[1].low, dec!(77000));
        assert_eq!(bars[1].volume, 21_753_644);
    }

    #[test]
    fn test_parse_keeps_zero_close_rows() {
        let body = "[['날짜', '시가', '고가', '저가', '종가', '거래량'],\n\
            [\"20240102\", 0, 0, 0, 0, 0],\n\
            [\"20240103\", 100, 110, 90, 105, 10]]";
        let bars = parse_sise_json(body).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, Decimal::ZERO);
        assert_eq!(bars[1].close, dec!(105));
    }

    #[test]
    fn test_parse_header_only() {
        let body = "[['날짜', '시가', '고가', '저가', '종가', '거래량', '외국인소진율']\n]";
        assert!(parse_sise_json(body).unwrap().is_empty());
        assert!(parse_sise_json("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_sise_json("<html>error</html>"),
            Err(DataError::ParseError(_))
        ));
        assert!(matches!(
            parse_sise_json("[['날짜'], [\"20240102\", 1]]"),
            Err(DataError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_daily() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/siseJson.naver")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("symbol".into(), "005930".into()),
                Matcher::UrlEncoded("requestType".into(), "1".into()),
                Matcher::UrlEncoded("startTime".into(), "20240101".into()),
                Matcher::UrlEncoded("endTime".into(), "20240105".into()),
                Matcher::UrlEncoded("timeframe".into(), "day".into()),
            ]))
            .with_status(200)
            .with_body(BODY)
            .create_async()
            .await;

        let client = NaverChartClient::new(server.url(), Duration::from_secs(5)).unwrap();
        let bars = client.fetch_daily("005930", range()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].close, dec!(77000));
    }

    #[tokio::test]
    async fn test_fetch_daily_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = NaverChartClient::new(server.url(), Duration::from_secs(5)).unwrap();
        let err = client.fetch_daily("005930", range()).await.unwrap_err();
        assert!(matches!(err, DataError::Status { status: 500, .. }));
    }
}
