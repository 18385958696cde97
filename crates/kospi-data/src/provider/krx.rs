//! KRX(한국거래소) 정보데이터시스템 클라이언트.
//!
//! `getJsonData.cmd` 엔드포인트에 `bld` 파라미터를 담아 POST 요청합니다.
//!
//! - 전종목 시세 (`MDCSTAT01501`): 종목 목록과 시가총액
//! - 개별종목 시세 (`MDCSTAT01701`): 일봉 OHLCV
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use kospi_data::{KrxClient, ListingSource};
//!
//! let krx = KrxClient::from_config(&config.data)?;
//! let raw = krx.fetch_listing(Market::Kospi).await?;
//! ```

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use kospi_core::{DailyBar, DataConfig, DateRange, Market};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{ListingSource, RawListing, SeriesSource};
use crate::error::{DataError, Result};

/// 전종목 시세 조회 bld.
const BLD_MARKET_LISTING: &str = "dbms/MDC/STAT/standard/MDCSTAT01501";

/// 개별종목 시세 조회 bld.
const BLD_STOCK_OHLCV: &str = "dbms/MDC/STAT/standard/MDCSTAT01701";

const REFERER: &str = "https://data.krx.co.kr/contents/MDC/MDI/mdiLoader/index.cmd";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// 휴장일이면 전종목 시세가 비어 있으므로 최대 이 일수만큼 거슬러 올라갑니다.
const LISTING_LOOKBACK_DAYS: u64 = 10;

/// 전종목 시세 응답 (`OutBlock_1`).
#[derive(Debug, Deserialize)]
struct KrxListingResponse {
    #[serde(rename = "OutBlock_1", default)]
    out_block: Vec<KrxListingRecord>,
}

#[derive(Debug, Deserialize)]
struct KrxListingRecord {
    #[serde(rename = "ISU_SRT_CD")]
    code: String,
    #[serde(rename = "ISU_ABBRV")]
    name: String,
    #[serde(rename = "MKTCAP", default)]
    market_cap: String,
    #[serde(rename = "MKT_NM", default)]
    market_name: Option<String>,
    #[serde(rename = "TDD_CLSPRC", default)]
    close: String,
}

/// 개별종목 시세 응답 (`output`).
#[derive(Debug, Deserialize)]
struct KrxOhlcvResponse {
    #[serde(default)]
    output: Vec<KrxOhlcvRecord>,
}

#[derive(Debug, Deserialize)]
struct KrxOhlcvRecord {
    #[serde(rename = "TRD_DD")]
    trd_dd: Option<String>,
    #[serde(rename = "TDD_OPNPRC", default)]
    open: String,
    #[serde(rename = "TDD_HGPRC", default)]
    high: String,
    #[serde(rename = "TDD_LWPRC", default)]
    low: String,
    #[serde(rename = "TDD_CLSPRC", default)]
    close: String,
    #[serde(rename = "ACC_TRDVOL", default)]
    volume: String,
}

/// KRX 정보데이터시스템 클라이언트.
pub struct KrxClient {
    client: reqwest::Client,
    endpoint: String,
    /// 전종목 시세 기준일 (없으면 서울 기준 오늘)
    listing_date: Option<NaiveDate>,
}

impl KrxClient {
    /// 새 클라이언트 생성.
    ///
    /// `endpoint`는 `getJsonData.cmd`의 전체 URL입니다.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            listing_date: None,
        })
    }

    /// 설정에서 클라이언트 생성.
    pub fn from_config(config: &DataConfig) -> Result<Self> {
        Self::new(&config.krx_url, Duration::from_secs(config.timeout_secs))
    }

    /// 전종목 시세 기준일 고정.
    pub fn with_listing_date(mut self, date: NaiveDate) -> Self {
        self.listing_date = Some(date);
        self
    }

    async fn post_form<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        debug!(endpoint = %self.endpoint, ?params, "KRX 요청");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Referer", REFERER)
            .form(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataError::Status {
                source_name: "KRX",
                status: response.status().as_u16(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            DataError::ParseError(format!(
                "KRX JSON 파싱 실패: {} - {}",
                e,
                truncate(&text, 200)
            ))
        })
    }

    async fn fetch_listing_on(&self, market: Market, date: NaiveDate) -> Result<Vec<RawListing>> {
        let trd_dd = date.format("%Y%m%d").to_string();
        let params = [
            ("bld", BLD_MARKET_LISTING),
            ("locale", "ko_KR"),
            ("mktId", market.krx_code()),
            ("trdDd", trd_dd.as_str()),
            ("share", "1"),
            ("money", "1"),
            ("csvxls_isNo", "false"),
        ];

        let response: KrxListingResponse = self.post_form(&params).await?;

        response
            .out_block
            .into_iter()
            .map(|r| {
                Ok(RawListing {
                    code: r.code,
                    name: r.name,
                    market_cap: parse_krx_number(&r.market_cap)?,
                    market_name: r.market_name,
                    close: Some(parse_krx_number(&r.close)?),
                })
            })
            .collect()
    }

    fn listing_base_date(&self) -> NaiveDate {
        self.listing_date.unwrap_or_else(|| {
            chrono::Utc::now()
                .with_timezone(&chrono_tz::Asia::Seoul)
                .date_naive()
        })
    }
}

#[async_trait]
impl ListingSource for KrxClient {
    fn name(&self) -> &str {
        "krx"
    }

    async fn fetch_listing(&self, market: Market) -> Result<Vec<RawListing>> {
        let base = self.listing_base_date();

        for back in 0..=LISTING_LOOKBACK_DAYS {
            let Some(date) = base.checked_sub_days(Days::new(back)) else {
                break;
            };
            let entries = self.fetch_listing_on(market, date).await?;
            if !entries.is_empty() {
                info!(market = %market, date = %date, count = entries.len(), "KRX 전종목 시세 조회 완료");
                return Ok(entries);
            }
            debug!(date = %date, "전종목 시세 없음 (휴장일), 이전 거래일 조회");
        }

        warn!(market = %market, base = %base, "최근 거래일의 전종목 시세를 찾지 못함");
        Err(DataError::FetchError(format!(
            "{} 기준 최근 {}일간 {} 종목 목록이 비어 있습니다",
            base, LISTING_LOOKBACK_DAYS, market
        )))
    }
}

#[async_trait]
impl SeriesSource for KrxClient {
    fn name(&self) -> &str {
        "krx"
    }

    async fn fetch_daily(&self, code: &str, range: DateRange) -> Result<Vec<DailyBar>> {
        let isin = to_isin(code)?;
        let (start, end) = range.compact_strings();
        let params = [
            ("bld", BLD_STOCK_OHLCV),
            ("isuCd", isin.as_str()),
            ("strtDd", start.as_str()),
            ("endDd", end.as_str()),
            ("adjStkPrc", "2"), // 수정주가 사용
            ("share", "1"),
            ("money", "1"),
            ("csvxls_isNo", "false"),
        ];

        let response: KrxOhlcvResponse = self.post_form(&params).await?;

        let mut bars = Vec::with_capacity(response.output.len());
        for record in &response.output {
            let date = parse_krx_date(record.trd_dd.as_deref().unwrap_or(""))?;
            let close = parse_krx_number(&record.close)?;

            bars.push(DailyBar {
                date,
                open: parse_krx_number(&record.open)?,
                high: parse_krx_number(&record.high)?,
                low: parse_krx_number(&record.low)?,
                close,
                volume: parse_krx_volume(&record.volume)?,
            });
        }

        // 응답은 최신순
        bars.sort_by_key(|b| b.date);
        debug!(code, count = bars.len(), "KRX 일봉 조회 완료");
        Ok(bars)
    }
}

/// 6자리 단축코드를 보통주 ISIN 코드로 변환 (예: 005930 → KR7005930003).
pub fn to_isin(code: &str) -> Result<String> {
    let code = code.trim();
    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DataError::InvalidData(format!("잘못된 종목코드: {}", code)));
    }

    let body = format!("KR7{}00", code.to_ascii_uppercase());
    Ok(format!("{}{}", body, isin_check_digit(&body)))
}

/// ISIN 체크 디지트 (문자를 숫자로 펼친 뒤 Luhn 알고리즘).
fn isin_check_digit(body: &str) -> u32 {
    let digits: Vec<u32> = body
        .chars()
        .filter_map(|c| c.to_digit(36))
        .flat_map(|v| {
            if v >= 10 {
                vec![v / 10, v % 10]
            } else {
                vec![v]
            }
        })
        .collect();

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    (10 - sum % 10) % 10
}

/// KRX 날짜 문자열 파싱 (YYYY/MM/DD 또는 YYYYMMDD).
fn parse_krx_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let format = if s.contains('/') { "%Y/%m/%d" } else { "%Y%m%d" };
    NaiveDate::parse_from_str(s, format)
        .map_err(|e| DataError::ParseError(format!("날짜 파싱 실패: {} - {}", s, e)))
}

/// KRX 숫자 문자열 파싱 (쉼표 제거, 빈 값과 "-"는 0).
fn parse_krx_number(s: &str) -> Result<Decimal> {
    let s = s.trim();
    if s.is_empty() || s == "-" {
        return Ok(Decimal::ZERO);
    }

    let cleaned = s.replace(',', "");
    Decimal::from_str(&cleaned)
        .map_err(|e| DataError::ParseError(format!("숫자 파싱 실패: {} - {}", s, e)))
}

fn parse_krx_volume(s: &str) -> Result<i64> {
    let s = s.trim();
    if s.is_empty() || s == "-" {
        return Ok(0);
    }

    s.replace(',', "")
        .parse::<i64>()
        .map_err(|e| DataError::ParseError(format!("거래량 파싱 실패: {} - {}", s, e)))
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
