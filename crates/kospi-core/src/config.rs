//! 설정 관리.
//!
//! 기본값 → TOML 파일 → `KOSPI__` 접두사 환경 변수 순서로 덮어씁니다.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DashboardError, DashboardResult};
use crate::types::Market;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 데이터 소스 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 대시보드 표시 설정
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 시계열 데이터 소스 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesSourceKind {
    /// 네이버 차트 API
    #[default]
    Naver,
    /// KRX 정보데이터시스템
    Krx,
}

/// 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// 종목 목록을 가져올 시장
    pub market: Market,
    /// KRX 정보데이터시스템 JSON 엔드포인트
    pub krx_url: String,
    /// 네이버 차트 API 기본 URL
    pub naver_url: String,
    /// 일봉 시계열 소스
    pub series_source: SeriesSourceKind,
    /// HTTP 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            market: Market::Kospi,
            krx_url: "https://data.krx.co.kr/comm/bldAttendant/getJsonData.cmd".to_string(),
            naver_url: "https://api.finance.naver.com".to_string(),
            series_source: SeriesSourceKind::Naver,
            timeout_secs: 30,
        }
    }
}

/// 대시보드 표시 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// 시가총액 랭킹에 표시할 종목 수
    pub top_n: usize,
    /// 시가총액 표시 단위 (1조 = 1e12)
    pub cap_divisor: Decimal,
    /// 시가총액 단위 표기
    pub cap_unit: String,
    /// 한 번에 선택할 수 있는 최대 종목 수
    pub max_selections: usize,
    /// 조회 시작일 기본값
    pub default_start: NaiveDate,
    /// "오늘"을 계산할 시간대
    pub timezone: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            cap_divisor: Decimal::from(1_000_000_000_000_i64),
            cap_unit: "조".to_string(),
            max_selections: 10,
            default_start: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
            timezone: "Asia/Seoul".to_string(),
        }
    }
}

impl DashboardConfig {
    /// 설정된 시간대를 파싱합니다.
    pub fn tz(&self) -> DashboardResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| DashboardError::Config(format!("timezone '{}': {}", self.timezone, e)))
    }

    /// 설정된 시간대 기준 오늘 날짜.
    pub fn today(&self) -> DashboardResult<NaiveDate> {
        let tz = self.tz()?;
        Ok(chrono::Utc::now().with_timezone(&tz).date_naive())
    }

    /// 설정 값 검증.
    pub fn validate(&self) -> DashboardResult<()> {
        if self.top_n == 0 {
            return Err(DashboardError::Config("dashboard.top_n must be > 0".into()));
        }
        if self.cap_divisor <= Decimal::ZERO {
            return Err(DashboardError::Config(
                "dashboard.cap_divisor must be positive".into(),
            ));
        }
        if self.max_selections == 0 {
            return Err(DashboardError::Config(
                "dashboard.max_selections must be > 0".into(),
            ));
        }
        self.tz().map(|_| ())
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> DashboardResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("KOSPI")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.dashboard.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> DashboardResult<Self> {
        Self::load("config/default.toml")
    }
}
