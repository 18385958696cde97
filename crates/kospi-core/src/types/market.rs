//! 시장 구분 정의.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 국내 주식 시장 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    /// 유가증권시장 (코스피)
    #[default]
    Kospi,
    /// 코스닥
    Kosdaq,
}

impl Market {
    /// KRX 정보데이터시스템의 `mktId` 값.
    pub fn krx_code(&self) -> &'static str {
        match self {
            Self::Kospi => "STK",
            Self::Kosdaq => "KSQ",
        }
    }

    /// 문자열에서 시장 구분 파싱 (한글/영문/KRX 코드 허용).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        if s == "STK" || s.contains("KOSPI") || s.contains("코스피") || s.contains("유가증권")
        {
            Some(Self::Kospi)
        } else if s == "KSQ" || s.contains("KOSDAQ") || s.contains("코스닥") {
            Some(Self::Kosdaq)
        } else {
            None
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kospi => write!(f, "KOSPI"),
            Self::Kosdaq => write!(f, "KOSDAQ"),
        }
    }
}

impl std::str::FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown market: {}. Supported: KOSPI, KOSDAQ", s))
    }
}
