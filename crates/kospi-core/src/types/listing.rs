//! 종목 목록 및 종목명 정규화.
//!
//! 한글 종목명은 같은 글자라도 조합형/완성형, 전각/반각 문자 차이로
//! 바이트가 달라질 수 있습니다. 목록에 저장되는 이름과 사용자가 입력한
//! 이름 모두 [`normalize_name`]을 거쳐야 조회가 맞아떨어집니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

use super::Market;

/// 종목명 정규화 (NFKC 후 앞뒤 공백 제거).
///
/// 여러 번 적용해도 결과가 같습니다.
///
/// ```
/// use kospi_core::normalize_name;
///
/// // 전각 문자와 분해된 한글 자모가 같은 이름으로 모입니다.
/// assert_eq!(normalize_name("  ＳＫ하이닉스 "), "SK하이닉스");
/// assert_eq!(normalize_name("\u{1109}\u{1161}\u{11B7}\u{1109}\u{1165}\u{11BC}"), "삼성");
/// ```
pub fn normalize_name(s: &str) -> String {
    s.nfkc().collect::<String>().trim().to_string()
}

/// 종목 목록의 한 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// 단축코드 (6자리, 예: 005930)
    pub code: String,
    /// 정규화된 종목명
    pub name: String,
    /// 시가총액 (원)
    pub market_cap: Decimal,
}

impl ListingEntry {
    /// 새 항목을 생성합니다. 이름은 정규화됩니다.
    pub fn new(code: impl Into<String>, name: &str, market_cap: Decimal) -> Self {
        Self {
            code: code.into().trim().to_string(),
            name: normalize_name(name),
            market_cap,
        }
    }
}

/// 한 시장의 전체 종목 목록.
///
/// 세션 시작 시 한 번 로드된 뒤 읽기 전용으로 사용됩니다.
/// 종목코드는 목록 안에서 유일합니다.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    market: Market,
    entries: Vec<ListingEntry>,
}

impl Listing {
    /// 목록을 생성합니다.
    ///
    /// 모든 종목명을 다시 정규화하고, 같은 종목코드가 여러 번 나오면
    /// 처음 나온 항목만 남깁니다.
    pub fn new(market: Market, entries: impl IntoIterator<Item = ListingEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut deduped = Vec::new();

        for mut entry in entries {
            if !seen.insert(entry.code.clone()) {
                tracing::warn!(code = %entry.code, "중복 종목코드 무시");
                continue;
            }
            entry.name = normalize_name(&entry.name);
            deduped.push(entry);
        }

        Self {
            market,
            entries: deduped,
        }
    }

    /// 시장 구분.
    pub fn market(&self) -> Market {
        self.market
    }

    /// 전체 항목 (원본 순서).
    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 종목명이 정확히 일치하는 모든 항목 (목록 순서).
    ///
    /// 입력 이름은 비교 전에 정규화됩니다.
    pub fn find_by_name(&self, name: &str) -> Vec<&ListingEntry> {
        let name = normalize_name(name);
        self.entries.iter().filter(|e| e.name == name).collect()
    }

    /// 종목명 또는 종목코드 부분 일치 검색.
    ///
    /// `limit`이 0이면 제한하지 않습니다.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&ListingEntry> {
        let query = normalize_name(query).to_uppercase();
        let matches = self.entries.iter().filter(|e| {
            query.is_empty() || e.code.contains(&query) || e.name.to_uppercase().contains(&query)
        });

        if limit == 0 {
            matches.collect()
        } else {
            matches.take(limit).collect()
        }
    }
}
