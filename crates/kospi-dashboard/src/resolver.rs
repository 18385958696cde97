//! 선택한 종목명을 종목코드로 변환.

use kospi_core::{normalize_name, DashboardError, DashboardResult, Listing};
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;

/// 해석된 종목이 하나도 없을 때 렌더링을 멈추며 보여주는 메시지.
pub const HALT_MESSAGE: &str = "종목 코드를 찾을 수 없습니다. 종목을 다시 선택해주세요.";

/// 종목코드와 표시 이름.
///
/// 조회부터 병합까지 항상 한 쌍으로 함께 다닙니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockPair {
    pub code: String,
    pub name: String,
}

/// 선택 하나에 대한 조회 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// 정규화된 선택 이름
    pub name: String,
    /// 이름이 일치한 모든 종목코드 (목록 순서)
    pub codes: Vec<String>,
}

impl Resolution {
    /// 사이드바 표시 문구 (예: `선택 : 삼성전자 -> 코드 : [005930]`).
    pub fn echo(&self) -> String {
        format!("선택 : {} -> 코드 : [{}]", self.name, self.codes.join(", "))
    }

    pub fn is_matched(&self) -> bool {
        !self.codes.is_empty()
    }
}

/// 선택 전체의 해석 결과.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedSelection {
    /// 선택 순서대로의 해석된 종목
    pub pairs: Vec<StockPair>,
    /// 선택마다 한 줄
    pub resolutions: Vec<Resolution>,
}

impl ResolvedSelection {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// 일치하는 종목이 없었던 선택 이름.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.resolutions
            .iter()
            .filter(|r| !r.is_matched())
            .map(|r| r.name.as_str())
    }
}

/// 선택 개수 검증.
pub fn validate_selection(selection: &[String], max: usize) -> DashboardResult<()> {
    if selection.len() > max {
        return Err(DashboardError::InvalidInput(format!(
            "종목은 최대 {}개까지 선택할 수 있습니다 (선택: {}개)",
            max,
            selection.len()
        )));
    }
    Ok(())
}

/// 선택한 종목명들을 목록에서 찾아 종목코드로 변환합니다.
///
/// - 이름은 비교 전에 정규화됩니다.
/// - 일치하는 항목이 없으면 건너뛰고 경고를 남깁니다.
/// - 여러 항목이 일치하면 목록에서 먼저 나온 항목을 사용하고 안내를 남깁니다.
///
/// 결과의 순서는 선택 순서를 따릅니다.
pub fn resolve_selection(
    listing: &Listing,
    selection: &[String],
    diags: &mut Diagnostics,
) -> ResolvedSelection {
    let mut resolved = ResolvedSelection::default();

    for raw in selection {
        let name = normalize_name(raw);
        let matches = listing.find_by_name(&name);

        let resolution = Resolution {
            name: name.clone(),
            codes: matches.iter().map(|e| e.code.clone()).collect(),
        };
        tracing::debug!("{}", resolution.echo());

        match matches.first() {
            Some(entry) => {
                if matches.len() > 1 {
                    diags.info(format!(
                        "'{}' 종목이 {}개 있습니다. 목록의 첫 종목({})을 사용합니다.",
                        name,
                        matches.len(),
                        entry.code
                    ));
                }
                resolved.pairs.push(StockPair {
                    code: entry.code.clone(),
                    name: entry.name.clone(),
                });
            }
            None => diags.warn(format!("'{}' 종목을 목록에서 찾을 수 없습니다.", name)),
        }

        resolved.resolutions.push(resolution);
    }

    resolved
}
