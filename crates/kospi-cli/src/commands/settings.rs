//! 명령줄 인자로 설정 덮어쓰기.

use anyhow::{Context, Result};
use kospi_core::{AppConfig, Market};

/// `--market` 인자가 있으면 설정의 시장을 바꿉니다.
///
/// 영문, 한글, KRX 코드(`STK`, `KSQ`) 모두 허용합니다.
pub fn apply_market(config: &mut AppConfig, market: Option<&str>) -> Result<()> {
    if let Some(raw) = market {
        config.data.market = raw
            .parse::<Market>()
            .map_err(anyhow::Error::msg)
            .context("--market 값을 해석할 수 없습니다")?;
    }
    Ok(())
}
