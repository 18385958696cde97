//! 대시보드 전반에서 사용되는 공통 타입.

mod decimal;
mod listing;
mod market;
mod series;

pub use decimal::*;
pub use listing::*;
pub use market::*;
pub use series::*;
