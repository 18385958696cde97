//! CLI 명령어 구현 모듈.

pub mod format;
pub mod search;
pub mod settings;
pub mod show;
pub mod top;

pub use format::OutputFormat;
pub use search::render_search;
pub use settings::apply_market;
pub use show::{render_view, ShowConfig};
pub use top::render_ranking;
