//! 렌더링 중 발생한 사용자 표시용 메시지.

use serde::{Deserialize, Serialize};

/// 메시지 수준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

/// 진단 메시지 한 건.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

/// 한 번의 렌더링 동안 모인 진단 메시지.
///
/// 메시지를 쌓는 동시에 같은 수준으로 `tracing` 이벤트도 남깁니다.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.push(DiagnosticLevel::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.push(DiagnosticLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.push(DiagnosticLevel::Error, message);
    }

    fn push(&mut self, level: DiagnosticLevel, message: String) {
        self.items.push(Diagnostic { level, message });
    }

    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 특정 수준의 메시지 수.
    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.items.iter().filter(|d| d.level == level).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_keep_order_and_level() {
        let mut diags = Diagnostics::new();
        diags.warn("a");
        diags.error("b");
        diags.warn("c");

        assert_eq!(diags.count(DiagnosticLevel::Warning), 2);
        assert_eq!(diags.count(DiagnosticLevel::Error), 1);
        let messages: Vec<_> = diags.items().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }
}
