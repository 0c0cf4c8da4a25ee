//! Engine configuration.

/// Documentation tag naming the parameter a simulated local method returns.
pub const DEFAULT_RETURN_TAG: &str = "@wbp.eval.method.return";

/// Default maximum nesting of dispatch calls.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Policies of an [`crate::AstEvaluationEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum nested dispatch depth; `None` disables the check.
    pub max_depth: Option<usize>,
    /// Simple-name suffixes marking an anonymous class as an event listener
    /// that gets a stub instance instead of failing.
    pub listener_suffixes: Vec<String>,
    pub return_tag: String,
    /// Honor non-executable method descriptions.
    pub descriptions_gate_execution: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            listener_suffixes: vec!["Listener".to_string(), "Handler".to_string()],
            return_tag: DEFAULT_RETURN_TAG.to_string(),
            descriptions_gate_execution: true,
        }
    }
}

impl EvalConfig {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_listener_suffixes<S: Into<String>>(mut self, suffixes: impl IntoIterator<Item = S>) -> Self {
        self.listener_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_return_tag(mut self, tag: impl Into<String>) -> Self {
        self.return_tag = tag.into();
        self
    }

    #[must_use]
    pub fn with_descriptions_gate_execution(mut self, gate: bool) -> Self {
        self.descriptions_gate_execution = gate;
        self
    }

    /// True when `simple_name` ends with a listener suffix.
    pub fn is_listener_name(&self, simple_name: &str) -> bool {
        self.listener_suffixes
            .iter()
            .any(|suffix| !simple_name.is_empty() && simple_name.ends_with(suffix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = EvalConfig::default();
        assert_eq!(config.max_depth, Some(1024));
        assert_eq!(config.return_tag, "@wbp.eval.method.return");
        assert!(config.descriptions_gate_execution);
        assert!(config.is_listener_name("SelectionListener"));
        assert!(config.is_listener_name("ClickHandler"));
        assert!(!config.is_listener_name("Runnable"));
        assert!(!config.is_listener_name(""));
    }

    #[test]
    fn custom_suffixes() {
        let config = EvalConfig::default().with_listener_suffixes(["Callback"]);
        assert!(config.is_listener_name("DrawCallback"));
        assert!(!config.is_listener_name("MouseListener"));
    }
}
