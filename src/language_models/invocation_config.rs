use serde_json::Value;
use std::collections::HashMap;

/// Runtime configuration threaded through a compression call.
///
/// Compressors and models that care about per-call settings (run names,
/// tags, concurrency limits) read it; everything else ignores it.
///
/// # Example
/// ```rust,ignore
/// let config = InvocationConfig::new()
///     .with_run_name("rerank".to_string())
///     .add_tag("production".to_string())
///     .with_max_concurrency(2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvocationConfig {
    pub run_name: Option<String>,
    pub tags: Vec<String>,
    pub metadata: HashMap<String, Value>,
    pub max_concurrency: Option<usize>,
}

impl InvocationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_run_name(mut self, name: String) -> Self {
        self.run_name = Some(name);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn add_tag(mut self, tag: String) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn add_metadata(mut self, key: String, value: Value) -> Self {
        self.metadata.insert(key, value);
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = Some(max_concurrency);
        self
    }

    /// Fold `other` into this config. Tags and metadata accumulate, the run
    /// name stays with the receiver, `max_concurrency` prefers `other` when set.
    pub fn merge(&mut self, other: InvocationConfig) {
        self.tags.extend(other.tags);
        for (k, v) in other.metadata {
            self.metadata.insert(k, v);
        }
        if other.max_concurrency.is_some() {
            self.max_concurrency = other.max_concurrency;
        }
    }

    /// Concurrency to use for fan-out work, falling back to `default` and never below 1.
    pub fn concurrency_or(config: Option<&InvocationConfig>, default: usize) -> usize {
        config
            .and_then(|c| c.max_concurrency)
            .unwrap_or(default)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invocation_config_builder() {
        let config = InvocationConfig::new()
            .with_run_name("compress".to_string())
            .with_tags(vec!["a".to_string()])
            .add_tag("b".to_string())
            .add_metadata("user".to_string(), json!("42"));

        assert_eq!(config.run_name.as_deref(), Some("compress"));
        assert_eq!(config.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(config.metadata.get("user"), Some(&json!("42")));
    }

    #[test]
    fn test_invocation_config_merge_keeps_run_name() {
        let mut base = InvocationConfig::new()
            .with_run_name("outer".to_string())
            .with_max_concurrency(8);
        let other = InvocationConfig::new()
            .with_run_name("inner".to_string())
            .add_tag("stage".to_string())
            .with_max_concurrency(2);

        base.merge(other);

        assert_eq!(base.run_name.as_deref(), Some("outer"));
        assert_eq!(base.tags, vec!["stage".to_string()]);
        assert_eq!(base.max_concurrency, Some(2));
    }

    #[test]
    fn test_concurrency_or() {
        assert_eq!(InvocationConfig::concurrency_or(None, 4), 4);
        let config = InvocationConfig::new().with_max_concurrency(0);
        assert_eq!(InvocationConfig::concurrency_or(Some(&config), 4), 1);
        let config = InvocationConfig::new().with_max_concurrency(7);
        assert_eq!(InvocationConfig::concurrency_or(Some(&config), 4), 7);
    }
}
