use crate::domain::card::Priority;
use serde::{Deserialize, Serialize};

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Priority given to cards created through `add_card`
    #[serde(default)]
    pub default_priority: Priority,
}

impl StoreConfig {
    pub fn with_default_priority(mut self, priority: Priority) -> Self {
        self.default_priority = priority;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_priority: Priority::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(StoreConfig::default().default_priority, Priority::new(3));
    }

    #[test]
    fn test_config_from_empty_json() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
    }
}
