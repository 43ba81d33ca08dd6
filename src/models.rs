use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome envelope returned by crew operations: agents, recovery
/// engines, and validators all report through this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseResult {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl BaseResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            metadata: Map::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            metadata: Map::new(),
        }
    }
}

/// Named, toggleable component configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseConfig {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_constructors() {
        let result = BaseResult::ok("scan finished");
        assert!(result.success);
        assert_eq!(result.message, "scan finished");
        assert!(result.metadata.is_empty());

        let result = BaseResult::error("scan aborted");
        assert!(!result.success);
    }

    #[test]
    fn test_config_enabled_defaults_to_true() {
        let config: BaseConfig = serde_json::from_value(json!({"name": "agent"})).unwrap();
        assert_eq!(config.name, "agent");
        assert!(config.enabled);
        assert!(config.metadata.is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let config: BaseConfig = serde_json::from_value(json!({
            "name": "validator",
            "enabled": false,
            "metadata": {"pass": 2}
        }))
        .unwrap();

        let reparsed: BaseConfig =
            serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(reparsed, config);
        assert!(!reparsed.enabled);
        assert_eq!(reparsed.metadata["pass"], 2);
    }
}
