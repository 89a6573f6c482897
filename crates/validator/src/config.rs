//! Validator configuration.

use serde::{Deserialize, Serialize};

use crate::messages::Messages;

/// How several pending verdicts are combined.
///
/// Applies both inside a field (several asynchronous rules) and across a
/// form (several fields waiting on asynchronous rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsyncPolicy {
    /// Await every pending verdict concurrently; the result is their logical
    /// AND and the first failure in declared order supplies the message.
    #[default]
    All,
    /// Keep only the last pending verdict encountered. Earlier ones are
    /// ignored.
    Last,
}

/// Configuration of a [`Validator`](crate::Validator).
///
/// # Examples
///
/// ```
/// use formcheck_validator::{AsyncPolicy, ValidatorConfig};
///
/// let config = ValidatorConfig::from_json_str(r#"{ "async_policy": "last" }"#).unwrap();
/// assert_eq!(config.async_policy, AsyncPolicy::Last);
/// assert_eq!(config.namespace, "validator");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Name of the result bag fields report into.
    pub namespace: String,
    /// Combination of pending verdicts.
    pub async_policy: AsyncPolicy,
    /// Messages of the built-in rules.
    pub messages: Messages,
    /// Capacity of the result-change broadcast channel.
    pub event_capacity: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            namespace: "validator".to_string(),
            async_policy: AsyncPolicy::default(),
            messages: Messages::default(),
            event_capacity: 64,
        }
    }
}

impl ValidatorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document; missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_async_policy(mut self, policy: AsyncPolicy) -> Self {
        self.async_policy = policy;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}
