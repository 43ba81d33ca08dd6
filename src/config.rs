use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::sync::Once;

static LOAD_DOTENV: Once = Once::new();

/// Environment-backed configuration access.
///
/// Keys resolve from the in-memory override layer first, then the
/// process environment. A `.env` file is loaded once per process on
/// first construction. Construct one and pass it to the components
/// that need it; there is no process-wide instance.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    overrides: HashMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        LOAD_DOTENV.call_once(|| {
            let _ = dotenvy::dotenv();
        });
        Self {
            overrides: HashMap::new(),
        }
    }

    fn raw(&self, key: &str) -> Option<String> {
        self.overrides
            .get(key)
            .cloned()
            .or_else(|| env::var(key).ok())
    }

    /// Resolve and parse a key. Absent keys are `Ok(None)`; a present
    /// value that fails to parse is an error naming the key.
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.raw(key) {
            Some(value) => {
                let parsed = value.parse::<T>().with_context(|| {
                    format!("Invalid value '{}' for configuration '{}'", value, key)
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Resolve a key, falling back to `default` when absent.
    pub fn get_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Resolve a key that must be present.
    pub fn require<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.get(key)?
            .ok_or_else(|| anyhow!("Required configuration '{}' not found", key))
    }

    /// Resolve a boolean flag. `true`, `1`, `yes`, and `on` (any case)
    /// count as true; anything else present counts as false.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.raw(key) {
            Some(value) => parse_bool(&value),
            None => default,
        }
    }

    /// Override a key for this instance. Overrides shadow the
    /// environment; intended for tests and debugging.
    pub fn set(&mut self, key: &str, value: &str) {
        self.overrides.insert(key.to_string(), value.to_string());
    }

    pub fn has(&self, key: &str) -> bool {
        self.overrides.contains_key(key) || env::var(key).is_ok()
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
