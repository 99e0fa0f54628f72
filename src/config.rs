// Configuration for a shell instance and the settings it reads at runtime

use std::collections::HashMap;

pub const PROMPT_KEY: &str = "prompt";
pub const WELCOME_KEY: &str = "welcome";

/// Construction-time options for a `Shell`
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    /// Trace every registry change and raise on missing names (default false)
    pub debug: bool,

    /// Prompt shown before each line (default "> ")
    pub prompt: String,

    /// Line printed when no `start` handler is registered
    pub welcome: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            debug: false,
            prompt: "> ".to_string(),
            welcome: "Welcome! Type 'exit' to quit.".to_string(),
        }
    }
}

/// Key/value settings, read by the loop on every iteration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    pub fn from_config(config: &ShellConfig) -> Self {
        let mut values = HashMap::new();
        values.insert(PROMPT_KEY.to_string(), config.prompt.clone());
        values.insert(WELCOME_KEY.to_string(), config.welcome.clone());
        Self { values }
    }

    /// Store a value. No validation; unknown keys are kept for host code.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn prompt(&self) -> &str {
        self.get(PROMPT_KEY).unwrap_or_default()
    }

    pub fn welcome(&self) -> &str {
        self.get(WELCOME_KEY).unwrap_or_default()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&ShellConfig::default())
    }
}
