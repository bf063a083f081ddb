use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Debugger engine the launcher hands off to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Executable to run (e.g., "python3").
    #[serde(default = "default_engine_command")]
    pub command: String,
    /// Arguments placed before the synthesized engine argv (e.g., ["-m", "pydevd"]).
    #[serde(default = "default_engine_args")]
    pub args: Vec<String>,
}

fn default_engine_command() -> String {
    "python3".to_string()
}

fn default_engine_args() -> Vec<String> {
    vec!["-m".to_string(), "pydevd".to_string()]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: default_engine_command(),
            args: default_engine_args(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
        }
    }
}
