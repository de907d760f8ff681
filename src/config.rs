// ABOUTME: Driver configuration loaded from ~/.agents-tmux/config.toml with env overrides
// Controls which tmux binary and socket are used and which stderr texts mean "no sessions"

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Overrides `tmux_binary`.
pub const ENV_TMUX_BIN: &str = "AGENTS_TMUX_BIN";
/// Overrides `socket_name`. An empty value clears it.
pub const ENV_TMUX_SOCKET: &str = "AGENTS_TMUX_SOCKET";

/// stderr phrasings tmux uses when there is simply nothing to list. A missing
/// socket reports "no server running"; "error connecting to" is a real connect
/// failure (e.g. permission denied) and must stay an error.
const DEFAULT_BENIGN_EMPTY_PATTERNS: &[&str] = &["no server running", "no sessions"];

/// Failure to load or validate a [`DriverConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for [`TmuxDriver`](crate::tmux::TmuxDriver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// tmux executable, looked up on `PATH` unless absolute.
    pub tmux_binary: String,

    /// Private server socket, passed as `-L <name>` ahead of every subcommand.
    pub socket_name: Option<String>,

    /// Case-insensitive stderr substrings that turn a failed `list-sessions` into an
    /// empty result.
    pub benign_empty_patterns: Vec<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tmux_binary: "tmux".to_string(),
            socket_name: None,
            benign_empty_patterns: DEFAULT_BENIGN_EMPTY_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl DriverConfig {
    /// `~/.agents-tmux/config.toml`, if a home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".agents-tmux").join("config.toml"))
    }

    /// Load from the default path (falling back to defaults when the file is absent)
    /// and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        let config = config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML config text; absent keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `AGENTS_TMUX_BIN` and `AGENTS_TMUX_SOCKET` when set.
    #[must_use]
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides(
            std::env::var(ENV_TMUX_BIN).ok(),
            std::env::var(ENV_TMUX_SOCKET).ok(),
        )
    }

    fn apply_overrides(mut self, binary: Option<String>, socket: Option<String>) -> Self {
        if let Some(binary) = binary.filter(|b| !b.trim().is_empty()) {
            self.tmux_binary = binary;
        }
        if let Some(socket) = socket {
            self.socket_name = if socket.trim().is_empty() {
                None
            } else {
                Some(socket)
            };
        }
        self
    }

    /// Reject settings that would break argv construction or stderr classification.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tmux_binary.trim().is_empty() {
            return Err(ConfigError::Invalid("tmux_binary must not be empty".to_string()));
        }
        if let Some(socket) = &self.socket_name {
            if socket.is_empty() || socket.contains('/') {
                return Err(ConfigError::Invalid(format!(
                    "socket_name must be a bare name without '/', got {socket:?}"
                )));
            }
        }
        // A blank pattern would match every stderr and hide real failures.
        if self.benign_empty_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "benign_empty_patterns must not contain blank entries".to_string(),
            ));
        }
        Ok(())
    }

    /// Run against a private tmux server socket.
    #[must_use]
    pub fn with_socket_name(mut self, socket: impl Into<String>) -> Self {
        self.socket_name = Some(socket.into());
        self
    }

    /// Add one more stderr phrase that means "no sessions".
    #[must_use]
    pub fn with_benign_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.benign_empty_patterns.push(pattern.into());
        self
    }

    /// Whether a failed `list-sessions` stderr means "nothing to list" rather than an error.
    pub fn is_benign_empty(&self, stderr: &str) -> bool {
        let stderr = stderr.to_lowercase();
        self.benign_empty_patterns
            .iter()
            .any(|pattern| stderr.contains(&pattern.to_lowercase()))
    }
}
