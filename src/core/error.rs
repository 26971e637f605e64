//! Crate error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort the session before any chat interaction begins
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file does not exist
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Configuration document is not valid JSON or has the wrong shape
    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two servers share the same name within one document
    #[error("Duplicate server name in configuration: {0}")]
    DuplicateServer(String),

    /// The document contains no `mcpServers` entries
    #[error("No mcpServers found in configuration: {0}")]
    NoServers(PathBuf),

    /// IO error while reading the document
    #[error("Failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::DuplicateServer("weather".into());
        assert_eq!(
            err.to_string(),
            "Duplicate server name in configuration: weather"
        );

        let err = ConfigError::NotFound(PathBuf::from("/tmp/mcp.json"));
        assert_eq!(err.to_string(), "Configuration file not found: /tmp/mcp.json");
    }
}
