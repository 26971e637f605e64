//! MCP Server Configuration
//!
//! Loads the `mcp.json` configuration document consumed by discovery and the
//! tool executor. The document maps server names to stdio launch
//! specifications:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "weather": {
//!       "command": "weather-server",
//!       "args": ["--fahrenheit"],
//!       "env": { "WEATHER_REGION": "us" }
//!     }
//!   }
//! }
//! ```
//!
//! Server names must be unique within one document; document order is
//! preserved so discovery can report servers in configuration order.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::core::{ConfigError, ConfigResult};

/// Launch specification for a single MCP server
#[derive(Debug, Clone, Deserialize)]
pub struct McpServerConfig {
    /// Unique name of this server, taken from the `mcpServers` key
    #[serde(skip)]
    pub name: String,

    /// Executable to launch
    pub command: String,

    /// Arguments passed to the executable
    #[serde(default)]
    pub args: Vec<String>,

    /// Environment variable overrides for the child process
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// The full configuration document
///
/// Immutable for the process lifetime once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct McpConfig {
    /// Configured servers in document order
    #[serde(
        rename = "mcpServers",
        default,
        deserialize_with = "deserialize_servers"
    )]
    servers: Vec<McpServerConfig>,
}

impl McpConfig {
    /// Load and validate a configuration document from disk
    ///
    /// Fatal errors (missing file, malformed JSON, duplicate server names,
    /// empty server set) are reported here, before any chat interaction.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: McpConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate(path)?;

        tracing::info!(
            "Loaded {} MCP server(s) from {}",
            config.servers.len(),
            path.display()
        );

        Ok(config)
    }

    /// Parse a configuration document from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: McpConfig =
            serde_json::from_str(content).map_err(|source| ConfigError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            })?;

        config.validate(Path::new("<inline>"))?;

        Ok(config)
    }

    fn validate(&self, path: &Path) -> ConfigResult<()> {
        if self.servers.is_empty() {
            return Err(ConfigError::NoServers(path.to_path_buf()));
        }

        let mut seen = std::collections::HashSet::new();
        for server in &self.servers {
            if !seen.insert(server.name.as_str()) {
                return Err(ConfigError::DuplicateServer(server.name.clone()));
            }
        }

        Ok(())
    }

    /// All configured servers, in document order
    pub fn servers(&self) -> &[McpServerConfig] {
        &self.servers
    }

    /// Look up a server by name
    pub fn server(&self, name: &str) -> Option<&McpServerConfig> {
        self.servers.iter().find(|s| s.name == name)
    }

    /// Number of configured servers
    pub fn server_count(&self) -> usize {
        self.servers.len()
    }
}

/// Deserialize the `mcpServers` object into an ordered Vec
///
/// A plain map would lose document order and silently collapse duplicate
/// keys; collecting entries as they stream in keeps both for `validate()`.
fn deserialize_servers<'de, D>(deserializer: D) -> Result<Vec<McpServerConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ServersVisitor;

    impl<'de> Visitor<'de> for ServersVisitor {
        type Value = Vec<McpServerConfig>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of server name to launch specification")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut servers = Vec::with_capacity(access.size_hint().unwrap_or(0));

            while let Some((name, mut server)) =
                access.next_entry::<String, McpServerConfig>()?
            {
                server.name = name;
                servers.push(server);
            }

            Ok(servers)
        }
    }

    deserializer.deserialize_map(ServersVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "mcpServers": {
            "weather": {
                "command": "weather-server",
                "args": ["--fahrenheit"],
                "env": { "WEATHER_REGION": "us" }
            },
            "calc": {
                "command": "calc-server"
            }
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let config = McpConfig::from_json(SAMPLE).unwrap();

        assert_eq!(config.server_count(), 2);

        let weather = config.server("weather").unwrap();
        assert_eq!(weather.command, "weather-server");
        assert_eq!(weather.args, vec!["--fahrenheit"]);
        assert_eq!(weather.env.get("WEATHER_REGION").unwrap(), "us");

        // args and env default to empty when omitted
        let calc = config.server("calc").unwrap();
        assert_eq!(calc.command, "calc-server");
        assert!(calc.args.is_empty());
        assert!(calc.env.is_empty());
    }

    #[test]
    fn test_document_order_preserved() {
        let config = McpConfig::from_json(SAMPLE).unwrap();
        let names: Vec<&str> = config.servers().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["weather", "calc"]);
    }

    #[test]
    fn test_duplicate_server_name_rejected() {
        let json = r#"{
            "mcpServers": {
                "weather": { "command": "a" },
                "weather": { "command": "b" }
            }
        }"#;

        let err = McpConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateServer(name) if name == "weather"));
    }

    #[test]
    fn test_empty_server_set_rejected() {
        let err = McpConfig::from_json(r#"{ "mcpServers": {} }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoServers(_)));
    }

    #[test]
    fn test_missing_servers_key_rejected() {
        let err = McpConfig::from_json("{}").unwrap_err();
        assert!(matches!(err, ConfigError::NoServers(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = McpConfig::load("/nonexistent/mcp.json").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = McpConfig::load(file.path()).unwrap();
        assert_eq!(config.server_count(), 2);
    }

    #[test]
    fn test_malformed_json() {
        let err = McpConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_server_lookup() {
        let config = McpConfig::from_json(SAMPLE).unwrap();
        assert!(config.server("nope").is_none());
    }
}
