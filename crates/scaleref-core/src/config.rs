//! scaleref.toml configuration parser.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default bound on each cluster API call.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of owner hops followed when resolving parents.
pub const DEFAULT_MAX_OWNER_DEPTH: usize = 8;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScalerefConfig {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Namespace to analyze. Unset means all namespaces.
    pub namespace: Option<String>,
    /// Per-request timeout for cluster lookups (e.g., "10s").
    pub lookup_timeout: Option<String>,
    /// Maximum owner-reference hops when resolving a parent object.
    pub max_owner_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// "text" or "json".
    pub format: Option<String>,
}

impl ScalerefConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: ScalerefConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a scaleref.toml with every setting spelled out.
    pub fn scaffold(namespace: Option<&str>) -> Self {
        ScalerefConfig {
            analyzer: AnalyzerConfig {
                namespace: namespace.map(str::to_string),
                lookup_timeout: Some("10s".to_string()),
                max_owner_depth: Some(DEFAULT_MAX_OWNER_DEPTH),
            },
            output: OutputConfig {
                format: Some("text".to_string()),
            },
        }
    }

    /// Configured lookup timeout, or the default when unset.
    pub fn lookup_timeout(&self) -> anyhow::Result<Duration> {
        match self.analyzer.lookup_timeout.as_deref() {
            Some(raw) => parse_timeout(raw).context("invalid analyzer.lookup_timeout"),
            None => Ok(DEFAULT_LOOKUP_TIMEOUT),
        }
    }

    pub fn max_owner_depth(&self) -> usize {
        self.analyzer
            .max_owner_depth
            .unwrap_or(DEFAULT_MAX_OWNER_DEPTH)
    }

    pub fn output_format(&self) -> &str {
        self.output.format.as_deref().unwrap_or("text")
    }
}

/// Parse a duration string like "500ms", "30s", "2m".
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        ms.parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}

/// Parse a lookup timeout. Unlike [`parse_duration`], zero is an error.
pub fn parse_timeout(raw: &str) -> anyhow::Result<Duration> {
    match parse_duration(raw) {
        Some(d) if d.is_zero() => anyhow::bail!("timeout must be greater than zero: {raw}"),
        Some(d) => Ok(d),
        None => anyhow::bail!("invalid timeout: {raw} (expected e.g. \"500ms\", \"10s\", \"2m\")"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold() {
        let config = ScalerefConfig::scaffold(Some("ns1"));
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("ns1"));
        assert!(toml_str.contains("lookup_timeout"));
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config: ScalerefConfig = toml::from_str("").unwrap();
        assert!(config.analyzer.namespace.is_none());
        assert_eq!(config.lookup_timeout().unwrap(), DEFAULT_LOOKUP_TIMEOUT);
        assert_eq!(config.max_owner_depth(), DEFAULT_MAX_OWNER_DEPTH);
        assert_eq!(config.output_format(), "text");
    }

    #[test]
    fn test_parse_full() {
        let toml_str = r#"
[analyzer]
namespace = "prod"
lookup_timeout = "2m"
max_owner_depth = 3

[output]
format = "json"
"#;
        let config: ScalerefConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analyzer.namespace.as_deref(), Some("prod"));
        assert_eq!(config.lookup_timeout().unwrap(), Duration::from_secs(120));
        assert_eq!(config.max_owner_depth(), 3);
        assert_eq!(config.output_format(), "json");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaleref.toml");
        std::fs::write(&path, "[analyzer]\nnamespace = \"default\"\n").unwrap();

        let config = ScalerefConfig::from_file(&path).unwrap();
        assert_eq!(config.analyzer.namespace.as_deref(), Some("default"));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScalerefConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn parse_duration_values() {
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Some(Duration::from_secs(300)));
        assert_eq!(parse_duration("7"), Some(Duration::from_secs(7)));
        assert_eq!(parse_duration("soon"), None);
    }

    #[test]
    fn parse_duration_overflowing_minutes() {
        assert_eq!(parse_duration("307445734561825861m"), None);
        assert_eq!(
            parse_duration("307445734561825860m"),
            Some(Duration::from_secs(307445734561825860 * 60))
        );
    }

    #[test]
    fn bad_configured_timeout_is_an_error() {
        let zero: ScalerefConfig = toml::from_str("[analyzer]\nlookup_timeout = \"0s\"\n").unwrap();
        let err = zero.lookup_timeout().unwrap_err();
        assert!(format!("{err:#}").contains("greater than zero"));

        let prose: ScalerefConfig =
            toml::from_str("[analyzer]\nlookup_timeout = \"10 seconds\"\n").unwrap();
        let err = prose.lookup_timeout().unwrap_err();
        assert!(err.to_string().contains("analyzer.lookup_timeout"));
    }

    #[test]
    fn parse_timeout_values() {
        assert_eq!(parse_timeout("250ms").unwrap(), Duration::from_millis(250));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("0ms").is_err());
        assert!(parse_timeout("").is_err());
    }
}
