use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::Duration,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// File names looked for by [`ClientConfig::discover`], in order of priority
/// within a single directory.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".petstorerc.json",
    ".petstorerc",
    "petstore.config.json",
    "petstore.config.yaml",
];

/// Everything needed to set up an [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            headers: BTreeMap::new(),
            token: None,
            timeout_secs: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Value of the `Authorization` header implied by the token, if any.
    /// An empty token counts as no token.
    pub fn authorization(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(|token| format!("Bearer {token}"))
    }

    /// The static header set a client built from this configuration sends.
    ///
    /// Names are merged case-insensitively: a later configured header replaces
    /// an earlier one differing only in case, and the token's `Authorization`
    /// replaces any configured one.
    pub fn effective_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        let configured = self
            .headers
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()));
        let token = self
            .authorization()
            .map(|value| ("Authorization".to_string(), value));
        for (name, value) in configured.chain(token) {
            headers.retain(|existing: &String, _| !existing.eq_ignore_ascii_case(&name));
            headers.insert(name, value);
        }
        headers
    }

    /// Loads a configuration file. `.yaml` and `.yml` files are read as YAML,
    /// everything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let config_error = |source: Box<dyn std::error::Error + Send + Sync>| ClientError::Config {
            path: path.to_path_buf(),
            source,
        };

        let content = std::fs::read_to_string(path).map_err(|e| config_error(e.into()))?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| config_error(e.into()))?
        } else {
            serde_json::from_str(&content).map_err(|e| config_error(e.into()))?
        };
        debug!("loaded client configuration from {}", path.display());
        Ok(config)
    }

    /// Walks up from `start_dir` and returns the path of the first
    /// configuration file found.
    pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        Self::find_config_file_within(start_dir, None)
    }

    /// Like [`ClientConfig::find_config_file`], but never looks above
    /// `stop_dir` when one is given.
    pub fn find_config_file_within(start_dir: &Path, stop_dir: Option<&Path>) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .take_while(|dir| stop_dir.is_none_or(|stop| dir.starts_with(stop)))
            .find_map(|dir| {
                CONFIG_FILE_NAMES
                    .iter()
                    .map(|name| dir.join(name))
                    .find(|candidate| candidate.is_file())
            })
    }

    /// Like [`ClientConfig::find_config_file`], but also loads the file.
    /// Returns `Ok(None)` when there is no configuration file at all.
    pub fn discover(start_dir: &Path) -> Result<Option<Self>, ClientError> {
        Self::discover_within(start_dir, None)
    }

    pub fn discover_within(
        start_dir: &Path,
        stop_dir: Option<&Path>,
    ) -> Result<Option<Self>, ClientError> {
        match Self::find_config_file_within(start_dir, stop_dir) {
            Some(path) => Self::from_path(&path).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use test_log::test;

    use super::*;

    #[test]
    fn test_authorization() {
        let config = ClientConfig::new("https://api.petstore.example.com/v1");
        assert_eq!(config.authorization(), None);
        let config = config.with_token("abc");
        assert_eq!(config.authorization().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_empty_token_is_no_token() {
        let config = ClientConfig::new("http://pets.test").with_token("");
        assert_eq!(config.authorization(), None);
        assert!(config.effective_headers().is_empty());
    }

    #[test]
    fn test_effective_headers_merge_case_insensitively() {
        let config = ClientConfig::new("http://pets.test")
            .with_header("authorization", "Basic abc")
            .with_header("X-Trace", "1")
            .with_header("x-trace", "2")
            .with_token("t");
        let headers = config.effective_headers();
        assert_eq!(headers.len(), 2, "{headers:?}");
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer t");
        assert_eq!(headers.get("x-trace").unwrap(), "2");

        // without a token the configured header stays
        let config = ClientConfig::new("http://pets.test").with_header("authorization", "Basic abc");
        assert_eq!(config.effective_headers().get("authorization").unwrap(), "Basic abc");
    }

    #[test]
    fn test_load_json() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("client.json");
        fs::write(
            &path,
            r#"{
                "base_url": "https://api.petstore.example.com/v1",
                "headers": { "X-Request-Source": "tests" },
                "token": "t0k3n"
            }"#,
        )?;

        let config = ClientConfig::from_path(&path)?;
        assert_eq!(config.base_url, "https://api.petstore.example.com/v1");
        assert_eq!(config.headers.get("X-Request-Source").unwrap(), "tests");
        assert_eq!(config.token.as_deref(), Some("t0k3n"));
        assert_eq!(config.timeout(), None);
        Ok(())
    }

    #[test]
    fn test_load_yaml() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("petstore.config.yaml");
        fs::write(
            &path,
            "base_url: http://localhost:8080\ntimeout_secs: 5\nheaders:\n  X-Trace: enabled\n",
        )?;

        let config = ClientConfig::from_path(&path)?;
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.headers.get("X-Trace").unwrap(), "enabled");
        Ok(())
    }

    #[test]
    fn test_malformed_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(".petstorerc");
        fs::write(&path, "{ not json")?;

        match ClientConfig::from_path(&path) {
            Err(ClientError::Config { path: p, source }) => {
                assert_eq!(p, path);
                assert!(source.downcast_ref::<serde_json::Error>().is_some());
            }
            other => panic!("expected config error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_missing_file_keeps_io_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::from_path(&dir.path().join("absent.json")).unwrap_err();
        let source = std::error::Error::source(&err).expect("io error should be kept");
        let io = source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_yaml_error_keeps_source() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("petstore.config.yaml");
        fs::write(&path, "base_url: [unclosed\n")?;

        match ClientConfig::from_path(&path) {
            Err(ClientError::Config { source, .. }) => {
                assert!(source.downcast_ref::<serde_yaml::Error>().is_some())
            }
            other => panic!("expected config error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_discover_walks_up() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested)?;
        fs::write(
            root.path().join("petstore.config.json"),
            r#"{ "base_url": "http://root" }"#,
        )?;

        let config = ClientConfig::discover(&nested)?.expect("config should be found");
        assert_eq!(config.base_url, "http://root");
        Ok(())
    }

    #[test]
    fn test_discover_priority() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("petstore.config.json"),
            r#"{ "base_url": "http://low" }"#,
        )?;
        fs::write(
            dir.path().join(".petstorerc.json"),
            r#"{ "base_url": "http://high" }"#,
        )?;

        let found = ClientConfig::find_config_file(dir.path()).unwrap();
        assert_eq!(found, dir.path().join(".petstorerc.json"));
        Ok(())
    }

    #[test]
    fn test_nearest_directory_wins() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("project");
        fs::create_dir_all(&nested)?;
        fs::write(root.path().join(".petstorerc.json"), r#"{ "base_url": "http://outer" }"#)?;
        fs::write(nested.join("petstore.config.json"), r#"{ "base_url": "http://inner" }"#)?;

        let config = ClientConfig::discover(&nested)?.unwrap();
        assert_eq!(config.base_url, "http://inner");
        Ok(())
    }

    #[test]
    fn test_search_stops_at_boundary() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        let project = root.path().join("project");
        let nested = project.join("src");
        fs::create_dir_all(&nested)?;
        fs::write(root.path().join(".petstorerc.json"), r#"{ "base_url": "http://outside" }"#)?;

        assert_eq!(ClientConfig::find_config_file_within(&nested, Some(&project)), None);
        assert!(ClientConfig::discover_within(&nested, Some(&project))?.is_none());

        fs::write(project.join(".petstorerc.json"), r#"{ "base_url": "http://inside" }"#)?;
        let config = ClientConfig::discover_within(&nested, Some(&project))?.unwrap();
        assert_eq!(config.base_url, "http://inside");
        Ok(())
    }
}
