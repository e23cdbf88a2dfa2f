use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_CACHE_MAX_AGE: u64 = 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bucket: String,
    /// File extensions shown in listings, matched case-insensitively
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// `max-age` in seconds of the `Cache-Control` header on served files
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age: u64,
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    S3(S3BackendConfig),
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3BackendConfig {
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    /// Send unsigned requests, for public buckets
    #[serde(default)]
    pub anonymous: bool,
}

fn default_extensions() -> Vec<String> {
    vec!["pdf".to_string()]
}

fn default_cache_max_age() -> u64 {
    DEFAULT_CACHE_MAX_AGE
}

impl Config {
    /// Load a JSON config, or YAML when the file ends in `.yml`/`.yaml`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

        let config: Config = if is_yaml {
            serde_yml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        config.validated()
    }

    fn validated(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        if self.bucket.trim().is_empty() {
            return Err("bucket must not be empty".into());
        }

        self.extensions = self
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        if self.extensions.is_empty() {
            return Err("at least one file extension must be configured".into());
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_json_config_with_defaults() {
        let file = write_config(
            ".json",
            r#"{"bucket": "pdfs", "backend": {"type": "s3", "region": "eu-west-1"}}"#,
        );
        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.bucket, "pdfs");
        assert_eq!(config.extensions, vec!["pdf"]);
        assert_eq!(config.cache_max_age, 3600);
        match config.backend {
            BackendConfig::S3(s3) => {
                assert_eq!(s3.region, "eu-west-1");
                assert!(!s3.force_path_style);
                assert!(!s3.anonymous);
                assert!(s3.endpoint.is_none());
            }
            BackendConfig::Memory => panic!("expected s3 backend"),
        }
    }

    #[test]
    fn test_yaml_config() {
        let file = write_config(
            ".yaml",
            "bucket: public-pdfs\n\
             extensions: [\".PDF\", \"Pdfa\"]\n\
             cache_max_age: 60\n\
             backend:\n  type: s3\n  region: us-east-1\n  endpoint: http://localhost:9000\n  force_path_style: true\n  anonymous: true\n",
        );
        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.extensions, vec!["pdf", "pdfa"]);
        assert_eq!(config.cache_max_age, 60);
        match config.backend {
            BackendConfig::S3(s3) => {
                assert!(s3.anonymous);
                assert!(s3.force_path_style);
                assert_eq!(s3.endpoint.as_deref(), Some("http://localhost:9000"));
            }
            BackendConfig::Memory => panic!("expected s3 backend"),
        }
    }

    #[test]
    fn test_memory_backend() {
        let file = write_config(".json", r#"{"bucket": "dev", "backend": {"type": "memory"}}"#);
        let config = Config::from_file(file.path()).unwrap();
        assert!(matches!(config.backend, BackendConfig::Memory));
    }

    #[test]
    fn test_rejects_empty_bucket() {
        let file = write_config(".json", r#"{"bucket": " ", "backend": {"type": "memory"}}"#);
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_rejects_empty_extensions() {
        let file = write_config(
            ".json",
            r#"{"bucket": "dev", "extensions": ["", "."], "backend": {"type": "memory"}}"#,
        );
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::from_file("/nonexistent/pdfshelf.json").is_err());
    }
}
