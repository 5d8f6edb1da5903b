//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub url: String,

    /// Author attributed to posts that carry no `author` in front-matter
    pub author: String,

    // Directory
    pub content_dir: String,

    // Rendering
    pub highlight_theme: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Apurwa Sarwajit".to_string(),
            description: String::new(),
            url: "https://apurwasarwajit.com".to_string(),
            author: "Apurwa Sarwajit".to_string(),
            content_dir: "content".to_string(),
            highlight_theme: "base16-ocean.dark".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded site config from {:?}", path.as_ref());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.author, "Apurwa Sarwajit");
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.highlight_theme, "base16-ocean.dark");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Site
author: Test User
content_dir: posts
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.content_dir, "posts");
        // Unlisted keys fall back to defaults
        assert_eq!(config.highlight_theme, "base16-ocean.dark");
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let yaml = "title: My Site\nanalytics_id: UA-123\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.extra.contains_key("analytics_id"));
    }
}
