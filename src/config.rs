use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::error::{BuildError, Result};
use crate::slug::slugify;

pub const DEFAULT_CONFIG_PATH: &str = "site.toml";

/// Site-wide settings, fixed for the duration of a build.
#[derive(Deserialize, Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Absolute site URL, stored without a trailing slash.
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: usize,
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Reject documents whose category is not configured. When off, such
    /// documents load as uncategorized and a warning is logged.
    #[serde(default = "default_strict_categories")]
    pub strict_categories: bool,
    #[serde(default)]
    pub include_drafts: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category {
    pub id: String,
    pub name: String,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_posts_per_page() -> usize {
    10
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content/posts")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_strict_categories() -> bool {
    true
}

impl SiteConfig {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .await
            .map_err(|e| BuildError::io(path, e))?;
        let config = Self::from_toml_str(&raw)?;
        debug!(path = %path.display(), categories = config.categories.len(), "loaded site config");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: SiteConfig = toml::from_str(raw)?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(BuildError::Config("`title` must not be empty".into()));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(BuildError::Config(format!(
                "`base_url` must be an absolute http(s) URL, got `{}`",
                self.base_url
            )));
        }
        if self.posts_per_page == 0 {
            return Err(BuildError::Config("`posts_per_page` must be at least 1".into()));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.id.is_empty() || slugify(&category.id) != category.id {
                return Err(BuildError::Config(format!(
                    "category id `{}` is not URL-safe",
                    category.id
                )));
            }
            if !seen.insert(category.id.as_str()) {
                return Err(BuildError::Config(format!(
                    "category id `{}` is declared twice",
                    category.id
                )));
            }
        }
        Ok(())
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> SiteConfig {
    SiteConfig::from_toml_str(
        r#"
title = "Example Blog"
description = "Notes and essays"
base_url = "https://example.com/"
author = "Jo Writer"

[[categories]]
id = "rust"
name = "Rust"

[[categories]]
id = "cloud"
name = "Cloud"
"#,
    )
    .expect("test config parses")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_defaults_and_strips_base_url_slash() {
        let config = test_config();
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.posts_per_page, 10);
        assert_eq!(config.language, "en");
        assert_eq!(config.content_dir, PathBuf::from("content/posts"));
        assert!(config.strict_categories);
        assert!(!config.include_drafts);
        assert_eq!(config.find_category("rust").map(|c| c.name.as_str()), Some("Rust"));
        assert!(config.find_category("go").is_none());
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = SiteConfig::from_toml_str(
            "title = \"t\"\nbase_url = \"https://example.com\"\nposts_per_page = 0\n",
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
    }

    #[test]
    fn rejects_relative_base_url() {
        let err = SiteConfig::from_toml_str("title = \"t\"\nbase_url = \"example.com\"\n").unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
    }

    #[test]
    fn rejects_unsafe_or_duplicate_category_ids() {
        let unsafe_id = r#"
title = "t"
base_url = "https://example.com"
[[categories]]
id = "Big Ideas"
name = "Big Ideas"
"#;
        assert!(matches!(
            SiteConfig::from_toml_str(unsafe_id),
            Err(BuildError::Config(_))
        ));

        let duplicate = r#"
title = "t"
base_url = "https://example.com"
[[categories]]
id = "rust"
name = "Rust"
[[categories]]
id = "rust"
name = "Rust again"
"#;
        assert!(matches!(
            SiteConfig::from_toml_str(duplicate),
            Err(BuildError::Config(_))
        ));
    }

    #[test]
    fn reports_toml_syntax_errors() {
        let err = SiteConfig::from_toml_str("title = ").unwrap_err();
        assert!(matches!(err, BuildError::ConfigParse(_)));
    }
}
