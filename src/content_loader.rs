use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use gray_matter::{engine::YAML, Matter};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::{Category, SiteConfig};
use crate::error::{BuildError, Result};
use crate::models::{FrontMatter, Post};
use crate::slug::slug_from_path;

const DOCUMENT_EXTENSION: &str = "md";

/// Reads the post corpus from the configured content directory.
///
/// Every call re-reads the directory; nothing is cached between builds.
/// The first malformed document aborts the whole load.
pub struct ContentLoader<'a> {
    config: &'a SiteConfig,
}

impl<'a> ContentLoader<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    pub async fn load_all(&self) -> Result<Vec<Post>> {
        let dir = &self.config.content_dir;
        let paths = document_paths(dir).await?;

        let mut posts = Vec::with_capacity(paths.len());
        for path in paths {
            let raw = fs::read_to_string(&path)
                .await
                .map_err(|e| BuildError::io(&path, e))?;
            match parse_document(&path, &raw, self.config)? {
                Some(post) => posts.push(post),
                None => debug!(path = %path.display(), "skipping draft"),
            }
        }

        info!(dir = %dir.display(), count = posts.len(), "loaded posts");
        Ok(posts)
    }
}

/// Eligible documents directly inside `dir`, in file-name order so errors
/// are reported the same way on every run.
async fn document_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await.map_err(|e| BuildError::io(dir, e))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| BuildError::io(dir, e))? {
        let path = entry.path();
        let is_file = entry
            .file_type()
            .await
            .map_err(|e| BuildError::io(&path, e))?
            .is_file();
        if is_file && path.extension().map_or(false, |ext| ext == DOCUMENT_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Parse one document into a [`Post`]. Drafts yield `Ok(None)` unless the
/// config includes them.
pub fn parse_document(path: &Path, raw: &str, config: &SiteConfig) -> Result<Option<Post>> {
    let matter = Matter::<YAML>::new();
    let parsed = matter
        .parse::<FrontMatter>(raw)
        .map_err(|e| BuildError::malformed(path, format!("invalid front matter: {e}")))?;
    let front_matter = parsed
        .data
        .ok_or_else(|| BuildError::malformed(path, "missing front matter"))?;

    if front_matter.draft && !config.include_drafts {
        return Ok(None);
    }

    let slug = slug_from_path(path)
        .ok_or_else(|| BuildError::malformed(path, "file name does not produce a slug"))?;
    let title = required(path, "title", front_matter.title)?;
    let description = required(path, "description", front_matter.description)?;
    let date = parse_date(path, &required(path, "date", front_matter.date)?)?;
    let category = resolve_category(path, front_matter.category.as_deref(), config)?;

    Ok(Some(Post {
        slug,
        title,
        description,
        date,
        category,
        author: front_matter.author,
        image: front_matter.image,
        content: parsed.content,
        source: path.to_path_buf(),
    }))
}

fn required(path: &Path, field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(BuildError::malformed(
            path,
            format!("missing required field `{field}`"),
        )),
    }
}

fn parse_date(path: &Path, value: &str) -> Result<NaiveDate> {
    // chrono accepts signs and unpadded fields; documents must use YYYY-MM-DD exactly.
    if !is_iso_date_shape(value) {
        return Err(BuildError::malformed(
            path,
            format!("date `{value}` is not YYYY-MM-DD"),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| BuildError::malformed(path, format!("invalid date `{value}`: {e}")))
}

fn is_iso_date_shape(value: &str) -> bool {
    value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn resolve_category(
    path: &Path,
    value: Option<&str>,
    config: &SiteConfig,
) -> Result<Option<Category>> {
    let Some(id) = value.map(str::trim).filter(|id| !id.is_empty()) else {
        return Ok(None);
    };

    match config.find_category(id) {
        Some(category) => Ok(Some(category.clone())),
        None if config.strict_categories => Err(BuildError::malformed(
            path,
            format!("unknown category `{id}`"),
        )),
        None => {
            warn!(path = %path.display(), category = id, "unknown category, treating post as uncategorized");
            Ok(None)
        }
    }
}
