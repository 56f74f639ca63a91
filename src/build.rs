//! Writes the derived records for one build into the output directory.
//!
//! Every artifact is rendered in memory first; files are only written once
//! all of them succeeded.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{BuildError, Result};
use crate::metadata::canonical_url;
use crate::routes::Route;
use crate::site::Site;

#[derive(Serialize, Debug)]
struct RouteEntry {
    #[serde(flatten)]
    route: Route,
    path: String,
    url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub files: usize,
    pub posts: usize,
    pub pages: usize,
}

/// Render every artifact for `site` and write them under `output_dir`.
pub async fn write_site(site: &Site, output_dir: &Path) -> Result<BuildSummary> {
    let artifacts = render_artifacts(site)?;

    for (relative, contents) in &artifacts {
        let path = output_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BuildError::io(parent, e))?;
        }
        fs::write(&path, contents)
            .await
            .map_err(|e| BuildError::io(&path, e))?;
        debug!(path = %path.display(), "wrote");
    }

    let summary = BuildSummary {
        files: artifacts.len(),
        posts: site.index().len(),
        pages: site.total_page(),
    };
    info!(
        output = %output_dir.display(),
        files = summary.files,
        posts = summary.posts,
        pages = summary.pages,
        "build finished"
    );
    Ok(summary)
}

/// All output files as (relative path, contents) pairs.
pub fn render_artifacts(site: &Site) -> Result<Vec<(PathBuf, String)>> {
    let mut artifacts = vec![
        (PathBuf::from("sitemap.xml"), site.sitemap_xml()),
        (PathBuf::from("rss.xml"), site.feed_xml()?),
        (PathBuf::from("routes.json"), routes_json(site)?),
    ];

    for number in 1..=site.total_page() {
        let page = site.page(number)?;
        let relative = if number == 1 {
            PathBuf::from("data/index.json")
        } else {
            PathBuf::from(format!("data/page/{number}.json"))
        };
        artifacts.push((relative, serde_json::to_string_pretty(&page)?));
    }

    for post in site.index().sorted_posts() {
        let page = site.post(&post.slug)?;
        artifacts.push((
            PathBuf::from(format!("data/posts/{}.json", post.slug)),
            serde_json::to_string_pretty(&page)?,
        ));
    }

    for count in site.index().categories() {
        let id = &count.category.id;
        let page = site.category(id)?;
        artifacts.push((
            PathBuf::from(format!("data/category/{id}.json")),
            serde_json::to_string_pretty(&page)?,
        ));
    }

    Ok(artifacts)
}

fn routes_json(site: &Site) -> Result<String> {
    let base_url = &site.config().base_url;
    let entries: Vec<RouteEntry> = site
        .static_routes()
        .into_iter()
        .map(|route| {
            let path = route.path();
            let url = match route {
                Route::Sitemap | Route::Feed => format!("{base_url}{path}"),
                _ => canonical_url(base_url, &path),
            };
            RouteEntry { route, path, url }
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::index::test_post;
    use chrono::Utc;

    fn site() -> Site {
        let mut config = test_config();
        config.posts_per_page = 1;
        Site::from_posts(
            config,
            vec![
                test_post("first", "2024-01-01", Some("rust")),
                test_post("second", "2024-01-02", None),
            ],
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn renders_expected_artifact_paths() {
        let artifacts = render_artifacts(&site()).unwrap();
        let paths: Vec<_> = artifacts
            .iter()
            .map(|(p, _)| p.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            paths,
            [
                "sitemap.xml",
                "rss.xml",
                "routes.json",
                "data/index.json",
                "data/page/2.json",
                "data/posts/second.json",
                "data/posts/first.json",
                "data/category/rust.json",
            ]
        );
    }

    #[test]
    fn routes_manifest_lists_urls() {
        let json: serde_json::Value = serde_json::from_str(&routes_json(&site()).unwrap()).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries[0]["kind"], "index");
        assert_eq!(entries[0]["url"], "https://example.com/");
        assert_eq!(entries[1]["kind"], "page");
        assert_eq!(entries[1]["number"], 2);
        assert_eq!(entries[1]["path"], "/page/2/");
        let feed = entries.last().unwrap();
        assert_eq!(feed["kind"], "feed");
        assert_eq!(feed["url"], "https://example.com/rss.xml");
    }

    #[tokio::test]
    async fn writes_files_to_output_dir() {
        let out = tempfile::tempdir().unwrap();
        let summary = write_site(&site(), out.path()).await.unwrap();

        assert_eq!(summary, BuildSummary { files: 8, posts: 2, pages: 2 });
        assert!(out.path().join("sitemap.xml").is_file());
        assert!(out.path().join("data/posts/first.json").is_file());
        let post: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(out.path().join("data/posts/first.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(post["post"]["title"], "Title first");
        assert_eq!(post["metadata"]["canonical_url"], "https://example.com/posts/first/");
    }
}
