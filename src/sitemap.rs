//! Sitemap generation.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01T00:00:00Z</lastmod>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::config::SiteConfig;
use crate::index::PostIndex;
use crate::metadata::canonical_url;
use crate::paginator::total_pages;
use crate::routes::Route;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const ROOT_PRIORITY: f32 = 1.0;
const POST_PRIORITY: f32 = 0.8;
const PAGE_PRIORITY: f32 = 0.6;
const CATEGORY_PRIORITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastModified {
    /// A post's own date.
    Date(NaiveDate),
    /// The build timestamp, used for listing routes.
    Timestamp(DateTime<Utc>),
}

impl fmt::Display for LastModified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastModified::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            LastModified::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: LastModified,
    pub priority: f32,
}

/// Sitemap entries for the root, listing pages `2..=total_page`, every post
/// and every category in use. One entry per canonical URL.
pub fn build_sitemap(
    index: &PostIndex,
    config: &SiteConfig,
    built_at: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let total_page = total_pages(index.len(), config.posts_per_page);
    let built = LastModified::Timestamp(built_at);

    let mut candidates = vec![(Route::Index, built, ROOT_PRIORITY)];
    candidates.extend(
        (2..=total_page).map(|number| (Route::Page { number }, built, PAGE_PRIORITY)),
    );
    candidates.extend(index.sorted_posts().iter().map(|post| {
        (
            Route::Post {
                slug: post.slug.clone(),
            },
            LastModified::Date(post.date),
            POST_PRIORITY,
        )
    }));
    candidates.extend(index.categories().into_iter().map(|c| {
        (
            Route::Category { id: c.category.id },
            built,
            CATEGORY_PRIORITY,
        )
    }));

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|(route, last_modified, priority)| SitemapEntry {
            url: canonical_url(&config.base_url, &route.path()),
            last_modified,
            priority,
        })
        .filter(|entry| seen.insert(entry.url.clone()))
        .collect()
}

/// Render entries as sitemap XML.
pub fn sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 128);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            htmlescape::encode_minimal(&entry.url)
        ));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.last_modified));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
