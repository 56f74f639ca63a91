//! Canonical URLs and SEO metadata for every HTML route.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::index::PostIndex;
use crate::paginator::total_pages;
use crate::routes::Route;

/// Normalize `path` to `/a/b/` form and join it onto `base_url`.
///
/// Missing leading or trailing slashes are added and repeated slashes are
/// collapsed, so `posts/foo`, `/posts/foo` and `/posts/foo/` all produce the
/// same URL. `base_url` must not end in a slash.
pub fn canonical_url(base_url: &str, path: &str) -> String {
    let mut url = String::with_capacity(base_url.len() + path.len() + 2);
    url.push_str(base_url);
    url.push('/');
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        url.push_str(segment);
        url.push('/');
    }
    url
}

/// Absolute URL for an asset such as a preview image. Absolute inputs pass
/// through; no trailing slash is added.
pub fn asset_url(base_url: &str, path: &str) -> String {
    if path.starts_with("https://") || path.starts_with("http://") {
        return path.to_string();
    }
    format!("{base_url}/{}", path.trim_start_matches('/'))
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Index,
    Article,
}

impl ContentKind {
    /// Value for `og:type`.
    pub fn og_type(self) -> &'static str {
        match self {
            ContentKind::Index => "website",
            ContentKind::Article => "article",
        }
    }
}

/// Social sharing attributes supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialPayload {
    pub kind: ContentKind,
    pub published_time: Option<NaiveDate>,
    pub authors: Vec<String>,
    /// Image paths or absolute URLs.
    pub images: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MetadataOptions<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub path: &'a str,
    pub social: Option<SocialPayload>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialMetadata>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SocialMetadata {
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub og_type: &'static str,
    pub kind: ContentKind,
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    pub authors: Vec<String>,
    pub images: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

pub struct MetadataBuilder<'a> {
    config: &'a SiteConfig,
}

impl<'a> MetadataBuilder<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    pub fn canonical_url(&self, path: &str) -> String {
        canonical_url(&self.config.base_url, path)
    }

    pub fn build_metadata(&self, options: MetadataOptions<'_>) -> Metadata {
        let MetadataOptions {
            title,
            description,
            path,
            social,
        } = options;
        let url = self.canonical_url(path);
        let social = social.map(|payload| self.social_block(title, description, &url, payload));

        Metadata {
            title: title.to_string(),
            description: description.to_string(),
            canonical_url: url,
            social,
        }
    }

    fn social_block(
        &self,
        title: &str,
        description: &str,
        url: &str,
        payload: SocialPayload,
    ) -> SocialMetadata {
        let images: Vec<String> = payload
            .images
            .iter()
            .map(|image| asset_url(&self.config.base_url, image))
            .collect();
        let card = if images.is_empty() {
            "summary"
        } else {
            "summary_large_image"
        };

        SocialMetadata {
            open_graph: OpenGraph {
                og_type: payload.kind.og_type(),
                kind: payload.kind,
                title: title.to_string(),
                description: description.to_string(),
                url: url.to_string(),
                site_name: self.config.title.clone(),
                locale: self.config.language.clone(),
                published_time: payload
                    .published_time
                    .map(|date| format!("{}T00:00:00Z", date.format("%Y-%m-%d"))),
                authors: payload.authors,
                images: images.clone(),
            },
            twitter: TwitterCard {
                card,
                title: title.to_string(),
                description: description.to_string(),
                images,
            },
        }
    }

    /// Metadata for an HTML route, or `None` when the route does not resolve
    /// to anything in `index` (callers fall back to site defaults).
    pub fn for_route(&self, route: &Route, index: &PostIndex) -> Option<Metadata> {
        let config = self.config;
        let path = route.path();

        match route {
            Route::Index => Some(self.build_metadata(MetadataOptions {
                title: &config.title,
                description: &config.description,
                path: &path,
                social: Some(self.index_payload()),
            })),
            Route::Page { number } => {
                let total_page = total_pages(index.len(), config.posts_per_page);
                if *number < 2 || *number > total_page {
                    return None;
                }
                let title = format!("{} - Page {number}", config.title);
                Some(self.build_metadata(MetadataOptions {
                    title: &title,
                    description: &config.description,
                    path: &path,
                    social: Some(self.index_payload()),
                }))
            }
            Route::Post { slug } => {
                let post = index.by_slug(slug).ok()?;
                let authors = post
                    .author
                    .clone()
                    .or_else(|| config.author.clone())
                    .into_iter()
                    .collect();
                Some(self.build_metadata(MetadataOptions {
                    title: &post.title,
                    description: &post.description,
                    path: &path,
                    social: Some(SocialPayload {
                        kind: ContentKind::Article,
                        published_time: Some(post.date),
                        authors,
                        images: post.image.clone().into_iter().collect(),
                    }),
                }))
            }
            Route::Category { id } => {
                let category = index
                    .categories()
                    .into_iter()
                    .find(|c| c.category.id == *id)?
                    .category;
                let description = format!("Posts in {}", category.name);
                Some(self.build_metadata(MetadataOptions {
                    title: &category.name,
                    description: &description,
                    path: &path,
                    social: Some(self.index_payload()),
                }))
            }
            Route::Sitemap | Route::Feed => None,
        }
    }

    fn index_payload(&self) -> SocialPayload {
        SocialPayload {
            kind: ContentKind::Index,
            published_time: None,
            authors: self.config.author.clone().into_iter().collect(),
            images: Vec::new(),
        }
    }
}
