use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::{Category, SiteConfig};
use crate::content_loader::ContentLoader;
use crate::error::{LookupError, Result};
use crate::feed::{build_feed, feed_xml};
use crate::index::PostIndex;
use crate::metadata::{Metadata, MetadataBuilder};
use crate::models::{CategoryCount, PaginatedPosts, Post};
use crate::paginator::{paginate, total_pages};
use crate::routes::{static_routes, Route};
use crate::sitemap::{build_sitemap, sitemap_xml, SitemapEntry};

/// A fully loaded corpus plus everything needed to answer route queries.
/// Immutable once built, so it can be shared freely between readers.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    index: PostIndex,
    built_at: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct ListingPage<'a> {
    #[serde(flatten)]
    pub page: PaginatedPosts<'a>,
    pub categories: Vec<CategoryCount>,
    pub metadata: Option<Metadata>,
}

#[derive(Serialize, Debug)]
pub struct PostPage<'a> {
    pub post: &'a Post,
    pub metadata: Metadata,
}

#[derive(Serialize, Debug)]
pub struct CategoryPage<'a> {
    pub category: Category,
    pub posts: Vec<&'a Post>,
    pub metadata: Metadata,
}

impl Site {
    /// Read the corpus and build the index. Any malformed document or
    /// duplicate slug fails the whole load.
    pub async fn load(config: SiteConfig, built_at: DateTime<Utc>) -> Result<Self> {
        let posts = ContentLoader::new(&config).load_all().await?;
        Self::from_posts(config, posts, built_at)
    }

    pub fn from_posts(config: SiteConfig, posts: Vec<Post>, built_at: DateTime<Utc>) -> Result<Self> {
        let index = PostIndex::new(posts)?;
        info!(
            posts = index.len(),
            categories = index.categories().len(),
            pages = total_pages(index.len(), config.posts_per_page),
            "site ready"
        );
        Ok(Self {
            config,
            index,
            built_at,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn index(&self) -> &PostIndex {
        &self.index
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn total_page(&self) -> usize {
        total_pages(self.index.len(), self.config.posts_per_page)
    }

    pub fn metadata(&self, route: &Route) -> Option<Metadata> {
        MetadataBuilder::new(&self.config).for_route(route, &self.index)
    }

    /// Listing page `number`. Page numbers past the end are not found here,
    /// even though the paginator itself would return an empty page.
    pub fn page(&self, number: usize) -> Result<ListingPage<'_>, LookupError> {
        if number == 0 {
            return Err(LookupError::InvalidPageNumber {
                input: number.to_string(),
            });
        }
        if number > self.total_page() {
            return Err(LookupError::not_found(format!("page {number}")));
        }

        let route = if number == 1 {
            Route::Index
        } else {
            Route::Page { number }
        };
        Ok(ListingPage {
            page: paginate(self.index.sorted_posts(), number, self.config.posts_per_page),
            categories: self.index.categories(),
            metadata: self.metadata(&route),
        })
    }

    pub fn post(&self, slug: &str) -> Result<PostPage<'_>, LookupError> {
        let post = self.index.by_slug(slug)?;
        let metadata = self
            .metadata(&Route::Post {
                slug: post.slug.clone(),
            })
            .ok_or_else(|| LookupError::not_found(format!("post `{slug}`")))?;
        Ok(PostPage { post, metadata })
    }

    /// Posts in a category that has at least one post.
    pub fn category(&self, id: &str) -> Result<CategoryPage<'_>, LookupError> {
        let category = self
            .index
            .categories()
            .into_iter()
            .find(|c| c.category.id == id)
            .ok_or_else(|| LookupError::not_found(format!("category `{id}`")))?
            .category;
        let metadata = self
            .metadata(&Route::Category { id: id.to_string() })
            .ok_or_else(|| LookupError::not_found(format!("category `{id}`")))?;

        Ok(CategoryPage {
            category,
            posts: self.index.by_category(id),
            metadata,
        })
    }

    pub fn static_routes(&self) -> Vec<Route> {
        static_routes(&self.index, self.config.posts_per_page)
    }

    pub fn sitemap(&self) -> Vec<SitemapEntry> {
        build_sitemap(&self.index, &self.config, self.built_at)
    }

    pub fn sitemap_xml(&self) -> String {
        sitemap_xml(&self.sitemap())
    }

    pub fn feed_xml(&self) -> Result<String> {
        let channel = build_feed(&self.index, &self.config, self.built_at)?;
        Ok(feed_xml(&channel))
    }
}
