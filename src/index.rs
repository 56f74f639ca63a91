use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{BuildError, LookupError, Result};
use crate::models::{CategoryCount, Post};

/// Owns every loaded post and answers ordering and lookup queries.
///
/// Posts are stored once in display order: newest first, equal dates broken
/// by slug ascending.
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
    by_slug: HashMap<String, usize>,
}

/// Display order for posts.
pub fn display_order(a: &Post, b: &Post) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug))
}

impl PostIndex {
    /// Build the index, rejecting corpora where two documents share a slug.
    pub fn new(mut posts: Vec<Post>) -> Result<Self> {
        let mut sources: HashMap<&str, &Post> = HashMap::with_capacity(posts.len());
        for post in &posts {
            if let Some(first) = sources.insert(post.slug.as_str(), post) {
                return Err(BuildError::DuplicateSlug {
                    slug: post.slug.clone(),
                    first: first.source.clone(),
                    second: post.source.clone(),
                });
            }
        }

        posts.sort_by(display_order);
        let by_slug = posts
            .iter()
            .enumerate()
            .map(|(i, post)| (post.slug.clone(), i))
            .collect();

        debug!(count = posts.len(), "built post index");
        Ok(Self { posts, by_slug })
    }

    pub fn sorted_posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn by_slug(&self, slug: &str) -> Result<&Post, LookupError> {
        self.by_slug
            .get(slug)
            .map(|&i| &self.posts[i])
            .ok_or_else(|| LookupError::not_found(format!("post `{slug}`")))
    }

    /// Posts in `category`, in display order. Unknown or unused categories
    /// yield an empty list.
    pub fn by_category(&self, category: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|post| post.category.as_ref().is_some_and(|c| c.id == category))
            .collect()
    }

    /// Categories used by at least one post, ordered by id.
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts = BTreeMap::new();
        for category in self.posts.iter().filter_map(|post| post.category.as_ref()) {
            counts
                .entry(category.id.as_str())
                .or_insert_with(|| CategoryCount {
                    category: category.clone(),
                    count: 0,
                })
                .count += 1;
        }
        counts.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn test_post(slug: &str, date: &str, category: Option<&str>) -> Post {
    use crate::config::Category;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    Post {
        slug: slug.to_string(),
        title: format!("Title {slug}"),
        description: format!("About {slug}"),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date"),
        category: category.map(|id| Category {
            id: id.to_string(),
            name: id.to_uppercase(),
        }),
        author: None,
        image: None,
        content: String::new(),
        source: PathBuf::from(format!("content/posts/{slug}.md")),
    }
}
