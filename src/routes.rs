//! The route surface handed to the rendering layer, and the boundary checks
//! that run before anything reaches the paginator.

use serde::Serialize;

use crate::error::LookupError;
use crate::index::PostIndex;
use crate::paginator::{static_page_numbers, total_pages};

pub const SITEMAP_PATH: &str = "/sitemap.xml";
pub const FEED_PATH: &str = "/rss.xml";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    /// Page 1 of the post listing.
    Index,
    Page { number: usize },
    Post { slug: String },
    Category { id: String },
    Sitemap,
    Feed,
}

impl Route {
    /// Site-relative path. HTML routes always end in a slash.
    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::Page { number } => format!("/page/{number}/"),
            Route::Post { slug } => format!("/posts/{slug}/"),
            Route::Category { id } => format!("/category/{id}/"),
            Route::Sitemap => SITEMAP_PATH.to_string(),
            Route::Feed => FEED_PATH.to_string(),
        }
    }
}

/// Validate a page number taken from a URL segment.
///
/// Only canonical positive integers pass: no sign, no leading zeros, no
/// fractional part.
pub fn parse_page_number(input: &str) -> Result<usize, LookupError> {
    let invalid = || LookupError::InvalidPageNumber {
        input: input.to_string(),
    };

    if input.is_empty() || input.starts_with('0') || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    input.parse::<usize>().map_err(|_| invalid())
}

/// Every route that must be pre-rendered for `index`, including the
/// placeholder page from [`static_page_numbers`].
pub fn static_routes(index: &PostIndex, page_size: usize) -> Vec<Route> {
    let total_page = total_pages(index.len(), page_size);

    let mut routes = vec![Route::Index];
    routes.extend(
        static_page_numbers(total_page)
            .into_iter()
            .map(|number| Route::Page { number }),
    );
    routes.extend(index.sorted_posts().iter().map(|post| Route::Post {
        slug: post.slug.clone(),
    }));
    routes.extend(index.categories().into_iter().map(|c| Route::Category {
        id: c.category.id,
    }));
    routes.push(Route::Sitemap);
    routes.push(Route::Feed);
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::test_post;

    #[test]
    fn paths_are_trailing_slash_canonical() {
        assert_eq!(Route::Index.path(), "/");
        assert_eq!(Route::Page { number: 3 }.path(), "/page/3/");
        assert_eq!(Route::Post { slug: "hello".into() }.path(), "/posts/hello/");
        assert_eq!(Route::Category { id: "rust".into() }.path(), "/category/rust/");
        assert_eq!(Route::Sitemap.path(), "/sitemap.xml");
        assert_eq!(Route::Feed.path(), "/rss.xml");
    }

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(parse_page_number("1"), Ok(1));
        assert_eq!(parse_page_number("42"), Ok(42));
    }

    #[test]
    fn rejects_non_positive_and_non_integer_pages() {
        for input in ["", "0", "-1", "+2", "1.5", "two", "02", " 3", "99999999999999999999999"] {
            assert_eq!(
                parse_page_number(input),
                Err(LookupError::InvalidPageNumber { input: input.to_string() }),
                "{input:?}"
            );
        }
    }

    #[test]
    fn static_routes_cover_pages_posts_and_categories() {
        let index = PostIndex::new(vec![
            test_post("a", "2024-01-01", Some("rust")),
            test_post("b", "2024-01-02", None),
            test_post("c", "2024-01-03", Some("cloud")),
        ])
        .unwrap();

        let paths: Vec<_> = static_routes(&index, 2).iter().map(Route::path).collect();
        assert_eq!(
            paths,
            [
                "/",
                "/page/2/",
                "/posts/c/",
                "/posts/b/",
                "/posts/a/",
                "/category/cloud/",
                "/category/rust/",
                "/sitemap.xml",
                "/rss.xml",
            ]
        );
    }

    #[test]
    fn static_routes_keep_placeholder_page_for_small_corpus() {
        let index = PostIndex::new(vec![test_post("only", "2024-01-01", None)]).unwrap();
        let routes = static_routes(&index, 10);
        assert!(routes.contains(&Route::Page { number: 2 }));
        assert!(!routes.contains(&Route::Page { number: 3 }));
    }
}
