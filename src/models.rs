use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Category;

/// Raw frontmatter as written by authors. Required keys are optional here so
/// the loader can name the missing one instead of reporting a serde error.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub draft: bool,
}

/// One parsed document. Never mutated after the loader builds it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub category: Option<Category>,
    pub author: Option<String>,
    pub image: Option<String>,
    /// Raw body text, handed to the renderer untouched.
    pub content: String,
    #[serde(skip)]
    pub source: PathBuf,
}

/// One page of an ordered post sequence.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PaginatedPosts<'a> {
    pub posts: Vec<&'a Post>,
    pub current_page: usize,
    pub total_page: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}
