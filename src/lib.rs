//! Content data layer for a statically generated blog.
//!
//! Loads a flat directory of frontmatter documents into an immutable
//! [`PostIndex`](index::PostIndex), then derives everything the rendering
//! layer needs from it: paginated listings, canonical URLs and social
//! metadata, the RSS feed, the sitemap and the list of static routes.

pub mod build;
pub mod config;
pub mod content_loader;
pub mod error;
pub mod feed;
pub mod index;
pub mod metadata;
pub mod models;
pub mod paginator;
pub mod routes;
pub mod server;
pub mod site;
pub mod sitemap;
pub mod slug;
pub mod state;

pub use config::SiteConfig;
pub use error::{BuildError, LookupError};
pub use index::PostIndex;
pub use models::{PaginatedPosts, Post};
pub use site::Site;
