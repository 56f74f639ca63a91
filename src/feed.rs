//! RSS feed generation.
//!
//! Items follow the index's display order so the feed matches the site.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rss::{validation::Validate, CategoryBuilder, Channel, ChannelBuilder, GuidBuilder, ItemBuilder};

use crate::config::SiteConfig;
use crate::error::{BuildError, Result};
use crate::index::PostIndex;
use crate::metadata::canonical_url;
use crate::models::Post;
use crate::routes::Route;

const GENERATOR: &str = "rust-blog-content";

/// Build and validate the RSS channel for every post in `index`.
pub fn build_feed(index: &PostIndex, config: &SiteConfig, built_at: DateTime<Utc>) -> Result<Channel> {
    let items: Vec<_> = index
        .sorted_posts()
        .iter()
        .map(|post| post_to_item(post, config))
        .collect();

    let channel = ChannelBuilder::default()
        .title(config.title.clone())
        .link(canonical_url(&config.base_url, "/"))
        .description(config.description.clone())
        .language(Some(config.language.clone()))
        .generator(Some(GENERATOR.to_string()))
        .last_build_date(Some(built_at.to_rfc2822()))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| BuildError::Feed(format!("rss validation failed: {e}")))?;
    Ok(channel)
}

pub fn feed_xml(channel: &Channel) -> String {
    channel.to_string()
}

fn post_to_item(post: &Post, config: &SiteConfig) -> rss::Item {
    let link = canonical_url(
        &config.base_url,
        &Route::Post {
            slug: post.slug.clone(),
        }
        .path(),
    );
    let categories = post
        .category
        .iter()
        .map(|c| CategoryBuilder::default().name(c.name.clone()).build())
        .collect::<Vec<_>>();

    ItemBuilder::default()
        .title(Some(post.title.clone()))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .description(Some(post.description.clone()))
        .pub_date(Some(rfc2822_date(post.date)))
        .categories(categories)
        .build()
}

fn rfc2822_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::default()).and_utc().to_rfc2822()
}
