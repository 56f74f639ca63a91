use crate::error::Result;
use crate::site::Site;

/// Shared state for the preview server. Built once at startup and never
/// written to afterwards.
pub struct AppState {
    pub site: Site,
    pub sitemap_xml: String,
    pub feed_xml: String,
}

impl AppState {
    /// Pre-render the XML documents so an invalid feed fails at startup
    /// rather than on the first request.
    pub fn new(site: Site) -> Result<Self> {
        let sitemap_xml = site.sitemap_xml();
        let feed_xml = site.feed_xml()?;
        Ok(Self {
            site,
            sitemap_xml,
            feed_xml,
        })
    }
}
