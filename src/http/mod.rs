mod client;

pub use client::HttpFetcher;

use crate::error::Result;

/// Text retrieval seam used by the directory walker, the checksum locator and
/// the catalog loader.
pub trait Fetcher: Send + Sync {
    /// Body of `url` as text. Transport failures and non-success HTTP statuses
    /// are errors.
    fn fetch_text(&self, url: &str) -> Result<String>;

    /// Size of the resource at `url` as advertised by the server, if any.
    fn content_length(&self, url: &str) -> Result<Option<u64>>;
}
