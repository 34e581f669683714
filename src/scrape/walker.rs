// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{IsoListError, Result};
use crate::http::Fetcher;
use crate::models::WebSpec;
use crate::scrape::listing::{DirectoryListing, ListingEntry};
use crate::scrape::pattern::WildcardPattern;
use crate::scrape::resolver::{resolve_directory, resolve_file};
use crate::version::{UNKNOWN_VERSION, parse_file_version};
use log::{debug, info};
use url::Url;

pub const DEFAULT_MAX_HOPS: usize = 6;

/// Where a walk ended up.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub file_url: Url,
    pub file_name: String,
    pub directory_url: Url,
    pub listing: DirectoryListing,
    /// Version tokens of the directories chosen by version, outermost first
    pub version_tokens: Vec<String>,
}

impl ResolvedTarget {
    /// The innermost version directory, else a version parsed from the file
    /// name, else `Unknown`.
    pub fn version(&self) -> String {
        self.version_tokens
            .last()
            .map(String::as_str)
            .or_else(|| parse_file_version(&self.file_name))
            .unwrap_or(UNKNOWN_VERSION)
            .to_string()
    }
}

/// Descends from a base URL to the page holding the wanted file.
pub struct DirectoryWalker<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    max_hops: usize,
}

impl<'a, F: Fetcher + ?Sized> DirectoryWalker<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self {
            fetcher,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn walk(&self, spec: &WebSpec) -> Result<ResolvedTarget> {
        let pattern = WildcardPattern::new(&spec.extension_pattern)?;
        let mut url = as_directory_url(&spec.base_url);
        let mut listing = self.fetch_listing(&url)?;

        if let Some(entry) = resolve_file(&listing, &pattern, &spec.version_match) {
            info!("Found '{}' directly at {url}", entry.name);
            return Ok(finish(entry.clone(), listing, Vec::new()));
        }

        let mut hops = 0;
        let mut version_tokens = Vec::new();

        let choice =
            resolve_directory(&listing, &spec.version_match).ok_or_else(|| {
                IsoListError::EntryNotFound {
                    url: url.to_string(),
                    pattern: describe_version_match(&spec.version_match),
                }
            })?;
        debug!("Selected version directory '{}' at {url}", choice.entry.name);
        version_tokens.extend(choice.version);
        url = as_directory_url(&choice.entry.url);
        self.count_hop(&mut hops, &url)?;
        listing = self.fetch_listing(&url)?;

        for hop in &spec.path_navigation {
            let entry = listing.find_directory(hop).ok_or_else(|| IsoListError::EntryNotFound {
                url: url.to_string(),
                pattern: format!("{hop}/"),
            })?;
            url = as_directory_url(&entry.url);
            self.count_hop(&mut hops, &url)?;
            listing = self.fetch_listing(&url)?;
        }

        let entry = resolve_file(&listing, &pattern, &spec.version_match).ok_or_else(|| {
            IsoListError::EntryNotFound {
                url: url.to_string(),
                pattern: pattern.to_string(),
            }
        })?;
        info!("Selected '{}' at {url}", entry.name);
        Ok(finish(entry.clone(), listing, version_tokens))
    }

    fn fetch_listing(&self, url: &Url) -> Result<DirectoryListing> {
        debug!("Fetching listing {url}");
        let html = self.fetcher.fetch_text(url.as_str())?;
        Ok(DirectoryListing::parse(&html, url))
    }

    fn count_hop(&self, hops: &mut usize, url: &Url) -> Result<()> {
        *hops += 1;
        if *hops > self.max_hops {
            return Err(IsoListError::WalkTooDeep {
                url: url.to_string(),
                max_hops: self.max_hops,
            });
        }
        Ok(())
    }
}

fn finish(
    entry: ListingEntry,
    listing: DirectoryListing,
    version_tokens: Vec<String>,
) -> ResolvedTarget {
    let file_name = match entry.name.rsplit_once('/') {
        Some((_, base)) => base.to_string(),
        None => entry.name,
    };
    ResolvedTarget {
        file_url: entry.url,
        file_name,
        directory_url: listing.url().clone(),
        listing,
        version_tokens,
    }
}

fn describe_version_match(version_match: &[String]) -> String {
    if version_match.is_empty() {
        "<version directory>".to_string()
    } else {
        format!("<directory containing {}>", version_match.join(" + "))
    }
}

/// Relative links only resolve below a URL whose path ends in `/`.
pub fn as_directory_url(url: &Url) -> Url {
    if url.path().ends_with('/') {
        return url.clone();
    }
    let mut dir = url.clone();
    let path = format!("{}/", url.path());
    dir.set_path(&path);
    dir
}
