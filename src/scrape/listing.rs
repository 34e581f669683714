use crate::scrape::links::extract_links;
use std::collections::HashSet;
use url::Url;

const MAX_EXTENSION_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Path below the listing URL, percent-decoded, without trailing slash
    pub name: String,
    pub url: Url,
    /// Link target ended in `/`
    pub trailing_slash: bool,
    pub is_dir: bool,
}

/// Entries of one directory-listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    url: Url,
    entries: Vec<ListingEntry>,
}

impl DirectoryListing {
    /// Build the listing of `page_url` from its HTML.
    ///
    /// Only links strictly below `page_url` on the same origin are kept, so
    /// parent links, sort links (`?C=M;O=A`) and off-site mirrors drop out.
    /// Duplicate targets keep their first occurrence.
    pub fn parse(html: &str, page_url: &Url) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for link in extract_links(html, page_url) {
            let Some(relative) = relative_path(page_url, &link.url) else {
                continue;
            };

            let trailing_slash = relative.ends_with('/');
            let raw_name = relative.trim_end_matches('/');
            if raw_name.is_empty() {
                continue;
            }

            let mut url = link.url.clone();
            url.set_fragment(None);
            if !seen.insert(url.to_string()) {
                continue;
            }

            let name = urlencoding::decode(raw_name)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw_name.to_string());

            entries.push(ListingEntry {
                name,
                url,
                trailing_slash,
                is_dir: trailing_slash,
            });
        }

        // Listings that mark directories with a slash do it for every entry
        if !entries.iter().any(|e| e.trailing_slash) {
            for entry in &mut entries {
                entry.is_dir = !has_file_extension(&entry.name);
            }
        }

        Self {
            url: page_url.clone(),
            entries,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn directories(&self) -> impl Iterator<Item = &ListingEntry> {
        self.entries.iter().filter(|e| e.is_dir)
    }

    /// Directory entry named `name`, compared case-insensitively.
    pub fn find_directory(&self, name: &str) -> Option<&ListingEntry> {
        let name = name.trim_matches('/');
        self.directories()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }
}

fn relative_path(base: &Url, target: &Url) -> Option<String> {
    if base.origin() != target.origin() {
        return None;
    }
    let base_path = base.path();
    let target_path = target.path();
    if target_path.len() <= base_path.len() || !target_path.starts_with(base_path) {
        return None;
    }
    // `/pub/a` must not count as below `/pub/ab`
    if !base_path.ends_with('/') {
        return None;
    }
    Some(target_path[base_path.len()..].to_string())
}

fn has_file_extension(name: &str) -> bool {
    let last_segment = name.rsplit('/').next().unwrap_or(name);
    match last_segment.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.starts_with(|c: char| c.is_ascii_alphabetic())
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}
