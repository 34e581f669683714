use crate::http::Fetcher;
use crate::models::HashType;
use crate::scrape::listing::DirectoryListing;
use crate::scrape::pattern::WildcardPattern;
use log::{debug, warn};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    pub hash_type: HashType,
    pub value: String,
}

/// Finds the hash of a resolved file in a companion manifest. Every failure
/// degrades to `None`.
pub struct ChecksumLocator<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
}

impl<'a, F: Fetcher + ?Sized> ChecksumLocator<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }

    pub fn locate(
        &self,
        file_name: &str,
        directory_url: &Url,
        listing: &DirectoryListing,
        manifest_pattern: &str,
    ) -> Option<Checksum> {
        let manifest_url = manifest_url(directory_url, listing, manifest_pattern)?;
        debug!("Fetching checksum manifest {manifest_url}");

        let content = match self.fetcher.fetch_text(manifest_url.as_str()) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not fetch checksum manifest {manifest_url}: {e}");
                return None;
            }
        };

        let checksum = parse_manifest(&content, file_name);
        if checksum.is_none() {
            debug!("No hash for '{file_name}' in {manifest_url}");
        }
        checksum
    }
}

fn manifest_url(
    directory_url: &Url,
    listing: &DirectoryListing,
    manifest_pattern: &str,
) -> Option<Url> {
    let pattern = match WildcardPattern::new(manifest_pattern) {
        Ok(pattern) => pattern,
        Err(e) => {
            warn!("{e}");
            return None;
        }
    };

    if pattern.is_literal() {
        return match directory_url.join(manifest_pattern) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Cannot join '{manifest_pattern}' to {directory_url}: {e}");
                None
            }
        };
    }

    // The shortest match is the manifest itself rather than a detached signature
    let found = listing
        .entries()
        .iter()
        .filter(|entry| !entry.trailing_slash && pattern.matches(&entry.name))
        .min_by_key(|entry| entry.name.len())
        .map(|entry| entry.url.clone());
    if found.is_none() {
        debug!("No manifest matching '{manifest_pattern}' at {directory_url}");
    }
    found
}

fn bsd_line_regex() -> &'static Regex {
    static BSD: OnceLock<Regex> = OnceLock::new();
    BSD.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9-]+\s*\((.+)\)\s*=\s*([0-9A-Fa-f]+)$").expect("valid BSD checksum regex")
    })
}

/// Hash for `file_name` in manifest text.
///
/// Understands `<hash>  [*]<file>` (coreutils), `ALG (<file>) = <hash>` (BSD
/// tagged) and `<file> <hash>` lines. Names match on their last path
/// component. Digests of other lengths than SHA1/SHA256/SHA512 are ignored.
pub fn parse_manifest(content: &str, file_name: &str) -> Option<Checksum> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .find_map(|line| parse_line(line, file_name))
}

fn parse_line(line: &str, file_name: &str) -> Option<Checksum> {
    if let Some(caps) = bsd_line_regex().captures(line) {
        let name = caps.get(1)?.as_str();
        let digest = caps.get(2)?.as_str();
        return names_match(name, file_name)
            .then(|| classify(digest))
            .flatten();
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }

    // coreutils: digest first, the name may contain spaces
    if let Some(checksum) = classify(tokens[0]) {
        let name = line[tokens[0].len()..].trim_start();
        if names_match(name, file_name) {
            return Some(checksum);
        }
    }

    // reversed: name first, digest last
    let last = tokens[tokens.len() - 1];
    if names_match(tokens[0], file_name) {
        return classify(last);
    }

    None
}

fn names_match(candidate: &str, file_name: &str) -> bool {
    let candidate = candidate.trim().trim_start_matches('*');
    let base = candidate.rsplit('/').next().unwrap_or(candidate);
    base == file_name
}

fn classify(token: &str) -> Option<Checksum> {
    let hash_type = HashType::from_hex_len(token.len())?;
    hex::decode(token).ok()?;
    Some(Checksum {
        hash_type,
        value: token.to_ascii_lowercase(),
    })
}
