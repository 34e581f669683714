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

//! Picks the "latest" entry of a directory listing.

use crate::scrape::listing::{DirectoryListing, ListingEntry};
use crate::scrape::pattern::WildcardPattern;
use crate::version::{compare_versions, extract_version_token};
use log::trace;
use std::cmp::Ordering;

/// A directory chosen in directory mode, with the version token it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryChoice<'a> {
    pub entry: &'a ListingEntry,
    pub version: Option<String>,
}

/// Candidates with a version token beat those without. Equal tokens favour
/// the less decorated name, so `12.10.0` beats `12.10.0-live`; tokenless
/// candidates compare by name.
fn compare_candidates(
    left_token: Option<&str>,
    left_name: &str,
    right_token: Option<&str>,
    right_name: &str,
) -> Ordering {
    match (left_token, right_token) {
        (Some(l), Some(r)) => {
            compare_versions(l, r).then_with(|| right_name.len().cmp(&left_name.len()))
        }
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => left_name.cmp(right_name),
    }
}

/// The greatest item under `compare`; among equals the first listed wins.
fn first_greatest<T>(
    items: impl IntoIterator<Item = T>,
    compare: impl Fn(&T, &T) -> Ordering,
) -> Option<T> {
    items.into_iter().reduce(|best, item| {
        if compare(&item, &best) == Ordering::Greater {
            item
        } else {
            best
        }
    })
}

fn contains_all(name: &str, version_match: &[String]) -> bool {
    version_match
        .iter()
        .all(|needle| name.contains(needle.as_str()))
}

/// File mode: the newest entry whose name matches `pattern` and contains every
/// string in `version_match`.
///
/// Slash-terminated links are never files. The version token is taken from the
/// text the wildcards matched.
pub fn resolve_file<'a>(
    listing: &'a DirectoryListing,
    pattern: &WildcardPattern,
    version_match: &[String],
) -> Option<&'a ListingEntry> {
    let candidates: Vec<(&ListingEntry, Option<String>)> = listing
        .entries()
        .iter()
        .filter(|entry| !entry.trailing_slash && contains_all(&entry.name, version_match))
        .filter_map(|entry| {
            let captured = pattern.captured(&entry.name)?;
            let token = extract_version_token(&captured).map(str::to_string);
            Some((entry, token))
        })
        .collect();

    trace!(
        "{} entries of {} match '{pattern}'",
        candidates.len(),
        listing.url()
    );

    first_greatest(candidates, |(l, lt), (r, rt)| {
        compare_candidates(lt.as_deref(), &l.name, rt.as_deref(), &r.name)
    })
    .map(|(entry, _)| entry)
}

/// Directory mode: the newest directory whose name contains every string in
/// `version_match`.
///
/// When no candidate carries a version token the lexicographically last name
/// is chosen.
pub fn resolve_directory<'a>(
    listing: &'a DirectoryListing,
    version_match: &[String],
) -> Option<DirectoryChoice<'a>> {
    let candidates = listing
        .directories()
        .filter(|entry| contains_all(&entry.name, version_match))
        .map(|entry| DirectoryChoice {
            entry,
            version: extract_version_token(&entry.name).map(str::to_string),
        });

    first_greatest(candidates, |l, r| {
        compare_candidates(
            l.version.as_deref(),
            &l.entry.name,
            r.version.as_deref(),
            &r.entry.name,
        )
    })
}
