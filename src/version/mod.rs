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

//! Ordering of free-form release labels such as `12.10.0`, `2025.01.01`,
//! `41-1.4` or `2025.1a`.
//!
//! A label is split into alternating runs of ASCII digits and everything else.
//! Runs are compared pairwise: digit runs numerically (any length, leading zeros
//! ignored), other runs byte-wise. A digit run outranks a non-digit run at the
//! same position. When all shared runs are equal the label with more runs wins.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// The placeholder reported when no version could be derived.
pub const UNKNOWN_VERSION: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn segments(label: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;

    for (idx, ch) in label.char_indices() {
        let is_digit = ch.is_ascii_digit();
        match in_digits {
            Some(current) if current != is_digit => {
                runs.push(make_run(&label[start..idx], current));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }

    if let Some(current) = in_digits {
        runs.push(make_run(&label[start..], current));
    }

    runs
}

fn make_run(text: &str, digits: bool) -> Run<'_> {
    if digits {
        Run::Digits(text)
    } else {
        Run::Text(text)
    }
}

fn compare_numeric(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

/// Compare two version labels.
///
/// Labels that differ only in leading zeros compare equal; callers needing a
/// strict order break such ties on the raw string.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left_runs = segments(left);
    let right_runs = segments(right);

    for (l, r) in left_runs.iter().zip(right_runs.iter()) {
        let ordering = match (l, r) {
            (Run::Digits(a), Run::Digits(b)) => compare_numeric(a, b),
            (Run::Text(a), Run::Text(b)) => a.cmp(b),
            (Run::Digits(_), Run::Text(_)) => Ordering::Greater,
            (Run::Text(_), Run::Digits(_)) => Ordering::Less,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left_runs.len().cmp(&right_runs.len())
}

/// Borrowed label ordered by [`compare_versions`], for use with `max_by_key`
/// and sorting.
#[derive(Debug, Clone, Copy)]
pub struct VersionKey<'a>(pub &'a str);

impl PartialEq for VersionKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionKey<'_> {}

impl PartialOrd for VersionKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_versions(self.0, other.0)
    }
}

fn version_token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    // From the first digit to the last digit, plus letters glued to that digit
    TOKEN.get_or_init(|| Regex::new(r"\d(?:.*\d)?[A-Za-z]*").expect("valid version token regex"))
}

fn file_version_regex() -> &'static Regex {
    static FILE_VERSION: OnceLock<Regex> = OnceLock::new();
    FILE_VERSION.get_or_init(|| {
        Regex::new(r"(\d+\.\d+(?:\.\d+)?(?:-\d+)?)").expect("valid file version regex")
    })
}

fn leading_version_regex() -> &'static Regex {
    static LEADING: OnceLock<Regex> = OnceLock::new();
    LEADING.get_or_init(|| Regex::new(r"^(\d+\.\d+)").expect("valid leading version regex"))
}

/// Strip non-version decoration from a listing entry name.
///
/// `ubuntu-22.04/` yields `22.04`, `2025.1a` stays as is, and names without
/// any digit (`latest`, `current`) yield `None`.
pub fn extract_version_token(name: &str) -> Option<&str> {
    version_token_regex().find(name).map(|m| m.as_str())
}

/// Dotted version embedded in an image file name, e.g. `12.10.0` in
/// `debian-12.10.0-amd64-netinst.iso`.
pub fn parse_file_version(file_name: &str) -> Option<&str> {
    file_version_regex()
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `major.minor` at the very start of a name, as in Windows ESD file names
/// (`26100.1742.240906-0331...esd` yields `26100.1742`).
pub fn parse_leading_version(file_name: &str) -> Option<&str> {
    leading_version_regex()
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
