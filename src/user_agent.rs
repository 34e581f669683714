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

//! User-Agent string constants and utilities for consistent HTTP client identification.
//!
//! Several distribution mirrors answer 403 to anything that does not look like a
//! browser, so the scraper defaults to a browser-compatible agent that still names
//! the tool at the end.

/// The iso-list package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const BROWSER_PREFIX: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// User-Agent for mirror directory scraping
pub fn scraper_client() -> String {
    format!("{BROWSER_PREFIX} iso-list/{VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agents() {
        let scraper = scraper_client();
        assert!(scraper.starts_with("Mozilla/5.0"));
        assert!(scraper.ends_with(&format!("iso-list/{VERSION}")));
    }

    #[test]
    fn test_version_format() {
        // Version should follow semver format (e.g., "0.1.0")
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "Version should have 3 parts (major.minor.patch)"
        );

        for part in parts {
            assert!(
                part.parse::<u32>().is_ok(),
                "Version part should be a number"
            );
        }
    }
}
