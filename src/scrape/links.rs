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

use log::trace;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// An anchor found on a page, with its target resolved against the page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub url: Url,
}

fn anchor_regex() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| Regex::new(r"(?i)<a\s[^>]*>").expect("valid anchor regex"))
}

fn href_regex() -> &'static Regex {
    static HREF: OnceLock<Regex> = OnceLock::new();
    HREF.get_or_init(|| {
        Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
            .expect("valid href regex")
    })
}

/// Extract every anchor with a resolvable target from `html`.
///
/// Scanning is tag-level, so unclosed anchors, odd casing and unquoted
/// attributes are all tolerated. The anchor text runs up to the next tag.
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Link> {
    let mut links = Vec::new();

    for anchor in anchor_regex().find_iter(html) {
        let Some(href) = href_regex().captures(anchor.as_str()).and_then(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
        }) else {
            continue;
        };

        let href = decode_entities(href.trim());
        if is_ignored_target(&href) {
            continue;
        }

        let url = match page_url.join(&href) {
            Ok(url) => url,
            Err(e) => {
                trace!("Skipping unresolvable href '{href}': {e}");
                continue;
            }
        };

        let rest = &html[anchor.end()..];
        let text_end = rest.find('<').unwrap_or(rest.len());
        let text = decode_entities(rest[..text_end].trim());

        links.push(Link { text, url });
    }

    links
}

fn is_ignored_target(href: &str) -> bool {
    if href.is_empty() || href.starts_with('#') {
        return true;
    }
    let lower = href.to_ascii_lowercase();
    lower.starts_with("mailto:") || lower.starts_with("javascript:")
}

/// Decode the handful of entities that show up in listing markup.
pub fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://mirror.example.org/debian-cd/").unwrap()
    }

    fn targets(html: &str) -> Vec<String> {
        extract_links(html, &page())
            .into_iter()
            .map(|l| l.url.to_string())
            .collect()
    }

    #[test]
    fn test_relative_and_absolute_targets() {
        let html = r#"
<html><body><pre>
<a href="../">Parent Directory</a>
<a href="12.10.0/">12.10.0/</a>
<a href="https://other.example.org/x.iso">x.iso</a>
<a href="/debian-cd/current/">current/</a>
</pre></body></html>"#;

        assert_eq!(
            targets(html),
            vec![
                "https://mirror.example.org/",
                "https://mirror.example.org/debian-cd/12.10.0/",
                "https://other.example.org/x.iso",
                "https://mirror.example.org/debian-cd/current/",
            ]
        );
    }

    #[test]
    fn test_link_text() {
        let links = extract_links(r#"<a href="12.10.0/">12.10.0/</a>"#, &page());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "12.10.0/");
    }

    #[test]
    fn test_tolerates_sloppy_markup() {
        let html = "<A HREF=one.iso>one<a href='two.iso'>two<a class=x href = \"three.iso\">";
        assert_eq!(
            targets(html),
            vec![
                "https://mirror.example.org/debian-cd/one.iso",
                "https://mirror.example.org/debian-cd/two.iso",
                "https://mirror.example.org/debian-cd/three.iso",
            ]
        );
    }

    #[test]
    fn test_keeps_query_and_fragment() {
        assert_eq!(
            targets(r#"<a href="?C=M;O=A">Last modified</a><a href="a.iso#frag">a</a>"#),
            vec![
                "https://mirror.example.org/debian-cd/?C=M;O=A",
                "https://mirror.example.org/debian-cd/a.iso#frag",
            ]
        );
    }

    #[test]
    fn test_decodes_entities() {
        let links = extract_links(
            r#"<a href="a.iso?x=1&amp;y=2">A &amp; B</a>"#,
            &page(),
        );
        assert_eq!(
            links[0].url.as_str(),
            "https://mirror.example.org/debian-cd/a.iso?x=1&y=2"
        );
        assert_eq!(links[0].text, "A & B");
    }

    #[test]
    fn test_skips_non_navigational_targets() {
        let html = r##"<a href="#top">top</a><a href="mailto:root@example.org">mail</a>
<a href="JavaScript:void(0)">js</a><a href="">empty</a><a name="anchor">named</a>"##;
        assert!(targets(html).is_empty());
    }

    #[test]
    fn test_no_links() {
        assert!(targets("").is_empty());
        assert!(targets("<html><body>Nothing here</body></html>").is_empty());
    }
}
