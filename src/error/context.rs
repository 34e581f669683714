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

use crate::error::IsoListError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a IsoListError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a IsoListError) -> Self {
        let (suggestion, details) = match error {
            IsoListError::NetworkError(msg) => {
                let suggestion = Some(
                    "Check your internet connection and proxy settings. Raise \
                     ISO_LIST_HTTP__TIMEOUT_SECS if the mirror is slow."
                        .to_string(),
                );
                let details = Some(format!("Network issue: {msg}"));
                (suggestion, details)
            }
            IsoListError::HttpStatus { url, status } => {
                let suggestion = match *status {
                    403 => Some(
                        "The mirror rejected the request. Some mirrors block non-browser \
                         clients; set [http] user_agent in iso-list.toml."
                            .to_string(),
                    ),
                    404 => Some(
                        "The directory layout of the mirror may have changed. Check URL and \
                         PathNavigation in the distribution catalog."
                            .to_string(),
                    ),
                    500..=599 => Some("The mirror reported a server error. Try again later.".to_string()),
                    _ => None,
                };
                let details = Some(format!("Request to {url} returned HTTP {status}"));
                (suggestion, details)
            }
            IsoListError::EntryNotFound { url, pattern } => {
                let suggestion = Some(format!(
                    "Open {url} in a browser and compare the listing with the pattern '{pattern}'."
                ));
                (suggestion, None)
            }
            IsoListError::WalkTooDeep { max_hops, .. } => {
                let suggestion = Some(format!(
                    "Shorten PathNavigation or raise [walk] max_hops (currently {max_hops})."
                ));
                (suggestion, None)
            }
            IsoListError::DistributionNotFound(name) => {
                let suggestion = Some(
                    "Run 'iso-list list' to see the configured distribution names.".to_string(),
                );
                let details = Some(format!("No catalog entry is named '{name}'."));
                (suggestion, details)
            }
            IsoListError::VendorMetadata(msg) => {
                let suggestion = Some(
                    "Refresh the cached products.xml or point [windows] products_xml at an \
                     existing copy."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            IsoListError::ConfigError(msg) | IsoListError::InvalidConfig(msg) => {
                let suggestion = Some(
                    "Check iso-list.toml and ISO_LIST_* environment variables.".to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            IsoListError::Catalog(msg) => {
                let suggestion = Some(
                    "The catalog must be a YAML document with a top-level 'distributions' list."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            IsoListError::Yaml(yaml_err) => {
                let suggestion =
                    Some("Fix the YAML syntax of the distribution catalog.".to_string());
                let details = Some(format!("YAML error: {yaml_err}"));
                (suggestion, details)
            }
            IsoListError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        Some("Check write permissions of the output location.".to_string())
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
