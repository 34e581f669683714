use crate::error::{IsoListError, Result};
use crate::http::Fetcher;
use crate::models::{RawDistribution, SpecEntry};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    distributions: Option<Vec<serde_yaml::Value>>,
}

/// The validated list of configured distributions, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<SpecEntry>,
}

impl Catalog {
    /// Load from a local path or an `http(s)://` URL.
    pub fn load<F: Fetcher + ?Sized>(source: &str, fetcher: &F) -> Result<Self> {
        let content = if is_remote(source) {
            debug!("Fetching catalog from {source}");
            fetcher.fetch_text(source)?
        } else {
            debug!("Reading catalog from {source}");
            fs::read_to_string(source).map_err(|e| {
                IsoListError::Catalog(format!("Cannot read '{source}': {e}"))
            })?
        };
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let document: CatalogDocument = serde_yaml::from_str(content)?;
        let values = document.distributions.ok_or_else(|| {
            IsoListError::Catalog("missing top-level 'distributions' list".to_string())
        })?;

        let mut entries = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            let name = value
                .get("Name")
                .and_then(|n| n.as_str())
                .map(str::to_string);

            let raw: RawDistribution = match serde_yaml::from_value(value) {
                Ok(raw) => raw,
                Err(e) => match name {
                    Some(name) => {
                        entries.push(SpecEntry::Malformed {
                            name,
                            reason: e.to_string(),
                        });
                        continue;
                    }
                    None => {
                        warn!("Skipping catalog entry #{}: {e}", index + 1);
                        continue;
                    }
                },
            };

            match SpecEntry::from_raw(raw) {
                Some(entry) => entries.push(entry),
                None => warn!("Skipping catalog entry #{} without Name", index + 1),
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SpecEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&SpecEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    pub fn malformed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| match entry {
            SpecEntry::Malformed { name, reason } => Some((name.as_str(), reason.as_str())),
            SpecEntry::Valid(_) => None,
        })
    }

    /// Keep only the entry called `name`.
    pub fn select(self, name: &str) -> Result<Self> {
        let entries: Vec<SpecEntry> = self
            .entries
            .into_iter()
            .filter(|entry| entry.name() == name)
            .collect();
        if entries.is_empty() {
            return Err(IsoListError::DistributionNotFound(name.to_string()));
        }
        Ok(Self { entries })
    }
}

pub fn is_remote(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
