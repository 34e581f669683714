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

//! Turns catalog entries into result records.
//!
//! Every distribution is resolved on its own. Failures are logged and turned
//! into null records so one broken mirror never stops the batch.

use crate::error::{IsoListError, Result};
use crate::http::Fetcher;
use crate::indicator::ProgressIndicator;
use crate::models::{
    DirectSpec, DistributionSpec, HashType, Outcome, RecordSource, ResolutionStrategy,
    ResultRecord, ResultSet, SpecEntry, VendorSelector, WebSpec,
};
use crate::scrape::{ChecksumLocator, DirectoryWalker};
use crate::scrape::walker::DEFAULT_MAX_HOPS;
use crate::vendor::VendorCatalog;
use crate::version::{UNKNOWN_VERSION, parse_leading_version};
use log::{debug, error, info, warn};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

pub struct Resolver<'a> {
    fetcher: &'a dyn Fetcher,
    vendor: &'a dyn VendorCatalog,
    max_hops: usize,
    parallel: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, vendor: &'a dyn VendorCatalog) -> Self {
        Self {
            fetcher,
            vendor,
            max_hops: DEFAULT_MAX_HOPS,
            parallel: 1,
        }
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Number of worker threads; values below 1 are treated as 1.
    pub fn with_parallel(mut self, parallel: usize) -> Self {
        self.parallel = parallel.max(1);
        self
    }

    /// Resolve a single catalog entry. Never fails: errors become an
    /// [`Outcome::Unresolved`] carrying the reason.
    pub fn resolve_one(&self, entry: &SpecEntry) -> Outcome {
        let spec = match entry {
            SpecEntry::Valid(spec) => spec,
            SpecEntry::Malformed { name, reason } => {
                error!("{name}: invalid catalog entry: {reason}");
                return Outcome::Unresolved {
                    source: RecordSource::Web,
                    reason: reason.clone(),
                };
            }
        };

        debug!("{}: resolving via {}", spec.name, spec.strategy.kind());
        let (source, result) = match &spec.strategy {
            ResolutionStrategy::Direct(direct) => {
                (RecordSource::Direct, Ok(self.resolve_direct(spec, direct)))
            }
            ResolutionStrategy::Vendor(selector) => (
                RecordSource::VendorMetadata,
                self.resolve_vendor(spec, selector),
            ),
            ResolutionStrategy::Web(web) => (RecordSource::Web, self.resolve_web(spec, web)),
        };

        match result {
            Ok(record) => {
                info!(
                    "{}: {}",
                    spec.name,
                    record.url.as_deref().unwrap_or("(no url)")
                );
                Outcome::Resolved(record)
            }
            Err(e) => {
                error!("{}: {e}", spec.name);
                Outcome::Unresolved {
                    source,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Resolve every entry, keeping catalog order in the result regardless of
    /// the number of workers.
    pub fn resolve_all(
        &self,
        entries: &[SpecEntry],
        progress: &dyn ProgressIndicator,
    ) -> Result<ResultSet> {
        progress.start(entries.len() as u64);

        let outcomes = if self.parallel <= 1 || entries.len() <= 1 {
            entries
                .iter()
                .map(|entry| self.resolve_and_report(entry, progress))
                .collect()
        } else {
            self.resolve_parallel(entries, progress)?
        };

        let results: ResultSet = entries
            .iter()
            .map(|entry| entry.name().to_string())
            .zip(outcomes)
            .collect();

        progress.complete(Some(format!(
            "Resolved {} of {} distributions",
            results.resolved_count(),
            results.len()
        )));
        Ok(results)
    }

    fn resolve_and_report(&self, entry: &SpecEntry, progress: &dyn ProgressIndicator) -> Outcome {
        let outcome = self.resolve_one(entry);
        progress.item_done(entry.name(), outcome.is_resolved());
        outcome
    }

    fn resolve_parallel(
        &self,
        entries: &[SpecEntry],
        progress: &dyn ProgressIndicator,
    ) -> Result<Vec<Outcome>> {
        let workers = self.parallel.min(entries.len());
        debug!(
            "Resolving {} distributions on {workers} workers",
            entries.len()
        );

        let next = AtomicUsize::new(0);
        let slots: Vec<Mutex<Option<Outcome>>> =
            entries.iter().map(|_| Mutex::new(None)).collect();

        let panicked = thread::scope(|scope| {
            let next = &next;
            let shared_slots = &slots;
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    scope.spawn(move || {
                        loop {
                            let index = next.fetch_add(1, Ordering::SeqCst);
                            let Some(entry) = entries.get(index) else {
                                break;
                            };
                            let outcome = self.resolve_and_report(entry, progress);
                            if let Ok(mut slot) = shared_slots[index].lock() {
                                *slot = Some(outcome);
                            }
                        }
                    })
                })
                .collect();

            // Join every worker before reporting, so none is left running
            handles
                .into_iter()
                .map(|handle| handle.join())
                .filter(|joined| joined.is_err())
                .count()
        });

        if panicked > 0 {
            return Err(IsoListError::ThreadPanic(format!(
                "{panicked} resolver worker(s) panicked"
            )));
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.into_inner()
                    .ok()
                    .flatten()
                    .ok_or_else(|| {
                        IsoListError::ThreadPanic(format!(
                            "no result recorded for '{}'",
                            entries[index].name()
                        ))
                    })
            })
            .collect()
    }

    fn resolve_direct(&self, spec: &DistributionSpec, direct: &DirectSpec) -> ResultRecord {
        ResultRecord {
            url: Some(direct.url.to_string()),
            hash_type: direct.sha256.as_ref().map(|_| HashType::Sha256),
            hash_value: direct.sha256.clone(),
            version: spec
                .version
                .clone()
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
            size: direct.size,
            source: RecordSource::Direct,
        }
    }

    fn resolve_vendor(
        &self,
        spec: &DistributionSpec,
        selector: &VendorSelector,
    ) -> Result<ResultRecord> {
        let image = self.vendor.lookup(selector)?.ok_or_else(|| {
            IsoListError::VendorMetadata(format!(
                "no image for edition '{}', language '{}', architecture '{}'",
                selector.edition, selector.language, selector.architecture
            ))
        })?;

        let version = spec.version.clone().unwrap_or_else(|| {
            parse_leading_version(&image.file_name)
                .unwrap_or(UNKNOWN_VERSION)
                .to_string()
        });

        Ok(ResultRecord {
            url: Some(image.url),
            hash_type: image.sha1.as_ref().map(|_| HashType::Sha1),
            hash_value: image.sha1,
            version,
            size: image.size,
            source: RecordSource::VendorMetadata,
        })
    }

    fn resolve_web(&self, spec: &DistributionSpec, web: &WebSpec) -> Result<ResultRecord> {
        let target = DirectoryWalker::new(self.fetcher)
            .with_max_hops(self.max_hops)
            .walk(web)?;

        let size = match self.fetcher.content_length(target.file_url.as_str()) {
            Ok(size) => size,
            Err(e) => {
                warn!("{}: could not determine size: {e}", spec.name);
                None
            }
        };

        let (hash_type, hash_value) = if let Some(pinned) = &web.pinned_sha256 {
            (Some(HashType::Sha256), Some(pinned.clone()))
        } else if let Some(pattern) = &web.hash_manifest_pattern {
            match ChecksumLocator::new(self.fetcher).locate(
                &target.file_name,
                &target.directory_url,
                &target.listing,
                pattern,
            ) {
                Some(checksum) => (Some(checksum.hash_type), Some(checksum.value)),
                None => (None, None),
            }
        } else {
            (None, None)
        };

        let version = spec.version.clone().unwrap_or_else(|| target.version());

        Ok(ResultRecord {
            url: Some(target.file_url.to_string()),
            hash_type,
            hash_value,
            version,
            size,
            source: RecordSource::Web,
        })
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
