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

use crate::catalog::Catalog;
use crate::config::IsoListConfig;
use crate::error::{IsoListError, Result};
use crate::formatting::{abbreviate_hash, format_record_size};
use crate::http::HttpFetcher;
use crate::indicator::ProgressFactory;
use crate::models::ResultSet;
use crate::output::{to_json_string, write_results};
use crate::resolve::Resolver;
use crate::vendor::ProductsXmlCatalog;
use colored::Colorize;
use comfy_table::{Cell, Color, Table};
use log::{debug, info};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Resolve only this distribution
    pub name: Option<String>,
    pub output: Option<PathBuf>,
    /// Print the JSON mapping instead of writing a file
    pub stdout: bool,
    pub parallel: Option<usize>,
    pub no_progress: bool,
}

pub struct ResolveCommand<'a> {
    config: &'a IsoListConfig,
}

impl<'a> ResolveCommand<'a> {
    pub fn new(config: &'a IsoListConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, options: &ResolveOptions) -> Result<()> {
        let parallel = options.parallel.unwrap_or(self.config.parallel);
        if parallel == 0 {
            return Err(IsoListError::InvalidConfig(
                "--parallel must be at least 1".to_string(),
            ));
        }

        let fetcher = HttpFetcher::from_config(self.config);
        let mut catalog = Catalog::load(&self.config.distros_source, &fetcher)?;
        if let Some(name) = &options.name {
            catalog = catalog.select(name)?;
        }
        info!(
            "Loaded {} distributions from {}",
            catalog.len(),
            self.config.distros_source
        );

        let vendor = ProductsXmlCatalog::new(self.config.products_xml_path()?);
        debug!("Windows metadata expected at {}", vendor.path().display());

        let resolver = Resolver::new(&fetcher, &vendor)
            .with_max_hops(self.config.walk.max_hops)
            .with_parallel(parallel);
        let progress = ProgressFactory::create(options.no_progress);
        let results = resolver.resolve_all(catalog.entries(), progress.as_ref())?;

        if options.stdout {
            print!("{}", to_json_string(&results)?);
            return Ok(());
        }

        let output = options
            .output
            .clone()
            .unwrap_or_else(|| self.config.output.clone());
        write_results(&results, &output)?;

        println!("{}", summary_table(&results));
        println!();
        println!(
            "Processed {} distributions, {} failed",
            results.len(),
            results.failed_count()
        );
        println!("Results written to {}", output.display());
        Ok(())
    }
}

fn summary_table(results: &ResultSet) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new(""),
        Cell::new("Distribution"),
        Cell::new("Version"),
        Cell::new("Source"),
        Cell::new("Size"),
        Cell::new("Hash"),
    ]);

    for (name, outcome) in results.iter() {
        let record = outcome.record();
        let mark = if outcome.is_resolved() {
            Cell::new("✓").fg(Color::Green)
        } else {
            Cell::new("✗").fg(Color::Red)
        };
        let hash = match (&record.hash_type, &record.hash_value) {
            (Some(hash_type), Some(value)) => {
                format!("{} {}", hash_type.as_str(), abbreviate_hash(value))
            }
            _ => "-".dimmed().to_string(),
        };

        table.add_row(vec![
            mark,
            Cell::new(name),
            Cell::new(&record.version),
            Cell::new(record.source.as_str()),
            Cell::new(format_record_size(&record)),
            Cell::new(hash),
        ]);
    }

    table
}
