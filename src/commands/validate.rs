use crate::catalog::Catalog;
use crate::config::IsoListConfig;
use crate::error::{IsoListError, Result};
use crate::http::HttpFetcher;
use crate::models::SpecEntry;
use colored::Colorize;

pub struct ValidateCommand<'a> {
    config: &'a IsoListConfig,
}

impl<'a> ValidateCommand<'a> {
    pub fn new(config: &'a IsoListConfig) -> Result<Self> {
        Ok(Self { config })
    }

    /// Fails with a catalog error when any entry is malformed.
    pub fn execute(&self) -> Result<()> {
        let fetcher = HttpFetcher::from_config(self.config);
        let catalog = Catalog::load(&self.config.distros_source, &fetcher)?;

        for line in report_lines(&catalog) {
            println!("{line}");
        }

        let malformed = catalog.malformed().count();
        println!();
        if malformed == 0 {
            println!("{} distributions OK", catalog.len());
            return Ok(());
        }

        Err(IsoListError::Catalog(format!(
            "{malformed} of {} distributions in {} are malformed",
            catalog.len(),
            self.config.distros_source
        )))
    }
}

fn report_lines(catalog: &Catalog) -> Vec<String> {
    catalog
        .entries()
        .iter()
        .map(|entry| match entry {
            SpecEntry::Valid(spec) => format!(
                "{} {} ({})",
                "✓".green(),
                spec.name,
                spec.strategy.kind()
            ),
            SpecEntry::Malformed { name, reason } => {
                format!("{} {name}: {reason}", "✗".red())
            }
        })
        .collect()
}
