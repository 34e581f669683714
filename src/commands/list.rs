use crate::catalog::Catalog;
use crate::config::IsoListConfig;
use crate::error::Result;
use crate::http::HttpFetcher;
use crate::models::{ResolutionStrategy, SpecEntry};
use comfy_table::{Cell, Color, Table};

pub struct ListCommand<'a> {
    config: &'a IsoListConfig,
}

impl<'a> ListCommand<'a> {
    pub fn new(config: &'a IsoListConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self) -> Result<()> {
        let fetcher = HttpFetcher::from_config(self.config);
        let catalog = Catalog::load(&self.config.distros_source, &fetcher)?;

        if catalog.is_empty() {
            println!("No distributions configured in {}", self.config.distros_source);
            return Ok(());
        }

        println!("{}", catalog_table(&catalog));
        println!("{} distributions", catalog.len());
        Ok(())
    }
}

fn catalog_table(catalog: &Catalog) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new("Distribution"),
        Cell::new("Strategy"),
        Cell::new("Target"),
    ]);

    for entry in catalog.entries() {
        let row = match entry {
            SpecEntry::Valid(spec) => {
                let target = match &spec.strategy {
                    ResolutionStrategy::Direct(direct) => direct.url.to_string(),
                    ResolutionStrategy::Vendor(selector) => format!(
                        "{} / {} / {}",
                        selector.edition, selector.language, selector.architecture
                    ),
                    ResolutionStrategy::Web(web) => {
                        format!("{} ({})", web.base_url, web.extension_pattern)
                    }
                };
                vec![
                    Cell::new(&spec.name),
                    Cell::new(spec.strategy.kind()),
                    Cell::new(target),
                ]
            }
            SpecEntry::Malformed { name, reason } => vec![
                Cell::new(name),
                Cell::new("invalid").fg(Color::Red),
                Cell::new(reason),
            ],
        };
        table.add_row(row);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_table() {
        let catalog = Catalog::from_yaml_str(
            r#"
distributions:
  - Name: Arch Linux
    URL: https://geo.mirror.pkgbuild.com/iso/
    Extension: "archlinux-*-x86_64.iso"
  - Name: Windows 11
    WindowsMode: enabled
    Edition: Professional
    Language: en-us
    Architecture: x64
"#,
        )
        .unwrap();

        let rendered = catalog_table(&catalog).to_string();
        assert!(rendered.contains("Arch Linux"));
        assert!(rendered.contains("https://geo.mirror.pkgbuild.com/iso/"));
        assert!(rendered.contains("Windows 11"));
        assert!(rendered.contains("vendor_metadata"));
        assert!(rendered.contains("Professional / en-us / x64"));
    }
}
