use crate::error::{IsoListError, Result};
use crate::scrape::walker::DEFAULT_MAX_HOPS;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "iso-list.toml";
const ENV_PREFIX: &str = "ISO_LIST";
const DEFAULT_DISTROS_SOURCE: &str = "distros.yaml";
const DEFAULT_OUTPUT: &str = "links.json";
const DEFAULT_PARALLEL: usize = 1;
const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_RETRIES: usize = 1;
const PRODUCTS_CACHE_DIR: &str = "download-windows-esd";
const PRODUCTS_FILE_NAME: &str = "products.xml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsoListConfig {
    /// Path or http(s) URL of the distribution catalog
    #[serde(default = "default_distros_source")]
    pub distros_source: String,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Number of distributions resolved at the same time
    #[serde(default = "default_parallel")]
    pub parallel: usize,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub walk: WalkConfig,

    #[serde(default)]
    pub windows: WindowsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts after a connection-level failure
    #[serde(default = "default_retries")]
    pub retries: usize,

    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkConfig {
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowsConfig {
    #[serde(default)]
    pub products_xml: Option<PathBuf>,
}

impl Default for IsoListConfig {
    fn default() -> Self {
        Self {
            distros_source: default_distros_source(),
            output: default_output(),
            parallel: DEFAULT_PARALLEL,
            http: HttpConfig::default(),
            walk: WalkConfig::default(),
            windows: WindowsConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            user_agent: None,
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

fn default_distros_source() -> String {
    DEFAULT_DISTROS_SOURCE.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_parallel() -> usize {
    DEFAULT_PARALLEL
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_retries() -> usize {
    DEFAULT_RETRIES
}

fn default_max_hops() -> usize {
    DEFAULT_MAX_HOPS
}

impl IsoListConfig {
    /// Load configuration from `config_path` (or `iso-list.toml` in the working
    /// directory when absent), layered under `ISO_LIST_*` environment variables.
    ///
    /// An explicitly given file must exist; the default one is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let (path, required) = match config_path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE_NAME), false),
        };

        if !path.exists() && !required {
            log::debug!("Config file not found at {path:?}, using defaults");
        }

        let settings = Config::builder()
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: IsoListConfig = settings.try_deserialize()?;
        config.validate()?;

        log::debug!("Loaded configuration: {config:?}");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.parallel == 0 {
            return Err(IsoListError::InvalidConfig(
                "parallel must be at least 1".to_string(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(IsoListError::InvalidConfig(
                "http.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.walk.max_hops == 0 {
            return Err(IsoListError::InvalidConfig(
                "walk.max_hops must be at least 1".to_string(),
            ));
        }
        if self.distros_source.trim().is_empty() {
            return Err(IsoListError::InvalidConfig(
                "distros_source must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// Location of the cached Windows products.xml
    pub fn products_xml_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.windows.products_xml {
            return Ok(path.clone());
        }

        dirs::cache_dir()
            .map(|dir| dir.join(PRODUCTS_CACHE_DIR).join(PRODUCTS_FILE_NAME))
            .ok_or_else(|| {
                IsoListError::ConfigError(
                    "Could not determine the user cache directory; set windows.products_xml"
                        .to_string(),
                )
            })
    }
}
