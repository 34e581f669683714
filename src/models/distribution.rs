use serde::Deserialize;
use url::Url;

/// One entry of the `distributions` list exactly as written in the catalog.
///
/// Field names follow the catalog's capitalised keys. Nothing is validated
/// here; see [`SpecEntry::from_raw`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDistribution {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "URL")]
    pub url: Option<String>,
    #[serde(rename = "Extension")]
    pub extension: Option<String>,
    #[serde(rename = "VersionMatch")]
    pub version_match: Option<OneOrMany>,
    #[serde(rename = "HashMatch")]
    pub hash_match: Option<String>,
    #[serde(rename = "PathNavigation")]
    pub path_navigation: Option<OneOrMany>,
    #[serde(rename = "DIRECT")]
    pub direct: Option<String>,
    #[serde(rename = "SHA256")]
    pub sha256: Option<String>,
    #[serde(rename = "Version")]
    pub version: Option<serde_yaml::Value>,
    #[serde(rename = "Size")]
    pub size: Option<u64>,
    #[serde(rename = "WindowsMode")]
    pub windows_mode: Option<String>,
    #[serde(rename = "Edition")]
    pub edition: Option<String>,
    #[serde(rename = "Language")]
    pub language: Option<String>,
    #[serde(rename = "Architecture")]
    pub architecture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionSpec {
    pub name: String,
    /// Reported version, overriding anything derived during resolution
    pub version: Option<String>,
    pub strategy: ResolutionStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStrategy {
    Direct(DirectSpec),
    Vendor(VendorSelector),
    Web(WebSpec),
}

impl ResolutionStrategy {
    pub fn kind(&self) -> &'static str {
        match self {
            ResolutionStrategy::Direct(_) => "direct",
            ResolutionStrategy::Vendor(_) => "vendor_metadata",
            ResolutionStrategy::Web(_) => "web",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectSpec {
    pub url: Url,
    pub sha256: Option<String>,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSelector {
    pub edition: String,
    pub language: String,
    pub architecture: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSpec {
    pub base_url: Url,
    pub extension_pattern: String,
    /// Every element must be a substring of a version directory name
    pub version_match: Vec<String>,
    pub hash_manifest_pattern: Option<String>,
    pub path_navigation: Vec<String>,
    /// Checksum pinned in the catalog; skips the manifest lookup
    pub pinned_sha256: Option<String>,
}

/// A catalog entry after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecEntry {
    Valid(DistributionSpec),
    Malformed { name: String, reason: String },
}

impl SpecEntry {
    pub fn name(&self) -> &str {
        match self {
            SpecEntry::Valid(spec) => &spec.name,
            SpecEntry::Malformed { name, .. } => name,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, SpecEntry::Valid(_))
    }

    /// Validate a raw catalog entry. Returns `None` for entries without a name.
    pub fn from_raw(raw: RawDistribution) -> Option<Self> {
        let name = raw.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
        let name = name.to_string();

        Some(match build_spec(&name, raw) {
            Ok(spec) => SpecEntry::Valid(spec),
            Err(reason) => SpecEntry::Malformed { name, reason },
        })
    }
}

fn build_spec(name: &str, raw: RawDistribution) -> std::result::Result<DistributionSpec, String> {
    let version = raw.version.as_ref().map(scalar_to_string).transpose()?;
    let sha256 = raw
        .sha256
        .as_deref()
        .map(normalize_sha256)
        .transpose()?;

    let direct = non_empty(raw.direct.as_deref());
    let base_url = non_empty(raw.url.as_deref());
    let vendor = raw
        .windows_mode
        .as_deref()
        .is_some_and(|mode| mode.trim().eq_ignore_ascii_case("enabled"));

    let strategy = match (direct, vendor, base_url) {
        (Some(_), true, _) => return Err("both DIRECT and WindowsMode are set".to_string()),
        (Some(_), _, Some(_)) => return Err("both DIRECT and URL are set".to_string()),
        (None, true, Some(_)) => return Err("both WindowsMode and URL are set".to_string()),
        (Some(direct), false, None) => ResolutionStrategy::Direct(DirectSpec {
            url: parse_absolute_url(direct)?,
            sha256,
            size: raw.size,
        }),
        (None, true, None) => ResolutionStrategy::Vendor(VendorSelector {
            edition: required(raw.edition.as_deref(), "Edition")?,
            language: required(raw.language.as_deref(), "Language")?,
            architecture: required(raw.architecture.as_deref(), "Architecture")?,
        }),
        (None, false, Some(base_url)) => {
            let extension_pattern = required(raw.extension.as_deref(), "Extension")?;
            let version_match = raw
                .version_match
                .map(OneOrMany::into_vec)
                .unwrap_or_default()
                .into_iter()
                .filter(|token| !token.is_empty())
                .collect();
            let path_navigation = raw
                .path_navigation
                .map(OneOrMany::into_vec)
                .unwrap_or_default()
                .into_iter()
                .map(|hop| hop.trim_matches('/').to_string())
                .filter(|hop| !hop.is_empty())
                .collect();

            ResolutionStrategy::Web(WebSpec {
                base_url: parse_absolute_url(base_url)?,
                extension_pattern,
                version_match,
                hash_manifest_pattern: non_empty(raw.hash_match.as_deref()).map(str::to_string),
                path_navigation,
                pinned_sha256: sha256,
            })
        }
        (None, false, None) => {
            return Err("one of DIRECT, WindowsMode: enabled, or URL is required".to_string());
        }
    };

    Ok(DistributionSpec {
        name: name.to_string(),
        version,
        strategy,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required(value: Option<&str>, field: &str) -> std::result::Result<String, String> {
    non_empty(value)
        .map(str::to_string)
        .ok_or_else(|| format!("missing {field}"))
}

fn parse_absolute_url(value: &str) -> std::result::Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL '{value}': {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported URL scheme '{other}' in '{value}'")),
    }
}

fn normalize_sha256(value: &str) -> std::result::Result<String, String> {
    let value = value.trim();
    match hex::decode(value) {
        Ok(bytes) if bytes.len() == 32 => Ok(value.to_ascii_lowercase()),
        _ => Err(format!("SHA256 '{value}' is not a 64-digit hex digest")),
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> std::result::Result<String, String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.trim().to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        _ => Err("Version must be a scalar".to_string()),
    }
}
