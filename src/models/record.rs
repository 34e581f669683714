use crate::version::UNKNOWN_VERSION;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HashType {
    Sha1,
    Sha256,
    Sha512,
}

impl HashType {
    /// Classify a hex digest by its length.
    pub fn from_hex_len(len: usize) -> Option<Self> {
        match len {
            40 => Some(HashType::Sha1),
            64 => Some(HashType::Sha256),
            128 => Some(HashType::Sha512),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashType::Sha1 => "SHA1",
            HashType::Sha256 => "SHA256",
            HashType::Sha512 => "SHA512",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Web,
    VendorMetadata,
    Direct,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::Web => "web",
            RecordSource::VendorMetadata => "vendor_metadata",
            RecordSource::Direct => "direct",
        }
    }
}

/// Output record for one distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub url: Option<String>,
    pub hash_type: Option<HashType>,
    pub hash_value: Option<String>,
    pub version: String,
    pub size: Option<u64>,
    pub source: RecordSource,
}

impl ResultRecord {
    /// The record emitted when resolution failed: every field null, version unknown.
    pub fn unresolved(source: RecordSource) -> Self {
        Self {
            url: None,
            hash_type: None,
            hash_value: None,
            version: UNKNOWN_VERSION.to_string(),
            size: None,
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved(ResultRecord),
    Unresolved { source: RecordSource, reason: String },
}

impl Outcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Resolved(_))
    }

    pub fn record(&self) -> ResultRecord {
        match self {
            Outcome::Resolved(record) => record.clone(),
            Outcome::Unresolved { source, .. } => ResultRecord::unresolved(*source),
        }
    }

    pub fn source(&self) -> RecordSource {
        match self {
            Outcome::Resolved(record) => record.source,
            Outcome::Unresolved { source, .. } => *source,
        }
    }
}

/// Every processed distribution in catalog order, serialized as a JSON object
/// keyed by distribution name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    entries: Vec<(String, Outcome)>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: String, outcome: Outcome) {
        self.entries.push((name, outcome));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.entries.iter().map(|(name, outcome)| (name.as_str(), outcome))
    }

    pub fn get(&self, name: &str) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, outcome)| outcome)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_resolved()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.len() - self.resolved_count()
    }
}

impl FromIterator<(String, Outcome)> for ResultSet {
    fn from_iter<T: IntoIterator<Item = (String, Outcome)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for ResultSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, outcome) in &self.entries {
            map.serialize_entry(name, &outcome.record())?;
        }
        map.end()
    }
}
