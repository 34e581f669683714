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

use crate::error::{IsoListError, Result};
use crate::models::ResultSet;
use log::debug;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Pretty-printed JSON with a four space indent.
pub fn to_json_string(results: &ResultSet) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    results.serialize(&mut serializer)?;
    buffer.push(b'\n');

    String::from_utf8(buffer)
        .map_err(|e| IsoListError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Replace `path` with the serialized results in one rename.
///
/// The temporary file lives next to the target so the rename never crosses
/// a filesystem boundary.
pub fn write_results(results: &ResultSet, path: &Path) -> Result<()> {
    let json = to_json_string(results)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(json.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| IsoListError::Io(e.error))?;

    debug!("Wrote {} records to {}", results.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HashType, Outcome, RecordSource, ResultRecord};
    use tempfile::TempDir;

    fn sample() -> ResultSet {
        let mut results = ResultSet::new();
        results.push(
            "Debian".to_string(),
            Outcome::Resolved(ResultRecord {
                url: Some("https://mirror.test/debian-12.10.0-amd64-netinst.iso".to_string()),
                hash_type: Some(HashType::Sha256),
                hash_value: Some("ab".repeat(32)),
                version: "12.10.0".to_string(),
                size: Some(663_748_608),
                source: RecordSource::Web,
            }),
        );
        results.push(
            "Arch".to_string(),
            Outcome::Unresolved {
                source: RecordSource::Web,
                reason: "HTTP 404".to_string(),
            },
        );
        results
    }

    #[test]
    fn test_json_layout() {
        let json = to_json_string(&sample()).unwrap();

        assert!(json.starts_with("{\n    \"Debian\": {\n        \"url\": "));
        assert!(json.contains("\"hash_type\": \"SHA256\""));
        assert!(json.contains("\"source\": \"web\""));
        assert!(json.ends_with("}\n"));

        // Catalog order, not alphabetical
        let debian = json.find("\"Debian\"").unwrap();
        let arch = json.find("\"Arch\"").unwrap();
        assert!(debian < arch);
    }

    #[test]
    fn test_unresolved_fields_are_null() {
        let json = to_json_string(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let arch = &value["Arch"];
        assert!(arch["url"].is_null());
        assert!(arch["hash_type"].is_null());
        assert!(arch["hash_value"].is_null());
        assert!(arch["size"].is_null());
        assert_eq!(arch["version"], "Unknown");
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("links.json");

        write_results(&sample(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_json_string(&sample()).unwrap());
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("links.json");
        fs::write(&path, "stale").unwrap();

        write_results(&ResultSet::new(), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_identical_results_serialize_identically() {
        assert_eq!(
            to_json_string(&sample()).unwrap(),
            to_json_string(&sample()).unwrap()
        );
    }
}
