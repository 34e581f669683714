use crate::models::ResultRecord;

/// Human-readable byte size using binary units, one decimal place above bytes.
///
/// ```
/// use iso_list::formatting::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// assert_eq!(format_size(4_700_000_000), "4.4 GB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{size:.1} {}", UNITS[unit_index])
    }
}

/// Size column of the summary table; `-` when the mirror did not report one.
pub fn format_record_size(record: &ResultRecord) -> String {
    record
        .size
        .map(format_size)
        .unwrap_or_else(|| "-".to_string())
}

/// Digest prefix short enough for a table cell.
pub fn abbreviate_hash(hash: &str) -> String {
    const SHOWN: usize = 12;
    if hash.len() <= SHOWN {
        hash.to_string()
    } else {
        format!("{}…", &hash[..SHOWN])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordSource;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1_572_864), "1.5 MB");
        assert_eq!(format_size(1_073_741_824), "1.0 GB");
        assert_eq!(format_size(1_649_267_441_664), "1.5 TB");
    }

    #[test]
    fn test_format_record_size() {
        let mut record = ResultRecord::unresolved(RecordSource::Web);
        assert_eq!(format_record_size(&record), "-");
        record.size = Some(2048);
        assert_eq!(format_record_size(&record), "2.0 KB");
    }

    #[test]
    fn test_abbreviate_hash() {
        assert_eq!(abbreviate_hash("abc"), "abc");
        assert_eq!(
            abbreviate_hash("8f2b5a6cd6e4b3a4b3e7c5a9f1d2e3c4"),
            "8f2b5a6cd6e4…"
        );
    }
}
