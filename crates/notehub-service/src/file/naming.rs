//! Storage-key generation and human-readable sizes.

use chrono::Utc;
use uuid::Uuid;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with base-1024 units and at most one decimal.
///
/// `1536` becomes `"1.5 KB"`, `1024` becomes `"1 KB"`. Zero and negative
/// values become `"0 B"`.
pub fn format_file_size(size_bytes: i64) -> String {
    if size_bytes <= 0 {
        return "0 B".to_string();
    }

    let mut size = size_bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{size:.1}");
    let trimmed = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

/// A collision-free storage key for an uploaded file:
/// `{unix_seconds}_{uuid_hex}` plus the lowercased extension, if any.
pub fn generate_unique_filename(original: &str) -> String {
    let unique_id = format!("{}_{}", Utc::now().timestamp(), Uuid::new_v4().simple());
    match original.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{unique_id}.{}", ext.to_lowercase()),
        _ => unique_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(-12), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 / 2), "1.5 GB");
        assert_eq!(format_file_size(1024_i64.pow(5)), "1024 TB");
    }

    #[test]
    fn test_unique_filename_shape() {
        let key = generate_unique_filename("Voice Memo.M4A");
        let (stem, ext) = key.rsplit_once('.').unwrap();
        assert_eq!(ext, "m4a");

        let (secs, hex) = stem.split_once('_').unwrap();
        assert!(secs.parse::<i64>().unwrap() > 1_600_000_000);
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_unique_filename_without_extension() {
        let key = generate_unique_filename("README");
        assert!(!key.contains('.'));
        assert_ne!(key, generate_unique_filename("README"));
        assert!(!generate_unique_filename("trailing.").contains('.'));
    }
}
