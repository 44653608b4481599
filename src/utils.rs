//! Helpers for URL normalization, logging, and file system checks.

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Crop/resize parameters forced onto every Index.hr image URL so slides
/// always receive a predictably sized image instead of whatever variant the
/// listing happened to reference.
pub const IMAGE_CROP_QUERY: &str = "width=1200&height=630&mode=crop";

/// Replace an image URL's query string with the fixed crop parameters.
///
/// Index.hr image URLs carry sizing and tracking parameters after `?`;
/// everything after the first `?` is dropped and replaced. A URL without a
/// query string is passed through unchanged.
pub fn normalize_image_url(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => format!("{base}?{IMAGE_CROP_QUERY}"),
        None => url.to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long payloads (raw JSON-LD blocks, HTML bodies) are cut to `max` bytes
/// with an ellipsis and byte count appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", &s[..max], s.len() - max)
    }
}

/// Ensure the directory an output file lands in exists and is writable.
///
/// Creates the parent directory if needed, then performs a write test by
/// creating and immediately deleting a probe file. Run before any network
/// work so a read-only target fails the run early instead of after a full
/// scrape.
#[instrument(level = "info", skip_all, fields(path = %output_path))]
pub async fn ensure_writable_parent(output_path: &str) -> Result<(), Box<dyn Error>> {
    let parent = match Path::new(output_path).parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    if let Err(e) = fs::create_dir_all(&parent).await {
        return Err(Box::new(e));
    }
    let probe_path = parent.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_is_replaced_with_crop_params() {
        assert_eq!(
            normalize_image_url("https://www.index.hr/img/a.jpg?w=300&h=200&x=1"),
            "https://www.index.hr/img/a.jpg?width=1200&height=630&mode=crop"
        );
    }

    #[test]
    fn url_without_query_passes_through() {
        assert_eq!(
            normalize_image_url("https://www.index.hr/img/a.jpg"),
            "https://www.index.hr/img/a.jpg"
        );
    }

    #[test]
    fn only_the_first_question_mark_splits() {
        assert_eq!(
            normalize_image_url("https://x.hr/a.jpg?w=1?h=2"),
            "https://x.hr/a.jpg?width=1200&height=630&mode=crop"
        );
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[tokio::test]
    async fn writable_parent_accepts_bare_filename() {
        assert!(ensure_writable_parent("index.html").await.is_ok());
    }
}
