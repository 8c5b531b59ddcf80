//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file e la discovery delle immagini.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva di file immagine sotto la directory sorgente
//! - Matching delle estensioni configurate (forma lowercase E uppercase)
//! - Lettura di dimensione e modification time dei file
//! - Formattazione human-readable delle dimensioni
//! - Calcolo percentuale di riduzione
//!
//! ## Matching estensioni:
//! Per ogni formato configurato vengono accettate esplicitamente la forma
//! lowercase (`.png`) e la forma uppercase (`.PNG`). Le forme miste come
//! `.Png` NON matchano: è una scelta comportamentale deliberata, non viene
//! applicato case-folding generico.
//!
//! ## Esempio:
//! ```rust,no_run
//! use std::path::Path;
//! use zolo_image_converter::file_manager::FileManager;
//!
//! let formats = vec!["jpg".to_string(), "png".to_string()];
//! let files = FileManager::find_image_files(Path::new("/data/source"), &formats)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Get a file's size in bytes and its last-modified timestamp
    pub fn file_info(path: &Path) -> Result<(u64, SystemTime)> {
        let metadata = std::fs::metadata(path)?;
        Ok((metadata.len(), metadata.modified()?))
    }

    /// Find all regular files under `root` whose extension matches one of the
    /// configured formats. Walk order is deterministic within a run.
    pub fn find_image_files(root: &Path, formats: &[String]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if Self::matches_formats(path, formats) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Count discovered files per configured format, for the scan report.
    /// Keys are the lowercase configured extensions.
    pub fn count_by_format(files: &[PathBuf], formats: &[String]) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for file in files {
            for format in formats {
                if Self::matches_format(file, format) {
                    *counts.entry(format.clone()).or_insert(0) += 1;
                    break;
                }
            }
        }
        counts
    }

    /// Check whether a path's extension matches any configured format
    pub fn matches_formats(path: &Path, formats: &[String]) -> bool {
        formats.iter().any(|f| Self::matches_format(path, f))
    }

    /// Exact match against the lowercase or uppercase form of one format.
    /// Mixed-case extensions (`.Jpg`) intentionally do not match.
    pub fn matches_format(path: &Path, format: &str) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext == format || ext == format.to_uppercase(),
            None => false,
        }
    }

    /// Check if a destination extension is a JPEG variant
    pub fn is_jpeg_extension(path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg"),
            None => false,
        }
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn formats() -> Vec<String> {
        vec![
            "jpg".to_string(),
            "jpeg".to_string(),
            "png".to_string(),
            "webp".to_string(),
        ]
    }

    #[test]
    fn test_matches_lowercase_and_uppercase_only() {
        let formats = formats();
        assert!(FileManager::matches_formats(Path::new("photo.png"), &formats));
        assert!(FileManager::matches_formats(Path::new("photo.PNG"), &formats));
        assert!(FileManager::matches_formats(Path::new("photo.jpg"), &formats));
        // Mixed case is deliberately rejected
        assert!(!FileManager::matches_formats(Path::new("photo.Png"), &formats));
        assert!(!FileManager::matches_formats(Path::new("photo.Jpg"), &formats));
        // Unknown extensions and extension-less files never match
        assert!(!FileManager::matches_formats(Path::new("video.mp4"), &formats));
        assert!(!FileManager::matches_formats(Path::new("README"), &formats));
    }

    #[test]
    fn test_is_jpeg_extension() {
        assert!(FileManager::is_jpeg_extension(Path::new("a.jpg")));
        assert!(FileManager::is_jpeg_extension(Path::new("a.JPEG")));
        assert!(!FileManager::is_jpeg_extension(Path::new("a.png")));
    }

    #[test]
    fn test_find_image_files_recurses_and_preserves_names() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b c");
        std::fs::create_dir_all(&nested).unwrap();

        std::fs::write(nested.join("photo.PNG"), b"not a real png").unwrap();
        std::fs::write(temp.path().join("x.jpg"), b"not a real jpg").unwrap();
        std::fs::write(temp.path().join("notes.txt"), b"ignored").unwrap();

        let files = FileManager::find_image_files(temp.path(), &formats()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("a/b c/photo.PNG")));
        assert!(files.iter().any(|f| f.ends_with("x.jpg")));
    }

    #[test]
    fn test_count_by_format_counts_each_file_once() {
        let files = vec![
            PathBuf::from("a.jpg"),
            PathBuf::from("b.JPG"),
            PathBuf::from("c.png"),
        ];
        let counts = FileManager::count_by_format(&files, &formats());
        assert_eq!(counts.get("jpg"), Some(&2));
        assert_eq!(counts.get("png"), Some(&1));
        assert_eq!(counts.get("webp"), None);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(2048), "2.0 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_calculate_reduction() {
        assert_eq!(FileManager::calculate_reduction(1000, 250), 75.0);
        assert_eq!(FileManager::calculate_reduction(0, 100), 0.0);
    }
}
