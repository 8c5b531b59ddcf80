//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche del run.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Tracking dei contatori di run (total, converted, skipped, errors)
//! - Calcolo byte risparmiati e percentuale di riduzione aggregata
//! - Report finale con statistiche complete
//!
//! ## Contatori tracciati:
//! - **total**: File immagine trovati dalla discovery
//! - **converted**: File effettivamente convertiti
//! - **skipped**: File saltati (destinazione già aggiornata)
//! - **errors**: Errori durante il processing
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:12] [====================>-------------------] 75/150 (50%) a/b c/photo.png
//! ```
//!
//! ## Esempio:
//! ```rust
//! use zolo_image_converter::progress::{ProgressManager, RunStats};
//!
//! let progress = ProgressManager::new(10);
//! let mut stats = RunStats::new();
//! stats.add_converted(2048, 1024);
//! progress.update("photo.jpg");
//! progress.finish(&stats.format_summary());
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for the conversion run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Counters for a single conversion run
#[derive(Debug, Default)]
pub struct RunStats {
    /// Image files found by discovery
    pub total: usize,
    /// Files converted this run
    pub converted: usize,
    /// Files skipped as already up-to-date
    pub skipped: usize,
    /// Per-file failures of any kind
    pub errors: usize,
    /// Sum of source sizes of converted files
    pub total_original_size: u64,
    /// Bytes saved across all converted files
    pub total_bytes_saved: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_converted(&mut self, original_size: u64, new_size: u64) {
        self.converted += 1;
        self.total_original_size += original_size;
        self.total_bytes_saved += original_size.saturating_sub(new_size);
    }

    pub fn add_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        if self.total_original_size > 0 {
            (self.total_bytes_saved as f64 / self.total_original_size as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Total: {} | Converted: {} | Skipped: {} | Errors: {} | Saved: {} ({:.1}%)",
            self.total,
            self.converted,
            self.skipped,
            self.errors,
            crate::file_manager::FileManager::format_size(self.total_bytes_saved),
            self.overall_reduction_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counters() {
        let mut stats = RunStats::new();
        stats.total = 3;
        stats.add_converted(1000, 400);
        stats.add_skipped();
        stats.add_error();

        assert_eq!(stats.converted, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.total_bytes_saved, 600);
        assert_eq!(stats.overall_reduction_percent(), 60.0);
    }

    #[test]
    fn test_stats_reduction_with_no_conversions() {
        let stats = RunStats::new();
        assert_eq!(stats.overall_reduction_percent(), 0.0);
    }

    #[test]
    fn test_converted_larger_output_saturates() {
        let mut stats = RunStats::new();
        stats.add_converted(100, 150);
        assert_eq!(stats.total_bytes_saved, 0);
    }

    #[test]
    fn test_format_summary_contains_counts() {
        let mut stats = RunStats::new();
        stats.total = 2;
        stats.add_converted(2048, 1024);
        stats.add_skipped();

        let summary = stats.format_summary();
        assert!(summary.contains("Total: 2"));
        assert!(summary.contains("Converted: 1"));
        assert!(summary.contains("Skipped: 1"));
        assert!(summary.contains("Errors: 0"));
    }
}
