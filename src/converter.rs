//! # Main Converter Orchestrator Module
//!
//! Questo è il modulo principale che orchestra il run di mirroring e conversione.
//!
//! ## Responsabilità:
//! - Coordinamento di discovery, staleness check e transform
//! - Mirroring della struttura directory sorgente sotto la destinazione
//! - Gestione dei contatori di run e del report finale
//! - Error handling a livello di singolo file (nessun errore abortisce il run)
//!
//! ## Flusso di esecuzione:
//! 1. **Banner**: Logga configurazione del run (source, dest, dimensioni, qualità)
//! 2. **Source check**: Directory sorgente mancante → error log e return immediato
//! 3. **File discovery**: Trova tutte le immagini con le estensioni configurate
//! 4. **Sequential processing**: Un file alla volta, nell'ordine di discovery
//! 5. **Reporting**: Statistiche finali (total, converted, skipped, errors)
//!
//! ## Processing pipeline per file:
//! 1. Calcola path relativo e path di destinazione speculare
//! 2. Crea le directory intermedie di destinazione (spazi e non-ASCII preservati)
//! 3. Staleness check: destinazione mancante o più vecchia della sorgente?
//! 4. Transform con ImageProcessor, log di dimensioni prima/dopo e riduzione
//!
//! ## Staleness policy:
//! Timestamp uguali contano come "up to date": su run ripetuti entro la stessa
//! risoluzione di timestamp non viene rifatto lavoro.
//!
//! ## Error handling:
//! - Source root assente: fatale per il run, ma exit code resta 0
//! - Errori di transform o di filesystem sul singolo file: loggati, contati,
//!   il loop continua col file successivo
//! - Nessun retry: ogni file viene tentato esattamente una volta per run
//!
//! ## Esempio:
//! ```rust,no_run
//! use zolo_image_converter::{Config, ImageConverter};
//!
//! let mut converter = ImageConverter::new(Config::from_env())?;
//! converter.process_directory()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::{
    config::Config,
    file_manager::FileManager,
    image_processor::ImageProcessor,
    progress::{ProgressManager, RunStats},
};
use anyhow::Result;
use std::path::Path;
use tracing::{error, info, warn};

/// Mirror-and-convert job over one source tree
pub struct ImageConverter {
    config: Config,
    stats: RunStats,
}

impl ImageConverter {
    /// Create a new converter instance
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            stats: RunStats::new(),
        })
    }

    /// Counters accumulated by the last `process_directory` call
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Check if a file needs processing: destination missing, or source
    /// strictly newer. Equal timestamps count as up-to-date.
    pub fn should_process(source: &Path, dest: &Path) -> bool {
        if !dest.exists() {
            return true;
        }

        match (FileManager::file_info(source), FileManager::file_info(dest)) {
            (Ok((_, source_mtime)), Ok((_, dest_mtime))) => source_mtime > dest_mtime,
            // Stat failed on a path that exists, reprocess to be safe
            _ => true,
        }
    }

    /// Process all images in the source directory, preserving structure
    pub fn process_directory(&mut self) -> Result<()> {
        info!("{}", "=".repeat(60));
        info!("ZoLo Image Converter - Starting new run");
        info!("Source: {}", self.config.source_dir.display());
        info!("Destination: {}", self.config.dest_dir.display());
        info!("Max dimensions: {}x{}", self.config.max_width, self.config.max_height);
        info!("Quality: {}%", self.config.quality);
        info!("{}", "=".repeat(60));

        if !self.config.source_dir.exists() {
            error!(
                "Source directory does not exist: {}",
                self.config.source_dir.display()
            );
            return Ok(());
        }

        std::fs::create_dir_all(&self.config.dest_dir)?;

        info!("Scanning for images in: {}", self.config.source_dir.display());
        let files = FileManager::find_image_files(&self.config.source_dir, &self.config.formats)?;

        for (format, count) in FileManager::count_by_format(&files, &self.config.formats) {
            info!("  Found {} .{} files", count, format);
        }

        self.stats.total = files.len();
        info!("Total images found: {}", self.stats.total);

        if files.is_empty() {
            warn!("No images found to process!");
            info!(
                "Check if source directory has images: {}",
                self.config.source_dir.display()
            );
            info!("Supported formats: {}", self.config.formats.join(", "));
            return Ok(());
        }

        info!("Processing images...");
        let progress = ProgressManager::new(files.len() as u64);

        // Strictly sequential: one file is fully handled before the next
        for (idx, source_file) in files.iter().enumerate() {
            if let Err(e) = Self::process_file(
                &self.config,
                &mut self.stats,
                &progress,
                idx + 1,
                source_file,
            ) {
                error!("  ↳ Error processing {}: {}", source_file.display(), e);
                self.stats.add_error();
            }
        }

        progress.finish(&self.stats.format_summary());

        info!("{}", "=".repeat(60));
        info!("Processing complete!");
        info!("Total files: {}", self.stats.total);
        info!("Converted: {}", self.stats.converted);
        info!("Skipped: {}", self.stats.skipped);
        info!("Errors: {}", self.stats.errors);
        info!("{}", "=".repeat(60));

        Ok(())
    }

    /// Handle one file end to end. Transform failures are absorbed here;
    /// the returned error covers orchestration failures only (path math,
    /// directory creation, stat).
    fn process_file(
        config: &Config,
        stats: &mut RunStats,
        progress: &ProgressManager,
        idx: usize,
        source_file: &Path,
    ) -> Result<()> {
        let relative_path = source_file.strip_prefix(&config.source_dir)?;
        let dest_file = config.dest_dir.join(relative_path);

        info!("[{}/{}] {}", idx, stats.total, relative_path.display());
        progress.update(&relative_path.to_string_lossy());

        // Mirror intermediate directories, spaces and non-ASCII included
        if let Some(parent) = dest_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !Self::should_process(source_file, &dest_file) {
            info!("  ↳ Skipped (already up-to-date)");
            stats.add_skipped();
            return Ok(());
        }

        let (size_before, _) = FileManager::file_info(source_file)?;

        match ImageProcessor::transform(source_file, &dest_file, config) {
            Ok(()) => {
                let (size_after, _) = FileManager::file_info(&dest_file)?;
                let reduction = FileManager::calculate_reduction(size_before, size_after);
                info!(
                    "  ↳ Success: {} → {} ({:.1}% reduction)",
                    FileManager::format_size(size_before),
                    FileManager::format_size(size_after),
                    reduction
                );
                stats.add_converted(size_before, size_after);
            }
            Err(e) => {
                error!("  ↳ Failed to convert {}: {}", source_file.display(), e);
                stats.add_error();
            }
        }

        Ok(())
    }
}
