//! # ZoLo Image Converter - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Inizializzazione del sistema di logging con `tracing` (stdout + file UTF-8)
//! - Caricamento della configurazione dalle variabili d'ambiente (nessun CLI)
//! - Creazione del converter e avvio del run
//!
//! ## Flusso di esecuzione:
//! 1. Configura il logging da LOG_LEVEL e LOG_FILE
//! 2. Legge la configurazione dalle variabili d'ambiente
//! 3. Istanzia ImageConverter e processa la directory sorgente
//!
//! ## Esempio di utilizzo (cron giornaliero):
//! ```bash
//! SOURCE_DIR=/data/source DEST_DIR=/data/destination QUALITY=85 image-converter
//! ```

use anyhow::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zolo_image_converter::{Config, ImageConverter};

/// Log to stdout and append to the configured log file. If the file cannot
/// be opened the job degrades to stdout-only instead of failing.
fn init_logging() {
    let defaults = Config::default();
    let level = std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level);
    let log_file = std::env::var("LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or(defaults.log_file);

    // Accept syslog-style names alongside tracing's own
    let directive = match level.to_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" => "error".to_string(),
        other => other.to_string(),
    };
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

    match OpenOptions::new().create(true).append(true).open(&log_file) {
        Ok(file) => {
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        Err(e) => {
            registry.init();
            warn!(
                "Cannot open log file {}, logging to stdout only: {}",
                log_file.display(),
                e
            );
        }
    }
}

fn main() -> Result<()> {
    init_logging();

    let config = Config::from_env();

    let mut converter = ImageConverter::new(config)?;
    converter.process_directory()?;

    Ok(())
}
