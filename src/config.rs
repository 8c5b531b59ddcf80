//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di conversione
//! - Carica la configurazione dalle variabili d'ambiente (nessun argomento CLI)
//! - Fornisce validazione robusta dei parametri di input
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `source_dir`: Directory sorgente da scansionare (SOURCE_DIR, default: /data/source)
//! - `dest_dir`: Directory di destinazione speculare (DEST_DIR, default: /data/destination)
//! - `max_width`: Larghezza massima output in pixel (MAX_WIDTH, default: 1920)
//! - `max_height`: Altezza massima output in pixel (MAX_HEIGHT, default: 1080)
//! - `quality`: Qualità di ri-encoding (QUALITY, 0-100, default: 85)
//! - `formats`: Estensioni riconosciute, lowercase senza punto (FORMATS, default: jpg,jpeg,png,webp)
//! - `log_level`: Livello minimo di logging (LOG_LEVEL, default: INFO)
//! - `log_file`: File di log con encoding UTF-8 (LOG_FILE, default: /var/log/image-converter.log)
//!
//! ## Gestione valori invalidi:
//! Un valore numerico non parsabile NON fa crashare il job: viene loggato un
//! warning e si usa il default. Un batch giornaliero non deve fallire per un
//! typo in una variabile d'ambiente.
//!
//! ## Esempio:
//! ```rust
//! use zolo_image_converter::Config;
//!
//! let config = Config::from_env();
//! config.validate()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// Configuration for the mirror-and-convert job
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory to scan for images
    pub source_dir: PathBuf,
    /// Root directory for the mirrored output
    pub dest_dir: PathBuf,
    /// Maximum output width in pixels
    pub max_width: u32,
    /// Maximum output height in pixels
    pub max_height: u32,
    /// Re-encode quality (0-100)
    pub quality: u8,
    /// Recognized extensions, lowercase, no leading dot
    pub formats: Vec<String>,
    /// Minimum severity logged
    pub log_level: String,
    /// Log file path (UTF-8, appended)
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("/data/source"),
            dest_dir: PathBuf::from("/data/destination"),
            max_width: 1920,
            max_height: 1080,
            quality: 85,
            formats: parse_formats("jpg,jpeg,png,webp"),
            log_level: "INFO".to_string(),
            log_file: PathBuf::from("/var/log/image-converter.log"),
        }
    }
}

impl Config {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            source_dir: env_path("SOURCE_DIR", defaults.source_dir),
            dest_dir: env_path("DEST_DIR", defaults.dest_dir),
            max_width: env_parse("MAX_WIDTH", defaults.max_width),
            max_height: env_parse("MAX_HEIGHT", defaults.max_height),
            quality: env_parse("QUALITY", defaults.quality),
            formats: match std::env::var("FORMATS") {
                Ok(raw) => parse_formats(&raw),
                Err(_) => defaults.formats,
            },
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_file: env_path("LOG_FILE", defaults.log_file),
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(anyhow::anyhow!("Max dimensions must be greater than 0"));
        }

        if self.quality > 100 {
            return Err(anyhow::anyhow!("Quality must be between 0 and 100"));
        }

        if self.formats.is_empty() {
            return Err(anyhow::anyhow!("At least one image format must be configured"));
        }

        Ok(())
    }
}

/// Split a comma-separated extension list, lowercasing and trimming each entry.
/// Empty entries (trailing commas, double commas) are dropped.
pub fn parse_formats(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split(',')
        .map(|s| s.trim().trim_start_matches('.').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_path(name: &str, default: PathBuf) -> PathBuf {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => PathBuf::from(value),
        _ => default,
    }
}

fn env_parse<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Invalid {} value '{}', using default {}", name, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
