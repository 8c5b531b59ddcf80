//! # ZoLo Image Converter Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per i test
//!
//! ## Architettura dei moduli:
//! - `config`: Configurazione da variabili d'ambiente e validazione parametri
//! - `error`: Tipi di errore custom per le diverse operazioni
//! - `file_manager`: Discovery ricorsiva e operazioni sui file
//! - `image_processor`: Trasformazione immagini (decode, downscale, re-encode)
//! - `converter`: Orchestratore del loop di mirroring incrementale
//! - `progress`: Progress tracking e contatori di run
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use zolo_image_converter::{Config, ImageConverter};
//!
//! let config = Config::from_env();
//! let mut converter = ImageConverter::new(config)?;
//! converter.process_directory()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod file_manager;
pub mod image_processor;
pub mod progress;

pub use config::Config;
pub use converter::ImageConverter;
pub use error::ConvertError;
pub use progress::RunStats;
