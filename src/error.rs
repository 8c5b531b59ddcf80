//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `ConvertError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `Image`: Errori di decodifica/elaborazione immagini (formati corrotti, etc.)
//! - `Encode`: Errori degli encoder esterni (mozjpeg, webp)
//! - `UnsupportedFormat`: Estensione di output non supportata
//! - `Validation`: Errori di validazione input
//!
//! ## Nota sul design:
//! Nessun errore di conversione abortisce il run: il loop principale cattura
//! ogni `ConvertError` a livello di singolo file, lo logga e incrementa il
//! contatore errori prima di passare al file successivo.

/// Custom error types for the image conversion pipeline
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("File validation error: {0}")]
    Validation(String),
}
