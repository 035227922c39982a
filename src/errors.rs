/*!
 * Error types for the duobook application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while reading or writing an EPUB bundle
#[derive(Error, Debug)]
pub enum BookError {
    /// Error from an I/O operation on the archive
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the zip container
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error parsing the package XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Error decoding archive text as UTF-8
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The bundle is structurally not a usable EPUB
    #[error("Invalid EPUB: {0}")]
    InvalidEpub(String),
}

/// Errors that can occur during chapter translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The total number of translated sections does not match the input.
    /// Carries both sides so the mismatch can be diagnosed from the error alone.
    #[error("Translated sections length is different from original. Translated: {translated:?}. Original: {original:?}")]
    CountMismatch {
        /// The concatenated per-batch results collected so far
        translated: Vec<String>,
        /// The full ordered input section list
        original: Vec<String>,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the EPUB container
    #[error("Book error: {0}")]
    Book(#[from] BookError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
