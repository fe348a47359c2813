//! Generator error types.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during generation.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Prisma Effect Generator: output path not configured.")]
    #[diagnostic(
        code(prisma_effect_kysely::config::missing_output),
        help("Add \"output\" to your generator block in schema.prisma")
    )]
    MissingOutput,

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to write '{}': {message}", path.display())]
    #[diagnostic(code(prisma_effect_kysely::io::write_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Invalid DMMF document: {message}")]
    #[diagnostic(
        code(prisma_effect_kysely::input::invalid_document),
        help("Expected the JSON DMMF produced by `prisma generate`, with a `datamodel` object")
    )]
    InvalidDocument {
        message: String,
    },
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}
