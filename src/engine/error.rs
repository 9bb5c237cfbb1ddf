//! Defines the error types for the fragmentation engine.

use std::fmt::Debug;
use thiserror::Error;

/// Errors that can occur while configuring or running fragmentation.
#[derive(Debug, Error)]
pub enum FragmentError {
    /// A rule name did not match any known fragmentation rule.
    #[error("unknown fragmentation rule '{name}'")]
    UnknownRule { name: String },

    /// A requested capability exists in the API but has no implementation yet.
    #[error("not implemented: {feature}")]
    NotImplemented { feature: &'static str },

    /// A mechanism expected a bond that the molecule does not contain.
    #[error("no bond between atoms {0}")]
    MissingBond(String),

    /// A mechanism was handed an atom ID the molecule does not contain.
    #[error("no atom with ID {0}")]
    MissingAtom(String),

    /// An error occurred while reading a configuration file.
    #[error("File I/O error for '{path}': {source}")]
    ConfigIo {
        path: String,
        source: std::io::Error,
    },

    /// An error occurred while parsing a TOML configuration file.
    #[error("TOML parsing error for '{path}': {source}")]
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },
}

impl FragmentError {
    /// Builds a [`FragmentError::MissingBond`] from the offending atom pair.
    pub fn missing_bond(a: impl Debug, b: impl Debug) -> Self {
        FragmentError::MissingBond(format!("{a:?} and {b:?}"))
    }

    /// Builds a [`FragmentError::MissingAtom`] from the offending ID.
    pub fn missing_atom(id: impl Debug) -> Self {
        FragmentError::MissingAtom(format!("{id:?}"))
    }
}
