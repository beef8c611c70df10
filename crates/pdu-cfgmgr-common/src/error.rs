//! Error types for PDU configuration generation.
//!
//! This module defines the error types used throughout the pdu crates.
//! All errors implement `std::error::Error` via `thiserror`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use pdu_types::ParseError;

/// Result type alias for PDU configuration operations.
pub type PduCfgResult<T> = Result<T, PduCfgError>;

/// Errors that can occur while generating a PDU command script.
#[derive(Debug, Error)]
pub enum PduCfgError {
    /// Failed to read an inventory file.
    #[error("Failed to read input file '{}': {source}", path.display())]
    InputFile {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Server port list ran out before every server got its outlets.
    #[error(
        "Ran out of server ports at host '{host}': needs {needed} port(s), {remaining} left"
    )]
    PortsExhausted {
        /// The host that could not be assigned.
        host: String,
        /// Ports required per server.
        needed: usize,
        /// Ports still available.
        remaining: usize,
    },

    /// Host and port sections do not line up.
    #[error("Section '{section}' has {hosts} host(s) but {ports} port(s)")]
    SectionMismatch {
        /// The section name ("switches" or "servers").
        section: String,
        /// Number of hosts in the section.
        hosts: usize,
        /// Number of ports in the section.
        ports: usize,
    },

    /// A hostname or port cannot be used as a single command token.
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidToken {
        /// The kind of token ("hostname" or "port").
        field: String,
        /// The offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// A configuration value failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Address and subnet do not yield a usable gateway.
    #[error("No usable gateway for {address}/{mask}: {message}")]
    InvalidNetwork {
        /// The device address.
        address: String,
        /// The subnet mask.
        mask: String,
        /// Error message.
        message: String,
    },

    /// Reading an answer from the operator failed.
    #[error("Failed to read {field} from terminal: {source}")]
    Terminal {
        /// The field being prompted for.
        field: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Input closed while a value was still required.
    #[error("Input closed while waiting for {field}")]
    InputClosed {
        /// The field being prompted for.
        field: String,
    },
}

impl PduCfgError {
    /// Creates an input file error.
    pub fn input_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::InputFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a ports exhausted error.
    pub fn ports_exhausted(host: impl Into<String>, needed: usize, remaining: usize) -> Self {
        Self::PortsExhausted {
            host: host.into(),
            needed,
            remaining,
        }
    }

    /// Creates a section mismatch error.
    pub fn section_mismatch(section: impl Into<String>, hosts: usize, ports: usize) -> Self {
        Self::SectionMismatch {
            section: section.into(),
            hosts,
            ports,
        }
    }

    /// Creates an invalid token error.
    pub fn invalid_token(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidToken {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid network error.
    pub fn invalid_network(
        address: impl ToString,
        mask: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidNetwork {
            address: address.to_string(),
            mask: mask.to_string(),
            message: message.into(),
        }
    }

    /// Returns true if this error comes from a bad configuration choice
    /// that the operator can correct by answering again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PduCfgError::InvalidConfig { .. } | PduCfgError::Parse(_)
        )
    }
}
