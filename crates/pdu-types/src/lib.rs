//! Common types for PDU outlet configuration.
//!
//! This crate provides type-safe representations of the primitives used
//! when generating PDU command scripts:
//!
//! - [`Ipv4Address`], [`Ipv4Netmask`], [`Ipv4Network`]: management network
//!   addressing and gateway derivation
//! - [`PsuCount`]: power supplies per server (2, 4 or 6)
//! - [`Side`]: the redundant A/B PDU units in a rack
//! - [`FabricVersion`]: datacenter fabric generation (v2/v3)

mod fabric;
mod ip;
mod psu;

pub use fabric::FabricVersion;
pub use ip::{Ipv4Address, Ipv4Netmask, Ipv4Network};
pub use psu::{PsuCount, Side};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("invalid subnet mask: {0}")]
    InvalidNetmask(String),

    #[error("invalid PSU count: {0} (must be 2, 4 or 6)")]
    InvalidPsuCount(String),

    #[error("invalid fabric version: {0} (must be v2 or v3)")]
    InvalidFabricVersion(String),

    #[error("invalid PDU side: {0}")]
    InvalidSide(String),
}
