//! Common infrastructure for PDU configuration generators.
//!
//! This crate provides shared functionality for tools that emit PDU CLI
//! scripts:
//!
//! - [`command`]: Command verbs, builders and token validation
//! - [`network`]: Gateway derivation for the management network
//! - [`error`]: Error types for configuration generation
//! - [`defaults`]: Stagger constants and default input locations
//!
//! # Example
//!
//! ```
//! use pdu_cfgmgr_common::{command, PduCfgResult};
//!
//! fn group_for(host: &str) -> PduCfgResult<String> {
//!     command::validate_hostname(host)?;
//!     Ok(command::create_group(host))
//! }
//!
//! assert_eq!(group_for("sw1").unwrap(), "create group sw1");
//! assert!(group_for("bad host").is_err());
//! ```

pub mod command;
pub mod error;
pub mod network;

// Re-export commonly used items at crate root
pub use error::{PduCfgError, PduCfgResult};

/// Default values shared by the generators.
pub mod defaults {
    /// Seconds added to the power-on delay at each stagger step.
    pub const DELAY_STEP: u32 = 5;

    /// Outlet count that must be exceeded before delays start growing.
    pub const DELAY_THRESHOLD: u32 = 4;

    /// Default hostname inventory file.
    pub const HOSTNAME_FILE: &str = "hostname.txt";

    /// Default port inventory file.
    pub const PORT_FILE: &str = "port.txt";

    /// Domain appended to `infra-<dc>` for the syslog host.
    pub const SYSLOG_DOMAIN: &str = "linode.com";
}
