//! # pdugen - PDU Outlet Configuration Generator
//!
//! This crate generates the CLI script that configures a rack's pair of
//! redundant PDUs (sides A and B) from a host inventory and an outlet
//! inventory.
//!
//! ## Responsibilities
//! - Inventory loading: hostname and port files split into switch and
//!   server sections
//! - Outlet assignment: outlet names, outlet groups and power-on delays for
//!   every host, with PSU-to-side mapping driven by the PSU count
//! - Power-on staggering: delays grow as more outlets are assigned so that
//!   a rack does not draw inrush current all at once
//! - Script assembly: device identity, network, SNMP and syslog boilerplate
//!   around the outlet commands
//!
//! ## Configuration Sources
//! - YAML device file (`--config`)
//! - Command line flags
//! - Interactive prompts for anything still missing
//!
//! ## Key Features
//! - Fail-fast on malformed inventories; no partial scripts
//! - Gateway derived from the PDU address and the fabric subnet
//! - Legacy single-mode script variant (6 PSU, fixed /16 management network)

pub mod config;
pub mod inventory;
pub mod logging;
pub mod outlet_mgr;
pub mod prompt;
pub mod script;
pub mod template;
mod types;

pub use config::{DeviceConfig, PartialDeviceConfig};
pub use inventory::Inventory;
pub use outlet_mgr::OutletMgr;
pub use prompt::Prompter;
pub use script::{build_script, ConfigScript};
pub use types::*;
