//! PDU CLI command builders.
//!
//! Every generated line is a single PDU CLI command of the form
//! `<verb> <args...>`. Arguments are separated by single spaces and the
//! device has no quoting syntax, so hostnames and ports are validated as
//! plain tokens before they are interpolated.
//!
//! # Example
//!
//! ```
//! use pdu_cfgmgr_common::command::{self, SET_OUTLET_NAME_CMD};
//! use pdu_types::Side;
//!
//! let cmd = command::outlet_name(Side::A, "7", "web01", 1);
//! assert_eq!(cmd, format!("{} AA7 web01_PSU1", SET_OUTLET_NAME_CMD));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use pdu_types::Side;

use crate::error::{PduCfgError, PduCfgResult};

/// Creates an outlet group named after a host.
pub const CREATE_GROUP_CMD: &str = "create group";

/// Sets the display name of an outlet.
pub const SET_OUTLET_NAME_CMD: &str = "set outlet name";

/// Adds an outlet to a group.
pub const ADD_OUTLET_TO_GROUP_CMD: &str = "add outlettogroup";

/// Sets the power-on delay of an outlet.
pub const SET_OUTLET_ONDELAY_CMD: &str = "set outlet ondelay";

/// Sets the extended power-on delay of an outlet.
pub const SET_OUTLET_EXTONDELAY_CMD: &str = "set outlet extondelay";

/// Hostnames: letters, digits, '.', '_' and '-', starting alphanumeric.
static HOSTNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("Invalid regex pattern"));

/// Ports: decimal outlet numbers.
static PORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("Invalid regex pattern"));

/// Checks that a hostname can be used as a group name and outlet label.
pub fn validate_hostname(host: &str) -> PduCfgResult<()> {
    if HOSTNAME_RE.is_match(host) {
        Ok(())
    } else {
        tracing::debug!(host = %host, "Rejected hostname");
        Err(PduCfgError::invalid_token(
            "hostname",
            host,
            "expected letters, digits, '.', '_' or '-'",
        ))
    }
}

/// Checks that a port is a decimal outlet number.
pub fn validate_port(port: &str) -> PduCfgResult<()> {
    if PORT_RE.is_match(port) {
        Ok(())
    } else {
        tracing::debug!(port = %port, "Rejected port");
        Err(PduCfgError::invalid_token(
            "port",
            port,
            "expected a decimal outlet number",
        ))
    }
}

/// `create group <host>`
pub fn create_group(host: &str) -> String {
    format!("{} {}", CREATE_GROUP_CMD, host)
}

/// `set outlet name <side><port> <host>_PSU<psu>`
pub fn outlet_name(side: Side, port: &str, host: &str, psu: u8) -> String {
    format!(
        "{} {} {}_PSU{}",
        SET_OUTLET_NAME_CMD,
        side.outlet(port),
        host,
        psu
    )
}

/// `add outlettogroup <side><port> <host>`
pub fn outlet_to_group(side: Side, port: &str, host: &str) -> String {
    format!("{} {} {}", ADD_OUTLET_TO_GROUP_CMD, side.outlet(port), host)
}

/// `set outlet ondelay` and `set outlet extondelay` for one outlet.
pub fn outlet_delays(side: Side, port: &str, delay: u32) -> [String; 2] {
    let outlet = side.outlet(port);
    [
        format!("{} {} {}", SET_OUTLET_ONDELAY_CMD, outlet, delay),
        format!("{} {} {}", SET_OUTLET_EXTONDELAY_CMD, outlet, delay),
    ]
}

/// Name, group membership and both delays for a single outlet, in that
/// order.
pub fn outlet_block(side: Side, port: &str, host: &str, psu: u8, delay: u32) -> [String; 4] {
    let [on_delay, ext_on_delay] = outlet_delays(side, port, delay);
    [
        outlet_name(side, port, host, psu),
        outlet_to_group(side, port, host),
        on_delay,
        ext_on_delay,
    ]
}
