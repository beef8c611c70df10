//! Management network helpers.

use pdu_types::{Ipv4Address, Ipv4Netmask, Ipv4Network};

use crate::error::{PduCfgError, PduCfgResult};

/// Computes the default gateway for a PDU management address.
///
/// The gateway is the first usable host of the network enclosing
/// `address`. Networks with fewer than two usable hosts (/31, /32) have
/// no gateway and are rejected.
///
/// # Example
///
/// ```
/// use pdu_cfgmgr_common::network::calculate_gateway;
///
/// let gw = calculate_gateway("10.0.0.5".parse().unwrap(), "255.255.255.0".parse().unwrap())
///     .unwrap();
/// assert_eq!(gw.to_string(), "10.0.0.1");
/// ```
pub fn calculate_gateway(address: Ipv4Address, mask: Ipv4Netmask) -> PduCfgResult<Ipv4Address> {
    let network = Ipv4Network::new(address, mask);
    let gateway = network.first_host().ok_or_else(|| {
        PduCfgError::invalid_network(
            address,
            mask,
            format!(
                "network {} has {} usable host(s)",
                network,
                network.usable_hosts()
            ),
        )
    })?;

    tracing::debug!(
        address = %address,
        network = %network,
        gateway = %gateway,
        "Calculated gateway"
    );
    Ok(gateway)
}

/// Parses an address/mask pair and computes its gateway.
pub fn gateway_from_strs(address: &str, mask: &str) -> PduCfgResult<Ipv4Address> {
    calculate_gateway(address.parse()?, mask.parse()?)
}
