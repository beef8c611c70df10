//! Static header and footer blocks around the outlet commands.

use pdu_types::{Ipv4Address, Ipv4Netmask};

use crate::config::DeviceConfig;

/// Banner shown on login to the fabric-variant PDUs.
pub const PRO_SERIES_BANNER: &str = "**IMPORTANT** This is a Pro Series PDU that has 1 master and 1 slave, \
Outlet groups are set up on here so you can just type reboot hostname to reboot a server or piece of gear.";

/// Fixed management subnet of the legacy variant.
pub const LEGACY_SUBNET: &str = "255.255.0.0";

/// Management network settings written to the device header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkSettings {
    pub gateway: Ipv4Address,
    pub subnet: Ipv4Netmask,
}

/// Title line separating scripts for different PDUs.
pub fn title(config: &DeviceConfig) -> String {
    format!("===== CONFIG FOR {} ({}) =====", config.pdu_name, config.ip)
}

/// DNS resolvers of a datacenter: `10.<dc>.1.12` and `10.<dc>.1.13`.
pub fn dns_servers(dc_id: u8) -> [Ipv4Address; 2] {
    [
        Ipv4Address::new(10, dc_id, 1, 12),
        Ipv4Address::new(10, dc_id, 1, 13),
    ]
}

/// Gateway of the legacy /16 management network: `10.<dc>.0.1`.
pub fn legacy_gateway(dc_id: u8) -> Ipv4Address {
    Ipv4Address::new(10, dc_id, 0, 1)
}

fn dns_lines(dc_id: u8) -> Vec<String> {
    let [dns1, dns2] = dns_servers(dc_id);
    vec![format!("set dns1 {}", dns1), format!("set dns2 {}", dns2)]
}

/// Header of the fabric variant.
///
/// DNS resolvers are only set on fabrics that use them, after the SNMP
/// block.
pub fn fabric_header(config: &DeviceConfig, network: &NetworkSettings) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        title(config),
        "set dhcp disabled".to_string(),
        format!("set ipv4 address {}", config.ip),
        format!("set gateway {}", network.gateway),
        format!("set subnet {}", network.subnet),
        format!("set location {}", config.dc_abbr),
        "set telnet disabled".to_string(),
        "set ssl enabled".to_string(),
        String::new(),
        "set banner".to_string(),
        String::new(),
        PRO_SERIES_BANNER.to_string(),
        String::new(),
        "create user admin".to_string(),
        String::new(),
        "set user access admin admin".to_string(),
        String::new(),
        "set snmp v2 enabled".to_string(),
        // Confirmation answer for the SNMP prompt
        "y".to_string(),
        "set snmp v2 getcomm public".to_string(),
        format!("set snmp sysname {}", config.pdu_name),
        format!("set snmp syslocation {}", config.pdu_name),
        String::new(),
    ];

    if config.fabric.uses_dns() {
        lines.extend(dns_lines(config.dc_id));
    }
    lines
}

/// Header of the legacy variant.
pub fn legacy_header(config: &DeviceConfig, network: &NetworkSettings) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        title(config),
        "set dhcp disabled".to_string(),
        format!("set ipv4 address {}", config.ip),
        format!("set gateway {}", network.gateway),
    ];
    lines.extend(dns_lines(config.dc_id));
    lines.extend([
        format!("set subnet {}", network.subnet),
        format!("set location {}", config.pdu_name),
        "set telnet disabled".to_string(),
        "set ssl enabled".to_string(),
        "set snmp v2 enabled".to_string(),
        "set snmp v2 getcomm public".to_string(),
        format!("set snmp sysname {}", config.pdu_name),
        format!("set snmp syslocation {}", config.pdu_name),
        String::new(),
    ]);
    lines
}

/// Syslog host, removal of the factory user, and restart.
pub fn footer(config: &DeviceConfig) -> Vec<String> {
    vec![
        String::new(),
        format!(
            "set syslog host1 infra-{}.{}",
            config.dc_abbr, config.syslog_domain
        ),
        "remove user admn".to_string(),
        "restart".to_string(),
        String::new(),
    ]
}
