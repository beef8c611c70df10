//! Host and port inventory loading.
//!
//! Both inventory files are line oriented. The first blank line separates
//! the switch section from the server section; a file without a blank line
//! holds switches only, and a file starting with a blank line holds servers
//! only. Later blank lines are ignored.

use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

use pdu_cfgmgr_common::{PduCfgError, PduCfgResult};

/// Switch and server sections of a rack inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    /// Switch hostnames, paired one-to-one with `switch_ports`
    pub switch_hosts: Vec<String>,

    /// One outlet number per switch
    pub switch_ports: Vec<String>,

    /// Server hostnames
    pub server_hosts: Vec<String>,

    /// Server outlet numbers, consumed in per-server chunks
    pub server_ports: Vec<String>,
}

impl Inventory {
    /// Builds an inventory from the raw lines of the hostname and port files
    pub fn from_lines<H, P>(host_lines: H, port_lines: P) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let (switch_hosts, server_hosts) = split_sections(host_lines);
        let (switch_ports, server_ports) = split_sections(port_lines);

        Self {
            switch_hosts,
            switch_ports,
            server_hosts,
            server_ports,
        }
    }

    /// Reads and splits the hostname and port files
    #[instrument]
    pub fn load(hostnames: &Path, ports: &Path) -> PduCfgResult<Self> {
        let host_text = read_file(hostnames)?;
        let port_text = read_file(ports)?;

        let inventory = Self::from_lines(host_text.lines(), port_text.lines());
        info!(
            switches = inventory.switch_hosts.len(),
            servers = inventory.server_hosts.len(),
            switch_ports = inventory.switch_ports.len(),
            server_ports = inventory.server_ports.len(),
            "Loaded inventory"
        );
        Ok(inventory)
    }

    /// Returns true if neither section has any host
    pub fn is_empty(&self) -> bool {
        self.switch_hosts.is_empty() && self.server_hosts.is_empty()
    }
}

fn read_file(path: &Path) -> PduCfgResult<String> {
    debug!("Reading {}", path.display());
    fs::read_to_string(path).map_err(|e| PduCfgError::input_file(path, e))
}

/// Splits trimmed lines at the first blank line into (before, after),
/// dropping any other blank lines.
fn split_sections<I>(lines: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut first = Vec::new();
    let mut second = Vec::new();
    let mut seen_separator = false;

    for line in lines {
        let entry = line.as_ref().trim();
        if entry.is_empty() {
            seen_separator = true;
            continue;
        }
        if seen_separator {
            second.push(entry.to_string());
        } else {
            first.push(entry.to_string());
        }
    }

    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_with_separator() {
        let inventory = Inventory::from_lines(
            ["sw1", "sw2", "", "srv1", "srv2"],
            ["1", "2", "", "3", "4", "5", "6", "7", "8"],
        );
        assert_eq!(inventory.switch_hosts, vec!["sw1", "sw2"]);
        assert_eq!(inventory.server_hosts, vec!["srv1", "srv2"]);
        assert_eq!(inventory.switch_ports, vec!["1", "2"]);
        assert_eq!(inventory.server_ports, vec!["3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn test_no_separator_means_switches_only() {
        let inventory = Inventory::from_lines(["sw1", "sw2"], ["1", "2"]);
        assert_eq!(inventory.switch_hosts, vec!["sw1", "sw2"]);
        assert!(inventory.server_hosts.is_empty());
        assert!(inventory.server_ports.is_empty());
    }

    #[test]
    fn test_leading_separator_means_servers_only() {
        let inventory = Inventory::from_lines(["", "srv1"], ["", "1", "2", "3"]);
        assert!(inventory.switch_hosts.is_empty());
        assert_eq!(inventory.server_hosts, vec!["srv1"]);
        assert_eq!(inventory.server_ports, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_whitespace_and_extra_blank_lines() {
        let inventory = Inventory::from_lines(
            ["  sw1  ", "   ", "srv1", "", "srv2", ""],
            ["1\r", "", "2", "", ""],
        );
        assert_eq!(inventory.switch_hosts, vec!["sw1"]);
        assert_eq!(inventory.server_hosts, vec!["srv1", "srv2"]);
        assert_eq!(inventory.switch_ports, vec!["1"]);
        assert_eq!(inventory.server_ports, vec!["2"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(Inventory::default().is_empty());
        assert!(Inventory::from_lines(["", ""], [""]).is_empty());
        assert!(!Inventory::from_lines(["sw1"], ["1"]).is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Inventory::load(
            Path::new("/nonexistent/hostname.txt"),
            Path::new("/nonexistent/port.txt"),
        )
        .unwrap_err();
        assert!(matches!(err, PduCfgError::InputFile { .. }));
    }
}
